//! Legality and effects of placing a disk. Everything here is a pure function of the board.

use crate::{Board, Disk, Position};

/// The eight compass directions, `y` growing downwards.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    NorthWest,
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
}

impl Direction {
    /// The order in which [`flipped_coordinates()`] searches, clockwise from the northwest.
    pub const ALL: [Direction; 8] = [
        Direction::NorthWest,
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
    ];

    pub fn offset(self) -> (i8, i8) {
        match self {
            Direction::NorthWest => (-1, -1),
            Direction::North => (0, -1),
            Direction::NorthEast => (1, -1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, 1),
            Direction::South => (0, 1),
            Direction::SouthWest => (-1, 1),
            Direction::West => (-1, 0),
        }
    }
}

/// The opposing disks that placing `disk` at `position` would flip.
///
/// This is the core function of the rules. From the placed cell, every direction
/// is walked one cell at a time while the cells hold the opponent's color. The run
/// is flipped only if it is closed by a disk of the mover's own color; running into
/// an empty cell or the edge of the board discards it.
///
/// The result is grouped by direction, in the order of [`Direction::ALL`], and each
/// group is ordered outwards from `position`. It is empty if the cell is occupied or
/// off the board.
pub fn flipped_coordinates(disk: Disk, position: Position, board: &Board) -> Vec<Position> {
    if !position.is_on_board() || board.disk_at(position.x, position.y).is_some() {
        return Vec::new();
    }

    let mut flipped = Vec::new();
    let mut line = Vec::new();
    for direction in Direction::ALL {
        line.clear();
        let mut cursor = position.step(direction.offset());
        // Off-board cells read as empty, which ends the walk.
        while let Some(found) = board.disk_at(cursor.x, cursor.y) {
            if found == disk {
                flipped.extend_from_slice(&line);
                break;
            }
            line.push(cursor);
            cursor = cursor.step(direction.offset());
        }
    }
    flipped
}

/// A move is legal iff it flips at least one of the opponent's disks.
pub fn can_place_disk(disk: Disk, position: Position, board: &Board) -> bool {
    !flipped_coordinates(disk, position, board).is_empty()
}

/// All legal moves of `disk`, in row-major order.
pub fn valid_moves(disk: Disk, board: &Board) -> Vec<Position> {
    Board::positions()
        .filter(|&pos| can_place_disk(disk, pos, board))
        .collect()
}

/// Whether `disk` has any legal move. This is cheaper than checking [`valid_moves()`].
pub fn has_valid_move(disk: Disk, board: &Board) -> bool {
    Board::positions().any(|pos| can_place_disk(disk, pos, board))
}
