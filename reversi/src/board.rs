mod disk;
mod position;

pub use disk::*;
pub use position::*;

use serde::{Deserialize, Serialize};

use crate::OutOfRange;

pub const BOARD_WIDTH: i8 = 8;
pub const BOARD_HEIGHT: i8 = 8;

/// The 8×8 grid of disks.
///
/// Only on-board cells are ever stored, so every occupied cell lies in
/// `[0, BOARD_WIDTH) × [0, BOARD_HEIGHT)`.
//
// Serialized as one string per row, in the same alphabet as the save format.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "Vec<String>", try_from = "Vec<String>")]
pub struct Board {
    /// Indexed by `[y][x]`.
    cells: [[Option<Disk>; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a board in the starting layout, see [`Self::reset()`].
    pub fn initial() -> Self {
        let mut board = Self::new();
        board.reset();
        board
    }

    /// Clears the board and places the four starting disks in the central 2×2 block.
    pub fn reset(&mut self) {
        *self = Self::new();
        let (w, h) = (BOARD_WIDTH, BOARD_HEIGHT);
        self.cells[(h / 2 - 1) as usize][(w / 2 - 1) as usize] = Some(Disk::Light);
        self.cells[(h / 2 - 1) as usize][(w / 2) as usize] = Some(Disk::Dark);
        self.cells[(h / 2) as usize][(w / 2 - 1) as usize] = Some(Disk::Dark);
        self.cells[(h / 2) as usize][(w / 2) as usize] = Some(Disk::Light);
    }

    /// Whether the coordinates name a cell of the board.
    pub fn is_in_bounds(x: i8, y: i8) -> bool {
        Position::new(x, y).is_on_board()
    }

    /// Puts `disk` on the given cell, replacing whatever was there.
    ///
    /// Coordinates off the board leave the board untouched and return an error.
    pub fn set_disk(&mut self, disk: Disk, x: i8, y: i8) -> Result<(), OutOfRange> {
        if !Self::is_in_bounds(x, y) {
            return Err(OutOfRange { x, y });
        }
        self.cells[y as usize][x as usize] = Some(disk);
        Ok(())
    }

    /// The disk on the given cell. Coordinates off the board are simply empty.
    pub fn disk_at(&self, x: i8, y: i8) -> Option<Disk> {
        if Self::is_in_bounds(x, y) {
            self.cells[y as usize][x as usize]
        } else {
            None
        }
    }

    /// How many cells hold a disk of `side`.
    pub fn count_disks(&self, side: Disk) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell == Some(side))
            .count()
    }

    /// The side with strictly more disks on the board, or `None` on a tie.
    pub fn side_with_more_disks(&self) -> Option<Disk> {
        let dark = self.count_disks(Disk::Dark);
        let light = self.count_disks(Disk::Light);
        match dark.cmp(&light) {
            std::cmp::Ordering::Less => Some(Disk::Light),
            std::cmp::Ordering::Equal => None,
            std::cmp::Ordering::Greater => Some(Disk::Dark),
        }
    }

    /// All cells of the board in row-major order (`y` outer, `x` inner).
    pub fn positions() -> impl Iterator<Item = Position> {
        (0..BOARD_HEIGHT).flat_map(|y| (0..BOARD_WIDTH).map(move |x| Position::new(x, y)))
    }

    /// The occupied cells in row-major order.
    pub fn disks(&self) -> impl Iterator<Item = (Position, Disk)> + '_ {
        Self::positions().filter_map(|pos| self.disk_at(pos.x, pos.y).map(|disk| (pos, disk)))
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(Option::is_some)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().flatten().all(Option::is_none)
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", crate::visualize_board(self))
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;

    #[test]
    fn new_board_is_empty() {
        let board = Board::new();
        assert!(board.is_empty());
        assert_eq!(board.disks().count(), 0);
        assert_eq!(board.side_with_more_disks(), None);
    }

    #[test]
    fn reset_places_the_starting_disks() {
        let mut board = Board::new();
        board.set_disk(Disk::Dark, 0, 0).unwrap();
        board.reset();

        assert_eq!(board.disk_at(3, 3), Some(Disk::Light));
        assert_eq!(board.disk_at(4, 3), Some(Disk::Dark));
        assert_eq!(board.disk_at(3, 4), Some(Disk::Dark));
        assert_eq!(board.disk_at(4, 4), Some(Disk::Light));
        assert_eq!(board.disks().count(), 4);
        assert_eq!(board.count_disks(Disk::Dark), 2);
        assert_eq!(board.count_disks(Disk::Light), 2);

        let again = {
            let mut b = board.clone();
            b.reset();
            b
        };
        assert_eq!(again, board);
        assert_eq!(Board::initial(), board);
    }

    #[test]
    fn set_disk_rejects_coordinates_off_the_board() {
        let cases = [
            (0, 0, true),
            (BOARD_WIDTH - 1, 0, true),
            (BOARD_WIDTH - 1, BOARD_HEIGHT - 1, true),
            (0, BOARD_HEIGHT - 1, true),
            (-1, 0, false),
            (0, -1, false),
            (BOARD_WIDTH, 0, false),
            (BOARD_WIDTH, BOARD_HEIGHT, false),
            (0, BOARD_HEIGHT, false),
        ];
        for (x, y, ok) in cases {
            let mut board = Board::new();
            let result = board.set_disk(Disk::Light, x, y);
            assert_eq!(result.is_ok(), ok, "({}, {})", x, y);
            if ok {
                assert_eq!(board.disk_at(x, y), Some(Disk::Light));
            } else {
                assert_eq!(result, Err(OutOfRange { x, y }));
                assert!(board.is_empty());
            }
        }
    }

    #[test]
    fn set_disk_overwrites() {
        let mut board = Board::new();
        board.set_disk(Disk::Light, 2, 5).unwrap();
        board.set_disk(Disk::Dark, 2, 5).unwrap();
        assert_eq!(board.disk_at(2, 5), Some(Disk::Dark));
        assert_eq!(board.count_disks(Disk::Light), 0);
    }

    #[test]
    fn count_and_compare_sides() {
        let mut board = Board::new();
        board.set_disk(Disk::Light, 0, 0).unwrap();
        assert_eq!(board.count_disks(Disk::Light), 1);
        assert_eq!(board.side_with_more_disks(), Some(Disk::Light));

        board.set_disk(Disk::Dark, 1, 0).unwrap();
        assert_eq!(board.side_with_more_disks(), None);

        board.set_disk(Disk::Dark, 2, 0).unwrap();
        assert_eq!(board.side_with_more_disks(), Some(Disk::Dark));
    }

    #[test]
    fn full_board_alternating_is_a_tie() {
        let mut board = Board::new();
        for (i, pos) in Board::positions().enumerate() {
            let disk = if i % 2 == 0 { Disk::Dark } else { Disk::Light };
            board.set_disk(disk, pos.x, pos.y).unwrap();
        }
        assert!(board.is_full());
        assert_eq!(board.count_disks(Disk::Dark), 32);
        assert_eq!(board.count_disks(Disk::Light), 32);
        assert_eq!(board.side_with_more_disks(), None);
    }

    #[test]
    fn positions_are_row_major() {
        let positions: Vec<Position> = Board::positions().collect();
        assert_eq!(positions.len(), 64);
        assert_eq!(positions[0], Position::new(0, 0));
        assert_eq!(positions[1], Position::new(1, 0));
        assert_eq!(positions[8], Position::new(0, 1));
        assert_eq!(positions[63], Position::new(7, 7));
    }

    quickcheck! {
        fn disk_at_off_the_board_is_empty(board: Board, x: i8, y: i8) -> bool {
            Board::is_in_bounds(x, y) || board.disk_at(x, y).is_none()
        }

        fn counts_add_up(board: Board) -> bool {
            board.count_disks(Disk::Dark) + board.count_disks(Disk::Light) == board.disks().count()
        }
    }
}
