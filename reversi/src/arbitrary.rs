use quickcheck::Arbitrary;

use crate::{Board, Disk, GameState, PlayerMode, PlayerSlot, Position, BOARD_HEIGHT, BOARD_WIDTH};

impl Arbitrary for Disk {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        *g.choose(&Disk::SIDES).unwrap()
    }
}

impl Arbitrary for PlayerMode {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        *g.choose(&[PlayerMode::Manual, PlayerMode::Automated])
            .unwrap()
    }
}

/// Mostly on the board, sometimes just outside of it.
impl Arbitrary for Position {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let x = (u8::arbitrary(g) % (BOARD_WIDTH as u8 + 2)) as i8 - 1;
        let y = (u8::arbitrary(g) % (BOARD_HEIGHT as u8 + 2)) as i8 - 1;
        Position { x, y }
    }
}

/// A board with a random fill level, so that sparse, dense and full boards all show up.
impl Arbitrary for Board {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let fill_percentage = u8::arbitrary(g) % 101;
        let mut board = Board::new();
        for pos in Board::positions() {
            if u8::arbitrary(g) % 100 < fill_percentage {
                board.set_disk(Disk::arbitrary(g), pos.x, pos.y).unwrap();
            }
        }
        board
    }
}

impl Arbitrary for GameState {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let players = Disk::SIDES.map(|disk| PlayerSlot {
            disk,
            mode: PlayerMode::arbitrary(g),
        });
        GameState {
            board: Board::arbitrary(g),
            players,
            active: Option::<Disk>::arbitrary(g),
        }
    }
}
