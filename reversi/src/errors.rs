use crate::{Disk, Position};

/// The error type for [`Board::set_disk()`](crate::Board::set_disk).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutOfRange {
    pub x: i8,
    pub y: i8,
}

impl std::error::Error for OutOfRange {}

impl std::fmt::Display for OutOfRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Cell ({}, {}) is outside of the board", self.x, self.y)
    }
}

/// The error type for [`Game::place_disk()`](crate::Game::place_disk).
///
/// A rejected placement never changes the game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IllegalMove {
    GameOver,
    /// The active side has no legal move, and the pass has not been acknowledged yet.
    PassPending { disk: Disk },
    /// A disk was already placed this turn, and the turn has not been advanced yet.
    TurnUnresolved { disk: Disk },
    OutOfBounds { position: Position },
    Occupied { position: Position, existing: Disk },
    NoDisksFlipped { position: Position },
}

impl std::error::Error for IllegalMove {}

impl std::fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalMove::GameOver => write!(f, "The game is already over"),
            IllegalMove::PassPending { disk } => {
                write!(f, "The {} side has to pass before play continues", disk)
            }
            IllegalMove::TurnUnresolved { disk } => write!(
                f,
                "The {} side already placed a disk, the turn must be advanced first",
                disk
            ),
            IllegalMove::OutOfBounds { position } => {
                write!(f, "Position {} is outside of the board", position)
            }
            IllegalMove::Occupied { position, existing } => {
                write!(f, "Position {} is already occupied by a {} disk", position, existing)
            }
            IllegalMove::NoDisksFlipped { position } => write!(
                f,
                "Placing a disk at {} would not flip any of the opponent's disks",
                position
            ),
        }
    }
}

/// The error type for [`Game::next_turn()`](crate::Game::next_turn).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IllegalAdvance {
    /// The active side has a legal move and has not placed a disk yet.
    MoveRequired { disk: Disk },
    GameOver,
}

impl std::error::Error for IllegalAdvance {}

impl std::fmt::Display for IllegalAdvance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalAdvance::MoveRequired { disk } => write!(
                f,
                "The {} side has a legal move and must place a disk before the turn ends",
                disk
            ),
            IllegalAdvance::GameOver => write!(f, "The game is already over"),
        }
    }
}

/// The error type for [`decode()`](crate::decode).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CorruptData {
    MissingHeader,
    InvalidHeaderLength { length: usize },
    InvalidActiveColor { symbol: char },
    InvalidPlayerMode { slot: Disk, symbol: char },
    WrongRowCount { expected: usize, found: usize },
    WrongRowLength { row: usize, expected: usize, found: usize },
    UnknownSymbol { row: usize, column: usize, symbol: char },
    /// The last line is not terminated by `\n`.
    MissingFinalNewline,
}

impl std::error::Error for CorruptData {}

impl std::fmt::Display for CorruptData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CorruptData::MissingHeader => write!(f, "The saved game has no header line"),
            CorruptData::InvalidHeaderLength { length } => write!(
                f,
                "The header line has {} symbols, expected 2 or 3",
                length
            ),
            CorruptData::InvalidActiveColor { symbol } => {
                write!(f, "'{}' is not a valid active color", symbol)
            }
            CorruptData::InvalidPlayerMode { slot, symbol } => {
                write!(f, "'{}' is not a valid player mode for the {} slot", symbol, slot)
            }
            CorruptData::WrongRowCount { expected, found } => {
                write!(f, "Expected {} board rows, found {}", expected, found)
            }
            CorruptData::WrongRowLength {
                row,
                expected,
                found,
            } => write!(
                f,
                "Board row {} has {} cells, expected {}",
                row, found, expected
            ),
            CorruptData::UnknownSymbol {
                row,
                column,
                symbol,
            } => write!(
                f,
                "Unknown symbol '{}' in board row {}, column {}",
                symbol, row, column
            ),
            CorruptData::MissingFinalNewline => {
                write!(f, "The saved game does not end with a newline")
            }
        }
    }
}

/// The error type for saving and loading a game through a [`Storage`](crate::Storage).
#[derive(Debug)]
pub enum PersistError {
    /// The storage itself failed. The cause is passed through as is.
    Io(std::io::Error),
    Corrupt(CorruptData),
}

impl std::error::Error for PersistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistError::Io(err) => Some(err),
            PersistError::Corrupt(err) => Some(err),
        }
    }
}

impl std::fmt::Display for PersistError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersistError::Io(_) => write!(f, "Could not access the game storage"),
            PersistError::Corrupt(_) => write!(f, "The saved game is corrupt"),
        }
    }
}

impl From<std::io::Error> for PersistError {
    fn from(err: std::io::Error) -> Self {
        PersistError::Io(err)
    }
}

impl From<CorruptData> for PersistError {
    fn from(err: CorruptData) -> Self {
        PersistError::Corrupt(err)
    }
}
