use serde::{Deserialize, Serialize};

/// The color of a disk, and by extension of the player who places it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Disk {
    /// Always moves first.
    Dark,
    Light,
}

impl Disk {
    /// Both sides, in the order used for player slots and the save format.
    pub const SIDES: [Disk; 2] = [Disk::Dark, Disk::Light];

    /// The other side.
    pub fn opposite(self) -> Self {
        match self {
            Disk::Dark => Disk::Light,
            Disk::Light => Disk::Dark,
        }
    }

    /// `0` for dark, `1` for light.
    pub fn index(self) -> usize {
        match self {
            Disk::Dark => 0,
            Disk::Light => 1,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Disk::Dark),
            1 => Some(Disk::Light),
            _ => None,
        }
    }

    /// The symbol of this disk in the save format.
    pub fn symbol(self) -> char {
        match self {
            Disk::Dark => 'x',
            Disk::Light => 'o',
        }
    }
}

impl std::ops::Not for Disk {
    type Output = Self;

    fn not(self) -> Self {
        self.opposite()
    }
}

impl std::fmt::Display for Disk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Disk::Dark => write!(f, "dark"),
            Disk::Light => write!(f, "light"),
        }
    }
}
