mod config;
mod recording;
mod scheduler;
mod session;
mod storage;
pub use config::*;
pub use recording::*;
pub use scheduler::*;
pub use session::*;
pub use storage::*;

use std::time::Duration;

use reversi::PlayerMode;

pub struct Config {
    /// Drives the choice of automated moves.
    pub rng: rand::rngs::StdRng,
    pub recorder: Option<recording::Recorder>,
    pub automated_delay: Duration,
    /// Indexed by [`reversi::Disk::index()`]. Applied on top of the loaded game.
    pub mode_overrides: [Option<PlayerMode>; 2],
}
