pub use board::*;
pub use codec::*;
pub use errors::*;
pub use game::*;
pub use protocol::*;
pub use rules::*;
pub use storage::*;
pub use visualization::*;

#[cfg(test)]
mod arbitrary;
mod board;
mod codec;
mod errors;
mod game;
mod protocol;
mod rules;
mod storage;
mod visualization;
