use serde::{Deserialize, Serialize};

use crate::{AppliedMove, Board, Disk, GameState, Phase, PlayerMode, Position};

/// A notification about a state change, emitted by the [`Game`](crate::Game).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// The game was announced to the caller, either fresh or loaded.
    Started { state: GameState },
    /// A disk was placed, and the listed disks were flipped.
    DiskSet {
        disk: Disk,
        position: Position,
        flipped: Vec<Position>,
        board: Board,
    },
    /// The given side is now to move.
    TurnChanged { disk: Disk },
    /// The given side has no legal move and has to pass.
    Passed { disk: Disk },
    /// Nobody can move anymore. `None` is a tie.
    Finished { winner: Option<Disk> },
    /// The game was thrown away and restarted.
    Reset { state: GameState },
    PlayerModeChanged { disk: Disk, mode: PlayerMode },
}

/// Request from a client to the session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    /// The response is a [`Response::Snapshot`].
    StartGame,
    /// Place a disk for the active side, which must be manual.
    ///
    /// The response is a [`Response::Applied`]. The turn is advanced right away.
    PlaceDisk { x: i8, y: i8 },
    ChangePlayerMode { disk: Disk, mode: PlayerMode },
    /// Acknowledge a pass.
    NextTurn,
    ResetGame,
    /// The session should shut down.
    Bye,
}

/// The session's answer to a [`Request`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Response {
    Okay,
    Snapshot { state: GameState, phase: Phase },
    Applied { applied: AppliedMove, phase: Phase },
    /// The request was not applied and the game is unchanged.
    Rejected { reason: String },
}
