use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    decode, encode, flipped_coordinates, has_valid_move, valid_moves, Board, Disk, Event,
    IllegalAdvance, IllegalMove, PersistError, Position, Storage,
};

/// Who chooses the moves of a side.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerMode {
    /// Moves come from outside, e.g. a human.
    #[default]
    Manual,
    /// Moves are picked at random among the legal ones.
    Automated,
}

impl PlayerMode {
    /// `0` for manual, `1` for automated.
    pub fn index(self) -> usize {
        match self {
            PlayerMode::Manual => 0,
            PlayerMode::Automated => 1,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(PlayerMode::Manual),
            1 => Some(PlayerMode::Automated),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerSlot {
    pub disk: Disk,
    pub mode: PlayerMode,
}

/// A snapshot of a game: everything that is persisted.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    /// Indexed by [`Disk::index()`].
    pub players: [PlayerSlot; 2],
    /// `None` once the game is over.
    pub active: Option<Disk>,
}

impl GameState {
    /// The starting position: dark to move, both sides manual.
    pub fn initial() -> Self {
        Self {
            board: Board::initial(),
            players: Disk::SIDES.map(|disk| PlayerSlot {
                disk,
                mode: PlayerMode::Manual,
            }),
            active: Some(Disk::Dark),
        }
    }

    pub fn mode_of(&self, disk: Disk) -> PlayerMode {
        self.players[disk.index()].mode
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}

/// Where the turn cycle currently stands.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", content = "disk")]
pub enum Phase {
    /// The side has at least one legal move and has to place a disk.
    AwaitingMove(Disk),
    /// The side placed a disk; [`Game::next_turn()`] hands over the turn.
    TurnResolution(Disk),
    /// The side has no legal move but the opponent does. Acknowledge the pass with
    /// [`Game::next_turn()`].
    PassPending(Disk),
    /// Nobody can move. Holds the side with more disks, `None` on a tie.
    GameOver(Option<Disk>),
}

/// The effects of a successful [`Game::place_disk()`], for animating the move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedMove {
    pub disk: Disk,
    pub position: Position,
    /// In the order produced by [`flipped_coordinates()`].
    pub flipped: Vec<Position>,
}

/// Summarizes the outcome of [`Game::change_player_mode()`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ModeChange {
    pub previous: PlayerMode,
    /// The side switched from automated to manual while it was its turn, so a
    /// scheduled automated move for it must not be played anymore.
    pub cancels_automated_move: bool,
}

/// The authoritative state of one game session, and the only way to change it.
///
/// Every transition queues [`Event`]s, which the caller collects with
/// [`Self::drain_events()`].
#[derive(Clone, Debug)]
pub struct Game {
    state: GameState,
    phase: Phase,
    events: Vec<Event>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self::from_state(GameState::initial())
    }

    /// Resumes a game from a snapshot, e.g. one that was just loaded.
    ///
    /// The phase is derived from the board: a side that cannot move is pending a
    /// pass, and a snapshot in which nobody can move is finished.
    pub fn from_state(mut state: GameState) -> Self {
        let phase = match state.active {
            None => Phase::GameOver(state.board.side_with_more_disks()),
            Some(disk) if has_valid_move(disk, &state.board) => Phase::AwaitingMove(disk),
            Some(disk) if has_valid_move(disk.opposite(), &state.board) => {
                Phase::PassPending(disk)
            }
            Some(_) => {
                state.active = None;
                Phase::GameOver(state.board.side_with_more_disks())
            }
        };
        Self {
            state,
            phase,
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn board(&self) -> &Board {
        &self.state.board
    }

    /// The side whose turn it is, `None` once the game is over.
    pub fn active(&self) -> Option<Disk> {
        self.state.active
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::GameOver(_))
    }

    /// Announces the current snapshot to the caller.
    ///
    /// A pass that is still waiting for its acknowledgement, e.g. in a resumed game,
    /// is announced again right after.
    pub fn start(&mut self) -> &GameState {
        self.events.push(Event::Started {
            state: self.state.clone(),
        });
        if let Phase::PassPending(disk) = self.phase {
            self.events.push(Event::Passed { disk });
        }
        &self.state
    }

    /// Places a disk of the active side and flips the enclosed disks.
    ///
    /// This is the only way the board changes during a game. The turn does not pass
    /// to the opponent until [`Self::next_turn()`] is called.
    pub fn place_disk(&mut self, position: Position) -> Result<AppliedMove, IllegalMove> {
        let disk = match self.phase {
            Phase::AwaitingMove(disk) => disk,
            Phase::TurnResolution(disk) => return Err(IllegalMove::TurnUnresolved { disk }),
            Phase::PassPending(disk) => return Err(IllegalMove::PassPending { disk }),
            Phase::GameOver(_) => return Err(IllegalMove::GameOver),
        };
        if !position.is_on_board() {
            return Err(IllegalMove::OutOfBounds { position });
        }
        if let Some(existing) = self.state.board.disk_at(position.x, position.y) {
            return Err(IllegalMove::Occupied { position, existing });
        }

        let flipped = flipped_coordinates(disk, position, &self.state.board);
        if flipped.is_empty() {
            return Err(IllegalMove::NoDisksFlipped { position });
        }

        for &Position { x, y } in std::iter::once(&position).chain(&flipped) {
            // Can't fail, the position was checked and the flip search stays on the board
            self.state
                .board
                .set_disk(disk, x, y)
                .expect("placed and flipped disks lie on the board");
        }
        self.phase = Phase::TurnResolution(disk);

        self.events.push(Event::DiskSet {
            disk,
            position,
            flipped: flipped.clone(),
            board: self.state.board.clone(),
        });
        Ok(AppliedMove {
            disk,
            position,
            flipped,
        })
    }

    /// Ends the current turn, after a placement or to acknowledge a pass.
    ///
    /// The turn goes to the opponent if it can move. Otherwise, if the side that just
    /// had the turn can still move, the opponent has to pass, which is reported as
    /// [`Phase::PassPending`] and needs another call to acknowledge. A single call
    /// never skips more than one turn. If neither side can move, the game is over.
    pub fn next_turn(&mut self) -> Result<Phase, IllegalAdvance> {
        let previous = match self.phase {
            Phase::TurnResolution(disk) | Phase::PassPending(disk) => disk,
            Phase::AwaitingMove(disk) => return Err(IllegalAdvance::MoveRequired { disk }),
            Phase::GameOver(_) => return Err(IllegalAdvance::GameOver),
        };
        let next = previous.opposite();
        let board = &self.state.board;

        self.phase = if has_valid_move(next, board) {
            self.state.active = Some(next);
            self.events.push(Event::TurnChanged { disk: next });
            Phase::AwaitingMove(next)
        } else if has_valid_move(previous, board) {
            self.state.active = Some(next);
            self.events.push(Event::Passed { disk: next });
            Phase::PassPending(next)
        } else {
            let winner = board.side_with_more_disks();
            self.state.active = None;
            self.events.push(Event::Finished { winner });
            Phase::GameOver(winner)
        };
        Ok(self.phase)
    }

    /// Switches a side between manual and automated play. Allowed at any time, and
    /// never changes whose turn it is.
    pub fn change_player_mode(&mut self, disk: Disk, mode: PlayerMode) -> ModeChange {
        let slot = &mut self.state.players[disk.index()];
        let previous = std::mem::replace(&mut slot.mode, mode);
        self.events.push(Event::PlayerModeChanged { disk, mode });
        ModeChange {
            previous,
            cancels_automated_move: previous == PlayerMode::Automated
                && mode == PlayerMode::Manual
                && self.state.active == Some(disk),
        }
    }

    /// Throws away the current game and starts over from the starting position.
    ///
    /// Nothing is persisted implicitly.
    pub fn reset(&mut self) {
        self.state = GameState::initial();
        self.phase = Phase::AwaitingMove(Disk::Dark);
        self.events.push(Event::Reset {
            state: self.state.clone(),
        });
    }

    /// Picks a move for an automated side, uniformly among the legal ones.
    ///
    /// Returns `None` unless a side is awaiting its move, in which case it has at
    /// least one legal move.
    pub fn choose_automated_move<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Position> {
        match self.phase {
            Phase::AwaitingMove(disk) => valid_moves(disk, &self.state.board)
                .choose(rng)
                .copied(),
            _ => None,
        }
    }

    /// Takes all events queued since the last call, oldest first.
    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    /// Encodes the snapshot and hands it to the storage.
    pub fn save<S: Storage + ?Sized>(&self, storage: &mut S) -> Result<(), PersistError> {
        storage.save(&encode(&self.state))?;
        Ok(())
    }

    /// Restores a game from the storage.
    ///
    /// Falling back to a new game on failure is up to the caller.
    pub fn load<S: Storage + ?Sized>(storage: &S) -> Result<Self, PersistError> {
        let encoded = storage.load()?;
        Ok(Self::from_state(decode(&encoded)?))
    }
}
