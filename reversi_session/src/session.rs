use rand::rngs::StdRng;
use reversi::{
    AppliedMove, Disk, Event, Game, Phase, PlayerMode, Position, Request, Response, Storage,
};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, info, trace, warn};

use crate::{AutomatedMoveScheduler, Config, Recorder, Ticket};

/// One JSON line written to the client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Outgoing {
    Response(Response),
    Event(Event),
    /// Something went wrong outside of the game, e.g. the game could not be saved.
    /// The session keeps going.
    Warning { message: String },
}

enum Input {
    Request(Request),
    Ticket(Ticket),
}

/// Owns the [`Game`] and is the only writer to it.
///
/// Requests from the client and due automated moves are handled one at a time, and
/// every resulting event is written to the outgoing channel, recorded and persisted
/// before the next input is looked at.
pub struct Session<S: Storage> {
    game: Game,
    storage: S,
    scheduler: AutomatedMoveScheduler,
    tickets: mpsc::UnboundedReceiver<Ticket>,
    rng: StdRng,
    recorder: Option<Recorder>,
    outgoing: mpsc::UnboundedSender<Outgoing>,
}

impl<S: Storage> Session<S> {
    /// Resumes the saved game, or starts a new one if there is none or it is unreadable.
    ///
    /// Must be called from within a tokio runtime, since an automated side that is to
    /// move gets its move scheduled right away.
    pub fn new(config: Config, storage: S, outgoing: mpsc::UnboundedSender<Outgoing>) -> Self {
        let mut game = match Game::load(&storage) {
            Ok(game) => {
                info!(phase = ?game.phase(), "Resuming saved game");
                game
            }
            Err(err) => {
                warn!("Could not load the saved game, starting a new one");
                log_error_chain(&err);
                Game::new()
            }
        };
        for disk in Disk::SIDES {
            if let Some(mode) = config.mode_overrides[disk.index()] {
                game.change_player_mode(disk, mode);
            }
        }
        // Applying the overrides is part of the setup, clients only see the result
        game.drain_events();
        game.start();

        let (scheduler, tickets) = AutomatedMoveScheduler::new(config.automated_delay);
        let mut session = Self {
            game,
            storage,
            scheduler,
            tickets,
            rng: config.rng,
            recorder: config.recorder,
            outgoing,
        };
        session.settle();
        session
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Handles requests and automated moves until the client says bye or goes away.
    pub async fn run(mut self, mut requests: mpsc::Receiver<Request>) {
        loop {
            let input = tokio::select! {
                request = requests.recv() => match request {
                    Some(request) => Input::Request(request),
                    None => break,
                },
                Some(ticket) = self.tickets.recv() => Input::Ticket(ticket),
            };
            match input {
                Input::Request(request) => {
                    let bye = request == Request::Bye;
                    let response = self.handle_request(request);
                    self.send(Outgoing::Response(response));
                    if bye {
                        break;
                    }
                }
                Input::Ticket(ticket) => self.handle_ticket(ticket),
            }
        }
        self.scheduler.cancel_all();
        info!("Session ended");
    }

    /// Events caused by the request are sent before the returned response.
    pub fn handle_request(&mut self, request: Request) -> Response {
        trace!(?request, "Handling request");
        let response = match request {
            Request::StartGame => Response::Snapshot {
                state: self.game.start().clone(),
                phase: self.game.phase(),
            },
            Request::PlaceDisk { x, y } => self.place_manual_disk(Position::new(x, y)),
            Request::ChangePlayerMode { disk, mode } => {
                let change = self.game.change_player_mode(disk, mode);
                if change.cancels_automated_move {
                    self.scheduler.cancel(disk);
                }
                info!(color = %disk, ?mode, "Changed player mode");
                Response::Okay
            }
            Request::NextTurn => match self.game.next_turn() {
                Ok(phase) => {
                    debug!(?phase, "Acknowledged pass");
                    Response::Okay
                }
                Err(err) => Response::Rejected {
                    reason: err.to_string(),
                },
            },
            Request::ResetGame => {
                self.scheduler.cancel_all();
                self.game.reset();
                info!("Reset the game");
                Response::Okay
            }
            Request::Bye => {
                self.scheduler.cancel_all();
                return Response::Okay;
            }
        };
        self.settle();
        response
    }

    /// Plays the automated move the ticket was issued for, unless it was cancelled.
    pub fn handle_ticket(&mut self, ticket: Ticket) {
        let disk = ticket.disk;
        if !self.scheduler.redeem(ticket) {
            debug!(color = %disk, "Ignoring cancelled automated move");
            return;
        }
        if self.game.phase() != Phase::AwaitingMove(disk) || !self.is_automated(disk) {
            warn!(color = %disk, "Automated move is not due anymore");
            return;
        }
        let Some(position) = self.game.choose_automated_move(&mut self.rng) else {
            return;
        };
        if let Err(err) = self.play(position) {
            warn!(color = %disk, %err, "Automated move failed");
        }
        self.settle();
    }

    /// Waits until an automated move is due.
    pub async fn next_ticket(&mut self) -> Option<Ticket> {
        self.tickets.recv().await
    }

    fn is_automated(&self, disk: Disk) -> bool {
        self.game.state().mode_of(disk) == PlayerMode::Automated
    }

    fn place_manual_disk(&mut self, position: Position) -> Response {
        if let Some(disk) = self.game.active() {
            if self.is_automated(disk) {
                return Response::Rejected {
                    reason: format!("It's the turn of the automated {} side", disk),
                };
            }
        }
        match self.play(position) {
            Ok((applied, phase)) => Response::Applied { applied, phase },
            Err(err) => {
                debug!(x = position.x, y = position.y, %err, "Rejected move");
                Response::Rejected {
                    reason: err.to_string(),
                }
            }
        }
    }

    /// Places a disk and hands over the turn, so nobody ever sees one without the other.
    fn play(&mut self, position: Position) -> anyhow::Result<(AppliedMove, Phase)> {
        let applied = self.game.place_disk(position)?;
        let phase = self.game.next_turn()?;
        info!(
            color = %applied.disk,
            x = position.x,
            y = position.y,
            flipped = applied.flipped.len(),
            "Placed disk"
        );
        trace!("\n{}", self.game.board());
        if let Phase::GameOver(winner) = phase {
            let winner = winner.map_or(String::from("tie"), |disk| disk.to_string());
            info!(winner = %winner, "Game over");
        }
        Ok((applied, phase))
    }

    /// Publishes what happened, then lets automated sides act.
    fn settle(&mut self) {
        loop {
            self.flush_events();
            match self.game.phase() {
                Phase::AwaitingMove(disk) if self.is_automated(disk) => {
                    if let Some(ticket) = self.scheduler.schedule(disk) {
                        debug!(color = %disk, ?ticket, "Automated move scheduled");
                    }
                    return;
                }
                Phase::PassPending(disk) if self.is_automated(disk) => {
                    debug!(color = %disk, "Automated side passes");
                    if let Err(err) = self.game.next_turn() {
                        warn!(color = %disk, %err, "Could not acknowledge pass");
                        return;
                    }
                }
                _ => return,
            }
        }
    }

    fn flush_events(&mut self) {
        let events = self.game.drain_events();
        if events.is_empty() {
            return;
        }
        for event in events {
            if let Some(recorder) = &mut self.recorder {
                recorder.store_event(&event);
            }
            let finished = matches!(event, Event::Finished { .. });
            self.send(Outgoing::Event(event));
            if finished {
                self.write_recording();
            }
        }
        self.persist();
    }

    fn persist(&mut self) {
        if let Err(err) = self.game.save(&mut self.storage) {
            warn!("Could not save the game");
            log_error_chain(&err);
            self.send(Outgoing::Warning {
                message: format!("Could not save the game: {}", err),
            });
        }
    }

    fn write_recording(&mut self) {
        let Some(recorder) = &mut self.recorder else {
            return;
        };
        match recorder.write_game_recording() {
            Ok(path) => info!(path = %path.display(), "Recorded game"),
            Err(err) => warn!(%err, "Could not record game"),
        }
    }

    fn send(&self, message: Outgoing) {
        if self.outgoing.send(message).is_err() {
            debug!("Client is gone, dropping message");
        }
    }
}

fn log_error_chain(err: &(dyn std::error::Error + 'static)) {
    let mut err_dyn = err;
    while let Some(src_err) = err_dyn.source() {
        warn!("{}", err_dyn);
        err_dyn = src_err;
    }
    warn!("{}", err_dyn);
}
