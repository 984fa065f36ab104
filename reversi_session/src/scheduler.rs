use std::time::Duration;

use reversi::Disk;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

/// Identifies one scheduled automated move.
///
/// It is sent back through the channel returned by [`AutomatedMoveScheduler::new()`]
/// once the delay is over, and can be [redeemed](AutomatedMoveScheduler::redeem) only
/// once, and only if it was not cancelled in the meantime.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Ticket {
    pub disk: Disk,
    id: u64,
}

struct Pending {
    id: u64,
    timer: JoinHandle<()>,
}

/// Delays automated moves so that they can be followed by a human, with at most one
/// pending move per side.
pub struct AutomatedMoveScheduler {
    delay: Duration,
    next_id: u64,
    /// Indexed by [`Disk::index()`].
    pending: [Option<Pending>; 2],
    fired: mpsc::UnboundedSender<Ticket>,
}

impl AutomatedMoveScheduler {
    pub fn new(delay: Duration) -> (Self, mpsc::UnboundedReceiver<Ticket>) {
        let (fired, receiver) = mpsc::unbounded_channel();
        let scheduler = Self {
            delay,
            next_id: 0,
            pending: [None, None],
            fired,
        };
        (scheduler, receiver)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn is_pending(&self, disk: Disk) -> bool {
        self.pending[disk.index()].is_some()
    }

    /// Starts the timer for an automated move of `disk`.
    ///
    /// Returns `None` and keeps the existing timer if one is already pending for
    /// that side. Must be called from within a tokio runtime.
    pub fn schedule(&mut self, disk: Disk) -> Option<Ticket> {
        if self.is_pending(disk) {
            debug!(%disk, "Automated move already scheduled");
            return None;
        }
        self.next_id += 1;
        let ticket = Ticket {
            disk,
            id: self.next_id,
        };

        let fired = self.fired.clone();
        let delay = self.delay;
        let timer = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Fails only if the session is gone, and then nobody cares
            let _ = fired.send(ticket);
        });
        trace!(%disk, ticket = ticket.id, "Scheduled automated move");
        self.pending[disk.index()] = Some(Pending {
            id: ticket.id,
            timer,
        });
        Some(ticket)
    }

    /// Consumes the ticket. Returns `false` if it was cancelled or already redeemed.
    pub fn redeem(&mut self, ticket: Ticket) -> bool {
        let slot = &mut self.pending[ticket.disk.index()];
        match slot {
            Some(pending) if pending.id == ticket.id => {
                *slot = None;
                true
            }
            _ => false,
        }
    }

    /// Cancels the pending move of `disk`, if any. Returns whether there was one.
    pub fn cancel(&mut self, disk: Disk) -> bool {
        match self.pending[disk.index()].take() {
            Some(pending) => {
                pending.timer.abort();
                trace!(%disk, ticket = pending.id, "Cancelled automated move");
                true
            }
            None => false,
        }
    }

    pub fn cancel_all(&mut self) {
        for disk in Disk::SIDES {
            self.cancel(disk);
        }
    }
}

impl Drop for AutomatedMoveScheduler {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
