//! Cancellation and outcome plumbing shared by the parallel solvers

use crate::io::error::{Result, SearchError};
use crate::solver::search::{Halt, SearchObserver};
use crate::spatial::grid::{Grid, Placements};
use crossbeam::channel::{self, Receiver, Sender, TryRecvError, TrySendError};
use std::ops::ControlFlow;
use std::sync::{Mutex, PoisonError};

/// One-shot broadcast signal, closed at most once
///
/// Closing drops the only sender, so every receiver observes a disconnect at the
/// same time. Receivers can take part in `select!` alongside other channels.
pub struct DoneSignal {
    sender: Mutex<Option<Sender<()>>>,
    receiver: Receiver<()>,
}

impl DoneSignal {
    /// Create an open signal
    pub fn new() -> Self {
        let (sender, receiver) = channel::bounded(0);
        Self {
            sender: Mutex::new(Some(sender)),
            receiver,
        }
    }

    /// Close the signal; later calls do nothing
    ///
    /// Returns true for the call that closed it.
    pub fn close(&self) -> bool {
        self.sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .is_some()
    }

    /// Whether the signal has been closed
    pub fn is_closed(&self) -> bool {
        matches!(self.receiver.try_recv(), Err(TryRecvError::Disconnected))
    }

    /// Receiver that disconnects when the signal closes, for use in `select!`
    pub const fn receiver(&self) -> &Receiver<()> {
        &self.receiver
    }
}

impl Default for DoneSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Final report from a parallel search
#[derive(Debug)]
pub enum Outcome {
    /// A searcher reached a complete placement
    Found(Placements),
    /// Every searcher exhausted its work
    Exhausted,
    /// A searcher could not run
    Failed(SearchError),
}

/// Sending half of the single-slot outcome channel
///
/// Only the first outcome is kept; later reports are dropped without blocking.
#[derive(Clone)]
pub struct OutcomeSender {
    sender: Sender<Outcome>,
}

/// Receiving half of the single-slot outcome channel
pub struct OutcomeReceiver {
    receiver: Receiver<Outcome>,
}

/// Create a single-slot outcome channel
pub fn outcome_channel() -> (OutcomeSender, OutcomeReceiver) {
    let (sender, receiver) = channel::bounded(1);
    (OutcomeSender { sender }, OutcomeReceiver { receiver })
}

impl OutcomeSender {
    /// Offer an outcome; returns false if one was already reported
    pub fn report(&self, outcome: Outcome) -> bool {
        match self.sender.try_send(outcome) {
            Ok(()) => true,
            Err(TrySendError::Full(_) | TrySendError::Disconnected(_)) => false,
        }
    }
}

impl OutcomeReceiver {
    /// Wait for the outcome and convert it into a search result
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::NoSolution`] when the search was exhausted, the
    /// reported error when a searcher failed, and [`SearchError::WorkerLost`] if
    /// every sender was dropped without reporting
    pub fn wait(self, grid: Grid) -> Result<Placements> {
        match self.receiver.recv() {
            Ok(Outcome::Found(placements)) => Ok(placements),
            Ok(Outcome::Exhausted) => Err(SearchError::NoSolution { size: grid.size() }),
            Ok(Outcome::Failed(error)) => Err(error),
            Err(_disconnected) => Err(SearchError::WorkerLost),
        }
    }
}

/// Observer that cancels a search once the done signal closes
pub struct CancelOnDone<'a> {
    done: &'a DoneSignal,
}

impl<'a> CancelOnDone<'a> {
    /// Observe the given signal
    pub const fn new(done: &'a DoneSignal) -> Self {
        Self { done }
    }
}

impl SearchObserver for CancelOnDone<'_> {
    fn before_attempt(&mut self) -> ControlFlow<Halt> {
        if self.done.is_closed() {
            ControlFlow::Break(Halt::Cancelled)
        } else {
            ControlFlow::Continue(())
        }
    }
}
