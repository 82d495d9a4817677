//! Observers that record command outcomes for assertions

use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::Mutex;
use processing_network::error::NetworkError;
use processing_network::network::{CommandId, CommandObserver, CommandState, ObserverRef};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success(CommandId),
    Failure(CommandId, String),
}

impl Outcome {
    pub fn id(&self) -> CommandId {
        match self {
            Outcome::Success(id) | Outcome::Failure(id, _) => *id,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }
}

/// Records every notification and lets the test block until they arrive.
pub struct RecordingObserver {
    outcomes: Mutex<Vec<Outcome>>,
    tx: Sender<Outcome>,
    rx: Receiver<Outcome>,
}

impl RecordingObserver {
    pub fn new() -> Arc<Self> {
        let (tx, rx) = unbounded();
        Arc::new(Self {
            outcomes: Mutex::new(Vec::new()),
            tx,
            rx,
        })
    }

    pub fn handle(self: &Arc<Self>) -> Option<ObserverRef> {
        Some(Arc::clone(self) as ObserverRef)
    }

    /// Block until `count` more notifications arrived and return them.
    pub fn wait_for(&self, count: usize) -> Vec<Outcome> {
        (0..count)
            .map(|i| {
                self.rx
                    .recv_timeout(super::test_timeout())
                    .unwrap_or_else(|_| panic!("timed out waiting for notification {}", i + 1))
            })
            .collect()
    }

    pub fn wait_one(&self) -> Outcome {
        self.wait_for(1).remove(0)
    }

    pub fn outcomes(&self) -> Vec<Outcome> {
        self.outcomes.lock().clone()
    }

    fn record(&self, outcome: Outcome) {
        self.outcomes.lock().push(outcome.clone());
        let _ = self.tx.send(outcome);
    }
}

impl CommandObserver for RecordingObserver {
    fn success(&self, command: &CommandState) {
        self.record(Outcome::Success(command.id()));
    }

    fn failure(&self, command: &CommandState, error: &NetworkError) {
        self.record(Outcome::Failure(command.id(), error.to_string()));
    }
}

/// Counts notifications without keeping them.
#[derive(Default)]
pub struct CountingObserver {
    successes: AtomicUsize,
    failures: AtomicUsize,
}

impl CountingObserver {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn handle(self: &Arc<Self>) -> Option<ObserverRef> {
        Some(Arc::clone(self) as ObserverRef)
    }

    pub fn successes(&self) -> usize {
        self.successes.load(Ordering::SeqCst)
    }

    pub fn failures(&self) -> usize {
        self.failures.load(Ordering::SeqCst)
    }

    pub fn total(&self) -> usize {
        self.successes() + self.failures()
    }
}

impl CommandObserver for CountingObserver {
    fn success(&self, _command: &CommandState) {
        self.successes.fetch_add(1, Ordering::SeqCst);
    }

    fn failure(&self, _command: &CommandState, _error: &NetworkError) {
        self.failures.fetch_add(1, Ordering::SeqCst);
    }
}
