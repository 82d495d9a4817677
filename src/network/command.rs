//! Commands: single-use units of work executed by a [`CommandQueue`].
//!
//! A command carries everything needed to perform one mutation or query on
//! the queue's target, plus a [`CommandState`] tracking its lifecycle:
//!
//! ```text
//! Created ──commit──► Waiting ──worker──► Busy ──► Succeeded | Failed
//! ```
//!
//! Reaching a terminal status notifies the optional observer exactly once.
//! Commands abandoned by a non-graceful stop stay `Waiting` forever.
//!
//! [`CommandQueue`]: crate::network::queue::CommandQueue

use crate::error::{NetworkError, NetworkResult};
use crate::network::observer::ObserverRef;
use parking_lot::Mutex;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Process-unique command identifier, assigned at construction.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommandId(pub u64);

impl fmt::Debug for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CommandId({})", self.0)
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Global counter for generating unique command IDs
static NEXT_COMMAND_ID: AtomicU64 = AtomicU64::new(1);

/// Lifecycle status of a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandStatus {
    /// Constructed, not yet committed.
    Created,
    /// Committed, waiting in the queue.
    Waiting,
    /// Executing on the worker thread.
    Busy,
    Succeeded,
    /// Failed with the given error message.
    Failed(String),
}

impl CommandStatus {
    pub fn is_handled(&self) -> bool {
        matches!(self, CommandStatus::Succeeded | CommandStatus::Failed(_))
    }
}

/// Identity, status and observer of one command.
pub struct CommandState {
    id: CommandId,
    title: String,
    description: String,
    observer: Option<ObserverRef>,
    status: Mutex<CommandStatus>,
    committed: AtomicBool,
}

impl CommandState {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        observer: Option<ObserverRef>,
    ) -> Self {
        Self {
            id: CommandId(NEXT_COMMAND_ID.fetch_add(1, Ordering::Relaxed)),
            title: title.into(),
            description: description.into(),
            observer,
            status: Mutex::new(CommandStatus::Created),
            committed: AtomicBool::new(false),
        }
    }

    pub fn id(&self) -> CommandId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn has_observer(&self) -> bool {
        self.observer.is_some()
    }

    pub fn status(&self) -> CommandStatus {
        self.status.lock().clone()
    }

    pub fn is_handled(&self) -> bool {
        self.status.lock().is_handled()
    }

    pub fn is_success(&self) -> bool {
        *self.status.lock() == CommandStatus::Succeeded
    }

    /// Record that the command entered a queue.
    ///
    /// # Panics
    ///
    /// Panics if the command was committed before. Commands are single-use.
    pub(crate) fn mark_committed(&self) {
        assert!(
            !self.committed.swap(true, Ordering::AcqRel),
            "command {} '{}' committed twice; commands are single-use",
            self.id,
            self.title
        );
        *self.status.lock() = CommandStatus::Waiting;
    }

    pub(crate) fn mark_busy(&self) {
        *self.status.lock() = CommandStatus::Busy;
    }

    /// Move to the terminal status for `result` and notify the observer.
    ///
    /// Observer panics are caught and logged; they never reach the worker.
    ///
    /// # Panics
    ///
    /// Panics if the command was already handled.
    pub(crate) fn handle(&self, result: &NetworkResult<()>) {
        {
            let mut status = self.status.lock();
            assert!(
                !status.is_handled(),
                "command {} '{}' handled twice",
                self.id,
                self.title
            );
            *status = match result {
                Ok(()) => CommandStatus::Succeeded,
                Err(e) => CommandStatus::Failed(e.to_string()),
            };
        }

        let Some(observer) = &self.observer else {
            return;
        };
        let notified = panic::catch_unwind(AssertUnwindSafe(|| match result {
            Ok(()) => observer.success(self),
            Err(e) => observer.failure(self, e),
        }));
        if let Err(payload) = notified {
            tracing::error!(
                "Observer of command {} '{}' panicked: {}",
                self.id,
                self.title,
                NetworkError::from_panic(payload)
            );
        }
    }
}

impl fmt::Debug for CommandState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandState")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("status", &*self.status.lock())
            .finish()
    }
}

/// A unit of work against a queue target `T`.
///
/// `apply` runs on the worker thread with exclusive access to the target.
/// The queue takes care of status transitions and observer notification.
pub trait Command<T>: Send + Sync {
    fn state(&self) -> &CommandState;

    fn apply(&self, target: &mut T) -> NetworkResult<()>;
}

/// Command built from a closure. Handy for ad-hoc work on the worker thread.
pub struct FnCommand<F> {
    state: CommandState,
    work: Mutex<Option<F>>,
}

impl<F> FnCommand<F> {
    pub fn new(title: impl Into<String>, observer: Option<ObserverRef>, work: F) -> Self {
        Self {
            state: CommandState::new(title, "", observer),
            work: Mutex::new(Some(work)),
        }
    }
}

impl<T, F> Command<T> for FnCommand<F>
where
    F: FnOnce(&mut T) -> NetworkResult<()> + Send,
{
    fn state(&self) -> &CommandState {
        &self.state
    }

    /// # Panics
    ///
    /// Panics when applied a second time.
    fn apply(&self, target: &mut T) -> NetworkResult<()> {
        let work = self.work.lock().take();
        match work {
            Some(work) => work(target),
            None => panic!("command {} applied twice; commands are single-use", self.state.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::observer::{CallbackObserver, MockCommandObserver};
    use std::sync::Arc;

    #[test]
    fn test_ids_are_unique() {
        let a = CommandState::new("a", "", None);
        let b = CommandState::new("b", "", None);
        assert_ne!(a.id(), b.id());
        assert!(b.id() > a.id());
    }

    #[test]
    fn test_lifecycle_without_observer() {
        let state = CommandState::new("noop", "does nothing", None);
        assert_eq!(state.status(), CommandStatus::Created);
        assert!(!state.has_observer());

        state.mark_committed();
        assert_eq!(state.status(), CommandStatus::Waiting);
        state.mark_busy();
        assert_eq!(state.status(), CommandStatus::Busy);
        state.handle(&Ok(()));
        assert!(state.is_handled());
        assert!(state.is_success());
    }

    #[test]
    fn test_success_notifies_observer_once() {
        let mut observer = MockCommandObserver::new();
        observer.expect_success().times(1).return_const(());
        observer.expect_failure().never();

        let state = CommandState::new("ok", "", Some(Arc::new(observer)));
        state.handle(&Ok(()));
    }

    #[test]
    fn test_failure_notifies_observer_with_error() {
        let mut observer = MockCommandObserver::new();
        observer.expect_success().never();
        observer
            .expect_failure()
            .withf(|_, err| matches!(err, NetworkError::Config(msg) if msg == "broken"))
            .times(1)
            .return_const(());

        let state = CommandState::new("bad", "", Some(Arc::new(observer)));
        state.handle(&Err(NetworkError::Config("broken".into())));
        assert_eq!(
            state.status(),
            CommandStatus::Failed("Configuration error: broken".into())
        );
    }

    #[test]
    #[should_panic(expected = "handled twice")]
    fn test_double_handle_panics() {
        let state = CommandState::new("twice", "", None);
        state.handle(&Ok(()));
        state.handle(&Ok(()));
    }

    #[test]
    #[should_panic(expected = "committed twice")]
    fn test_double_commit_panics() {
        let state = CommandState::new("twice", "", None);
        state.mark_committed();
        state.mark_committed();
    }

    #[test]
    fn test_observer_panic_is_contained() {
        let observer = CallbackObserver::shared(|_, _| panic!("observer exploded"));

        let state = CommandState::new("ok", "", Some(observer));
        state.handle(&Ok(()));
        assert!(state.is_success());
    }

    #[test]
    #[should_panic(expected = "applied twice")]
    fn test_fn_command_second_apply_panics() {
        let command = FnCommand::new("increment", None, |target: &mut u32| -> NetworkResult<()> {
            *target += 1;
            Ok(())
        });
        let mut target = 0u32;
        assert!(Command::<u32>::apply(&command, &mut target).is_ok());
        assert_eq!(target, 1);
        let _ = Command::<u32>::apply(&command, &mut target);
    }
}
