//! Command observers.
//!
//! An observer is told once, on the worker thread, whether a command succeeded
//! or failed. It must return quickly: while it runs, no other command
//! executes.

use crate::error::NetworkError;
use crate::network::command::CommandState;
use std::sync::Arc;

/// Callback contract for command completion.
#[cfg_attr(test, mockall::automock)]
pub trait CommandObserver: Send + Sync {
    /// The command finished successfully.
    fn success(&self, _command: &CommandState) {}

    /// The command could not complete.
    fn failure(&self, _command: &CommandState, _error: &NetworkError) {}
}

/// Shared observer handle as accepted by the network operations.
pub type ObserverRef = Arc<dyn CommandObserver>;

/// Observer backed by a closure. The error is `None` on success.
pub struct CallbackObserver<F> {
    callback: F,
}

impl<F> CallbackObserver<F>
where
    F: Fn(&CommandState, Option<&NetworkError>) + Send + Sync + 'static,
{
    pub fn new(callback: F) -> Self {
        Self { callback }
    }

    /// Wrap the closure and return it as a shared observer handle.
    pub fn shared(callback: F) -> ObserverRef {
        Arc::new(Self::new(callback))
    }
}

impl<F> CommandObserver for CallbackObserver<F>
where
    F: Fn(&CommandState, Option<&NetworkError>) + Send + Sync,
{
    fn success(&self, command: &CommandState) {
        (self.callback)(command, None);
    }

    fn failure(&self, command: &CommandState, error: &NetworkError) {
        (self.callback)(command, Some(error));
    }
}
