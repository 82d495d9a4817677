//! Command queue and its worker thread.
//!
//! Any thread may commit commands; a single dedicated worker executes them one
//! at a time, in arrival order. The queue owns a target value `T` that only
//! the worker touches while it runs, so commands get `&mut T` without any
//! locking on the hot path.
//!
//! # Shutdown
//!
//! - `stop(true)` enqueues a stop marker: everything committed before it
//!   executes, then the worker exits.
//! - `stop(false)` raises an abort flag and wakes the worker, which exits at
//!   its next wake-up. Pending commands are discarded without being handled.
//!
//! Either way `stop` blocks until the worker thread has exited. The target is
//! handed back to the queue, so a stopped queue can be started again. An exit
//! hook, if set, sees the target on the worker thread right before it exits.
//!
//! `stop` must not be called from the worker itself (for example from an
//! observer): it panics there and leaves the worker running.

use crate::error::{NetworkError, NetworkResult};
use crate::network::command::Command;
use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::Mutex;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

enum QueueMessage<T> {
    Execute(Arc<dyn Command<T>>),
    Stop,
}

enum Worker<T> {
    /// Not running; the queue holds the target.
    Idle(T),
    /// Running; the thread returns the target when it exits.
    Running(JoinHandle<T>),
    /// The worker thread died and took the target with it.
    Lost,
}

impl<T> Worker<T> {
    fn is_current_thread(&self) -> bool {
        matches!(self, Worker::Running(handle) if handle.thread().id() == std::thread::current().id())
    }
}

type ExitHook<T> = Arc<dyn Fn(&mut T) + Send + Sync>;

/// Thread-safe FIFO with one worker thread executing commands serially.
pub struct CommandQueue<T: Send + 'static> {
    name: String,
    sender: Sender<QueueMessage<T>>,
    receiver: Receiver<QueueMessage<T>>,
    abort: Arc<AtomicBool>,
    running: AtomicBool,
    worker: Mutex<Worker<T>>,
    on_exit: Option<ExitHook<T>>,
}

impl<T: Send + 'static> CommandQueue<T> {
    /// Create a stopped queue. `name` becomes the worker thread's name.
    pub fn new(name: impl Into<String>, target: T) -> Self {
        let (sender, receiver) = unbounded();
        Self {
            name: name.into(),
            sender,
            receiver,
            abort: Arc::new(AtomicBool::new(false)),
            running: AtomicBool::new(false),
            worker: Mutex::new(Worker::Idle(target)),
            on_exit: None,
        }
    }

    /// Create a stopped queue whose worker runs `hook` on the target every
    /// time it exits, gracefully or not.
    pub fn with_exit_hook(
        name: impl Into<String>,
        target: T,
        hook: impl Fn(&mut T) + Send + Sync + 'static,
    ) -> Self {
        let mut queue = Self::new(name, target);
        queue.on_exit = Some(Arc::new(hook));
        queue
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Number of queued messages not yet picked up by the worker.
    pub fn pending(&self) -> usize {
        self.receiver.len()
    }

    /// Whether the caller is this queue's worker thread.
    pub fn is_worker_thread(&self) -> bool {
        self.worker.lock().is_current_thread()
    }

    /// Whether a non-graceful `stop` is in progress.
    #[doc(hidden)]
    pub fn is_aborting(&self) -> bool {
        self.abort.load(Ordering::Acquire)
    }

    /// Spawn the worker thread. Does nothing if it is already running.
    pub fn start(&self) -> NetworkResult<()> {
        let mut worker = self.worker.lock();
        let target = match std::mem::replace(&mut *worker, Worker::Lost) {
            Worker::Idle(target) => target,
            Worker::Running(handle) => {
                *worker = Worker::Running(handle);
                return Ok(());
            }
            Worker::Lost => return Err(NetworkError::WorkerLost(self.name.clone())),
        };

        let receiver = self.receiver.clone();
        let abort = Arc::clone(&self.abort);
        let on_exit = self.on_exit.clone();
        let span = tracing::debug_span!("worker", queue = %self.name);
        let handle = std::thread::Builder::new()
            .name(self.name.clone())
            .spawn(move || {
                let _entered = span.enter();
                run_worker(target, receiver, abort, on_exit)
            })?;

        *worker = Worker::Running(handle);
        self.running.store(true, Ordering::Release);
        Ok(())
    }

    /// Enqueue a command and return it. Never blocks on execution.
    ///
    /// Commands committed while the queue is stopped wait for the next `start()`.
    ///
    /// # Panics
    ///
    /// Panics if this command instance was committed before.
    pub fn commit<C>(&self, command: Arc<C>) -> Arc<C>
    where
        C: Command<T> + 'static,
    {
        self.commit_dyn(Arc::clone(&command) as Arc<dyn Command<T>>);
        command
    }

    /// Type-erased variant of [`commit`](Self::commit).
    pub fn commit_dyn(&self, command: Arc<dyn Command<T>>) {
        command.state().mark_committed();
        tracing::trace!(
            "Committed command {} '{}'",
            command.state().id(),
            command.state().title()
        );
        // The queue keeps its own receiver, so the channel never disconnects.
        let _ = self.sender.send(QueueMessage::Execute(command));
    }

    /// Stop the worker and wait for it to exit. Returns immediately if not running.
    ///
    /// With `graceful`, all commands queued before this call execute first.
    /// Without it, queued commands are dropped unhandled; their observers are
    /// never called.
    ///
    /// # Panics
    ///
    /// Panics when called from the worker thread. The worker keeps running.
    pub fn stop(&self, graceful: bool) {
        let mut worker = self.worker.lock();
        if worker.is_current_thread() {
            drop(worker);
            panic!("stop() called from the worker thread of '{}'", self.name);
        }
        let handle = match std::mem::replace(&mut *worker, Worker::Lost) {
            Worker::Running(handle) => handle,
            other => {
                *worker = other;
                return;
            }
        };

        if !graceful {
            self.abort.store(true, Ordering::Release);
        }
        let _ = self.sender.send(QueueMessage::Stop);

        match handle.join() {
            Ok(target) => *worker = Worker::Idle(target),
            Err(payload) => {
                self.running.store(false, Ordering::Release);
                tracing::error!("Worker thread of '{}' panicked", self.name);
                drop(worker);
                panic::resume_unwind(payload);
            }
        }
        self.running.store(false, Ordering::Release);

        if !graceful {
            let discarded = self
                .receiver
                .try_iter()
                .filter(|message| matches!(message, QueueMessage::Execute(_)))
                .count();
            if discarded > 0 {
                tracing::debug!("Discarded {} pending commands of '{}'", discarded, self.name);
            }
            self.abort.store(false, Ordering::Release);
        }
    }
}

impl<T: Send + 'static> Drop for CommandQueue<T> {
    fn drop(&mut self) {
        if self.worker.get_mut().is_current_thread() {
            // The worker exits once it sees the channel disconnect.
            tracing::warn!("Queue '{}' dropped on its own worker thread; detaching it", self.name);
            return;
        }
        self.stop(false);
    }
}

/// Worker loop: block until a message arrives, execute at most one command, repeat.
fn run_worker<T>(
    mut target: T,
    receiver: Receiver<QueueMessage<T>>,
    abort: Arc<AtomicBool>,
    on_exit: Option<ExitHook<T>>,
) -> T {
    tracing::info!("Command queue worker started");
    let mut executed: u64 = 0;

    while let Ok(message) = receiver.recv() {
        if abort.load(Ordering::Acquire) {
            break;
        }
        match message {
            QueueMessage::Stop => break,
            QueueMessage::Execute(command) => {
                execute(&mut target, command.as_ref());
                executed += 1;
            }
        }
    }

    if let Some(hook) = on_exit {
        if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| hook(&mut target))) {
            tracing::error!("Exit hook panicked: {}", NetworkError::from_panic(payload));
        }
    }
    tracing::info!("Command queue worker stopped after {} commands", executed);
    target
}

/// Run one command, converting errors and panics into its outcome.
fn execute<T>(target: &mut T, command: &dyn Command<T>) {
    let state = command.state();
    let _span = tracing::debug_span!("command", id = %state.id(), title = state.title()).entered();

    state.mark_busy();
    let result = panic::catch_unwind(AssertUnwindSafe(|| command.apply(target)))
        .unwrap_or_else(|payload| Err(NetworkError::from_panic(payload)));

    match &result {
        Ok(()) => tracing::debug!("Command {} '{}' succeeded", state.id(), state.title()),
        Err(e) => tracing::warn!("Command {} '{}' failed: {}", state.id(), state.title(), e),
    }
    state.handle(&result);
}
