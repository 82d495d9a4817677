use crate::error::{NetworkError, NetworkResult};
use crate::network::command::{Command, CommandState};
use crate::network::connector::Payload;
use crate::network::observer::ObserverRef;
use crate::network::state::NetworkState;
use parking_lot::Mutex;
use std::any::Any;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Load a file with the first registered reader that accepts it.
///
/// The loaded data stays on the command. Feed it into the graph with a
/// [`DataInject`](crate::algorithms::DataInject) algorithm.
pub struct ReadFile {
    state: CommandState,
    path: PathBuf,
    loaded: Mutex<Option<Loaded>>,
}

struct Loaded {
    reader: String,
    data: Payload,
}

impl ReadFile {
    pub fn new(path: impl Into<PathBuf>, observer: Option<ObserverRef>) -> Self {
        let path = path.into();
        let description = format!("Loading file {}", path.display());
        Self {
            state: CommandState::new("Load File", description, observer),
            path,
            loaded: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The loaded data. `None` until the command succeeded.
    pub fn result(&self) -> Option<Payload> {
        self.loaded.lock().as_ref().map(|l| Arc::clone(&l.data))
    }

    /// The loaded data, if it is a `T`.
    pub fn result_as<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.result()?.downcast::<T>().ok()
    }

    /// Name of the reader that loaded the file.
    pub fn reader_name(&self) -> Option<String> {
        self.loaded.lock().as_ref().map(|l| l.reader.clone())
    }
}

impl Command<NetworkState> for ReadFile {
    fn state(&self) -> &CommandState {
        &self.state
    }

    fn apply(&self, target: &mut NetworkState) -> NetworkResult<()> {
        let reader = target
            .find_reader(&self.path)
            .ok_or_else(|| NetworkError::NoReader(self.path.clone()))?;

        tracing::info!("Loading {} with reader '{}'", self.path.display(), reader.name());
        let data = reader.load(&self.path).map_err(|source| NetworkError::Reader {
            reader: reader.name().to_string(),
            source,
        })?;

        *self.loaded.lock() = Some(Loaded {
            reader: reader.name().to_string(),
            data,
        });
        Ok(())
    }
}
