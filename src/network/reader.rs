//! File readers registered with a network.

use crate::network::connector::Payload;
use std::path::Path;
use std::sync::Arc;

/// Loads a file into a data payload.
///
/// The network asks its readers in registration order and uses the first one
/// whose `can_load` returns true. Loading runs on the worker thread.
#[cfg_attr(test, mockall::automock)]
pub trait Reader: Send + Sync {
    fn name(&self) -> &str;

    /// Cheap check, usually by extension. Must not read the whole file.
    fn can_load(&self, path: &Path) -> bool;

    fn load(&self, path: &Path) -> anyhow::Result<Payload>;
}

pub type ReaderRef = Arc<dyn Reader>;

/// Does `path` end in one of `extensions`? Comparison ignores ASCII case.
pub fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}
