//! Error handling for the processing network
//!
//! This module defines the error type reported to command observers and a
//! Result alias used throughout the crate. Collaborators (algorithms,
//! readers) return `anyhow::Result` and get wrapped here.

use crate::network::connector::ConnectorDirection;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for processing network operations
#[derive(Error, Debug)]
pub enum NetworkError {
    /// A connector name did not resolve on its algorithm
    #[error("Algorithm '{algorithm}' has no {direction} connector named '{connector}'")]
    UnknownConnector {
        algorithm: String,
        connector: String,
        direction: ConnectorDirection,
    },

    /// Source is not an output or target is not an input
    #[error("Cannot connect '{from}' to '{to}': source must be an output and target an input")]
    DirectionMismatch { from: String, to: String },

    /// Payload types of the two connectors differ
    #[error("Cannot connect '{from}' ({from_type}) to '{to}' ({to_type}): payload types differ")]
    TypeMismatch {
        from: String,
        from_type: &'static str,
        to: String,
        to_type: &'static str,
    },

    /// No registered reader accepts the file
    #[error("No reader can load {}", .0.display())]
    NoReader(PathBuf),

    /// A reader failed while loading
    #[error("Reader '{reader}' failed: {source}")]
    Reader {
        reader: String,
        #[source]
        source: anyhow::Error,
    },

    /// An algorithm's processing step failed
    #[error("Algorithm '{name}' failed: {source}")]
    Algorithm {
        name: String,
        #[source]
        source: anyhow::Error,
    },

    /// A command panicked while executing on the worker thread
    #[error("Command panicked: {0}")]
    Panicked(String),

    /// The worker thread died outside of command execution
    #[error("Worker thread of '{0}' was lost")]
    WorkerLost(String),

    /// Errors related to configuration loading/saving
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<NetworkError>,
    },
}

impl NetworkError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        NetworkError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Build a [`NetworkError::Panicked`] from a caught panic payload
    pub fn from_panic(payload: Box<dyn std::any::Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic payload".to_string()
        };
        NetworkError::Panicked(message)
    }
}

/// Result type alias for processing network operations
pub type NetworkResult<T> = std::result::Result<T, NetworkError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> NetworkResult<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> NetworkResult<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for NetworkResult<T> {
    fn context(self, context: impl Into<String>) -> NetworkResult<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_context<F>(self, f: F) -> NetworkResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.with_context(f()))
    }
}
