//! Configuration module for the processing network
//!
//! A [`NetworkConfig`] controls how a network names its worker thread, how it
//! shuts down when dropped, and the default log filter. Every field has a
//! default, so a partial TOML file is valid.
//!
//! # Example
//!
//! ```ignore
//! use processing_network::config::NetworkConfig;
//!
//! let config = NetworkConfig::load_or_default("network.toml");
//! let network = ProcessingNetwork::builder().config(config).build();
//! ```

use crate::error::{NetworkError, NetworkResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default worker thread name
pub const DEFAULT_WORKER_NAME: &str = "processing-network";

/// Default `EnvFilter` directive used when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "info,processing_network=debug";

/// Settings of one processing network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Name of the worker thread, also used in log spans
    pub worker_name: String,

    /// Drain pending commands when the network is dropped.
    /// When false, pending commands are abandoned.
    pub graceful_shutdown_on_drop: bool,

    /// Log filter for [`crate::logging::init_logging`]
    pub log_filter: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            worker_name: DEFAULT_WORKER_NAME.to_string(),
            graceful_shutdown_on_drop: true,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl NetworkConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(content: &str) -> NetworkResult<Self> {
        toml::from_str(content)
            .map_err(|e| NetworkError::Config(format!("Failed to parse network config: {}", e)))
    }

    /// Load a configuration file
    pub fn load(path: impl AsRef<Path>) -> NetworkResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            NetworkError::Config(format!("Failed to read network config {:?}: {}", path, e))
        })?;

        Self::from_toml_str(&content)
    }

    /// Load a configuration file, returning defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load network config, using defaults: {}", e);
            Self::default()
        })
    }

    /// Save the configuration as TOML
    pub fn save(&self, path: impl AsRef<Path>) -> NetworkResult<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                NetworkError::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| NetworkError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content).map_err(|e| {
            NetworkError::Config(format!("Failed to write network config {:?}: {}", path, e))
        })
    }

    pub fn with_worker_name(mut self, name: impl Into<String>) -> Self {
        self.worker_name = name.into();
        self
    }

    pub fn with_graceful_shutdown_on_drop(mut self, graceful: bool) -> Self {
        self.graceful_shutdown_on_drop = graceful;
        self
    }
}
