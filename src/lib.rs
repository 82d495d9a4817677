//! # Processing Network: asynchronous dataflow engine
//!
//! The engine behind an interactive visualization application. Algorithms
//! (data loaders, filters, renderers) are connected into a directed
//! multigraph that is mutated and re-executed on a dedicated worker thread,
//! while a separate presentation layer renders the results.
//!
//! ## Architecture
//!
//! - **Commands**: every graph mutation or query is a single-use command,
//!   committed from any thread and executed serially by the worker
//! - **Observers**: callers learn about success or failure through a
//!   callback invoked on the worker thread
//! - **Graph**: algorithms with named, typed connectors joined by validated
//!   connections; readers see only snapshot copies
//! - **Communication**: Crossbeam channels between callers and the worker
//!
//! ## Example
//!
//! ```ignore
//! use processing_network::{
//!     algorithms::DataInject, config::NetworkConfig, logging::init_logging,
//!     network::{AlgorithmRef, CallbackObserver, ProcessingNetwork},
//! };
//! use std::sync::Arc;
//!
//! let config = NetworkConfig::load_or_default("network.toml");
//! init_logging(&config.log_filter);
//!
//! let network = ProcessingNetwork::builder().config(config).reader(mesh_reader).build();
//! network.start()?;
//!
//! let source: AlgorithmRef = Arc::new(DataInject::<Mesh>::new("Mesh"));
//! network.add_algorithm(source.clone(), None);
//! network.add_algorithm(renderer.clone(), None);
//! network.connect_algorithms(&source, "Data", &renderer, "Mesh", None);
//! network.run_network(Some(CallbackObserver::shared(|cmd, err| {
//!     if let Some(err) = err {
//!         eprintln!("{} failed: {err}", cmd.title());
//!     }
//! })));
//! ```

pub mod algorithms;
pub mod config;
pub mod error;
pub mod logging;
pub mod network;
pub mod types;

// Re-export commonly used types
pub use config::NetworkConfig;
pub use error::{NetworkError, NetworkResult, ResultExt};
pub use network::{
    Algorithm, AlgorithmRef, Command, CommandObserver, CommandQueue, CommandStatus, Connection,
    ProcessingNetwork, Reader, Visualization,
};
pub use types::{BoundingBox, View};
