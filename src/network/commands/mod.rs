//! The commands behind the [`ProcessingNetwork`] operations.
//!
//! Each operation constructs one of these, commits it and hands it back to
//! the caller. Arguments are captured at construction; validation happens in
//! `apply`, on the worker thread, against the graph as it is then.
//!
//! [`ProcessingNetwork`]: crate::network::ProcessingNetwork

mod add_algorithm;
mod connect;
mod read_file;
mod remove_algorithm;
mod run_network;

pub use add_algorithm::AddAlgorithm;
pub use connect::{ConnectAlgorithms, ConnectConnectors};
pub use read_file::ReadFile;
pub use remove_algorithm::RemoveAlgorithm;
pub use run_network::RunNetwork;
