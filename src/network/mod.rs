//! Processing network core.
//!
//! The network is a directed multigraph of [`Algorithm`]s joined by
//! [`Connection`]s between their [`Connector`]s. It is mutated only through
//! [`Command`]s executed serially by one worker thread per network:
//!
//! ```text
//! caller threads                         worker thread
//! ──────────────                         ─────────────
//! load_file / add_algorithm ──commit──►  CommandQueue ──► Command::apply(&mut NetworkState)
//! connect_* / run_network                                    │
//!        ▲                                                   ▼
//!        └────────── returned command ◄─── status + CommandObserver callback
//!
//! visit_algorithms / topology ◄── snapshot copy of node and edge sets
//! ```
//!
//! Rendering threads never touch the graph. They pull data from connectors
//! and react to each visualization's [`RenderRequest`].

pub mod algorithm;
pub mod command;
pub mod commands;
pub mod connection;
pub mod connector;
pub mod observer;
pub mod processing_network;
pub mod queue;
pub mod reader;
pub mod state;
pub mod topology;
pub mod visualization;

pub use algorithm::{same_algorithm, Algorithm, AlgorithmRef};
pub use command::{Command, CommandId, CommandState, CommandStatus, FnCommand};
pub use connection::Connection;
pub use connector::{
    Connector, ConnectorDescriptor, ConnectorDirection, ConnectorSet, Input, Output, Payload,
    PayloadType,
};
pub use observer::{CallbackObserver, CommandObserver, ObserverRef};
pub use processing_network::{ProcessingNetwork, ProcessingNetworkBuilder};
pub use queue::CommandQueue;
pub use reader::{has_extension, Reader, ReaderRef};
pub use state::NetworkState;
pub use topology::{AlgorithmSnapshot, ConnectionSnapshot, TopologySnapshot};
pub use visualization::{RenderRequest, Visualization};
