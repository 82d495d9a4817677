//! Graph state owned by a network's worker thread.
//!
//! The node and edge sets live in a [`GraphStore`] shared with the network
//! handle. Only [`NetworkState`] mutates them, and only the command queue's
//! worker ever holds a `&mut NetworkState`. Other threads read through
//! snapshot copies taken under a short lock.

use crate::error::{NetworkError, NetworkResult};
use crate::network::algorithm::{same_algorithm, AlgorithmRef};
use crate::network::connection::Connection;
use crate::network::reader::ReaderRef;
use parking_lot::Mutex;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::Arc;

/// Node set and edge set, in insertion order.
#[derive(Default)]
pub(crate) struct GraphStore {
    algorithms: Mutex<Vec<AlgorithmRef>>,
    connections: Mutex<Vec<Arc<Connection>>>,
}

impl GraphStore {
    pub(crate) fn algorithms(&self) -> Vec<AlgorithmRef> {
        self.algorithms.lock().clone()
    }

    pub(crate) fn connections(&self) -> Vec<Arc<Connection>> {
        self.connections.lock().clone()
    }
}

/// Target of every network command.
///
/// Custom commands committed through
/// [`ProcessingNetwork::commit`](crate::network::ProcessingNetwork::commit)
/// receive it on the worker thread.
pub struct NetworkState {
    graph: Arc<GraphStore>,
    readers: Vec<ReaderRef>,
}

impl NetworkState {
    pub(crate) fn new(graph: Arc<GraphStore>, readers: Vec<ReaderRef>) -> Self {
        Self { graph, readers }
    }

    /// Copy of the node set.
    pub fn algorithms(&self) -> Vec<AlgorithmRef> {
        self.graph.algorithms()
    }

    /// Copy of the edge set.
    pub fn connections(&self) -> Vec<Arc<Connection>> {
        self.graph.connections()
    }

    pub fn contains_algorithm(&self, algorithm: &AlgorithmRef) -> bool {
        self.graph
            .algorithms
            .lock()
            .iter()
            .any(|a| same_algorithm(a, algorithm))
    }

    pub fn readers(&self) -> &[ReaderRef] {
        &self.readers
    }

    /// First reader, in registration order, that accepts `path`.
    pub fn find_reader(&self, path: &Path) -> Option<&ReaderRef> {
        self.readers.iter().find(|r| r.can_load(path))
    }

    /// Insert into the node set. Returns false if it was already a member.
    pub fn add_network_node(&mut self, algorithm: AlgorithmRef) -> bool {
        let mut algorithms = self.graph.algorithms.lock();
        if algorithms.iter().any(|a| same_algorithm(a, &algorithm)) {
            return false;
        }
        tracing::debug!("Adding algorithm '{}'", algorithm.name());
        algorithms.push(algorithm);
        true
    }

    /// Remove from the node set. Edges touching the algorithm stay.
    pub fn remove_network_node(&mut self, algorithm: &AlgorithmRef) -> bool {
        let mut algorithms = self.graph.algorithms.lock();
        let before = algorithms.len();
        algorithms.retain(|a| !same_algorithm(a, algorithm));
        let removed = algorithms.len() != before;
        if removed {
            tracing::debug!("Removed algorithm '{}'", algorithm.name());
        }
        removed
    }

    /// Bind the connection and insert it into the edge set.
    ///
    /// Returns false if an edge with the same endpoints already exists. When
    /// the input was bound to another output, that edge is replaced.
    pub fn add_network_node_edge(&mut self, connection: Connection) -> bool {
        let mut connections = self.graph.connections.lock();
        if connections.iter().any(|c| c.same_endpoints(&connection)) {
            return false;
        }

        if connection.establish().is_some() {
            connections.retain(|c| !Arc::ptr_eq(c.to(), connection.to()));
        }
        tracing::debug!("Adding {:?}", connection);
        connections.push(Arc::new(connection));
        true
    }

    /// Run `process` on every member, in insertion order.
    ///
    /// Stops at the first failing algorithm. No dependency ordering is
    /// applied; callers add algorithms upstream first.
    pub fn run_network_impl(&mut self) -> NetworkResult<()> {
        let algorithms = self.graph.algorithms();
        tracing::debug!("Running {} algorithms", algorithms.len());

        for algorithm in &algorithms {
            let _span = tracing::trace_span!("process", algorithm = algorithm.name()).entered();
            algorithm
                .process()
                .map_err(|source| NetworkError::Algorithm {
                    name: algorithm.name().to_string(),
                    source,
                })?;
        }
        Ok(())
    }

    /// Tell every member that the network is stopping.
    ///
    /// Failures are logged; every member is informed regardless.
    pub fn shutdown_algorithms(&mut self) {
        let algorithms = self.graph.algorithms();
        tracing::debug!("Shutting down {} algorithms", algorithms.len());

        for algorithm in &algorithms {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| algorithm.shutdown()))
                .unwrap_or_else(|payload| Err(anyhow::anyhow!(NetworkError::from_panic(payload))));
            if let Err(e) = outcome {
                tracing::warn!("Algorithm '{}' failed to shut down: {}", algorithm.name(), e);
            }
        }
    }
}
