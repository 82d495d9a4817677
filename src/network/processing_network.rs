//! The processing network: a graph of algorithms mutated through commands.
//!
//! Every operation builds a command, commits it to the network's queue and
//! returns it at once. The effect happens later, on the worker thread, in
//! commit order. Pass an observer, or poll the returned command's status, to
//! learn the outcome.
//!
//! ```ignore
//! let network = ProcessingNetwork::builder().reader(ply_reader).build();
//! network.start()?;
//!
//! network.add_algorithm(source.clone(), None);
//! network.add_algorithm(renderer.clone(), None);
//! network.connect_algorithms(&source, "Mesh", &renderer, "Mesh", None);
//! network.run_network(Some(observer));
//! ```

use crate::config::NetworkConfig;
use crate::error::NetworkResult;
use crate::network::algorithm::AlgorithmRef;
use crate::network::command::Command;
use crate::network::commands::{
    AddAlgorithm, ConnectAlgorithms, ConnectConnectors, ReadFile, RemoveAlgorithm, RunNetwork,
};
use crate::network::connection::Connection;
use crate::network::connector::Connector;
use crate::network::observer::ObserverRef;
use crate::network::queue::CommandQueue;
use crate::network::reader::ReaderRef;
use crate::network::state::{GraphStore, NetworkState};
use crate::network::topology::TopologySnapshot;
use crate::network::visualization::Visualization;
use std::path::PathBuf;
use std::sync::Arc;

pub struct ProcessingNetwork {
    config: NetworkConfig,
    graph: Arc<GraphStore>,
    queue: CommandQueue<NetworkState>,
}

impl ProcessingNetwork {
    /// A network with default configuration and no readers. Not started.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> ProcessingNetworkBuilder {
        ProcessingNetworkBuilder::default()
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    /// Start the worker thread. Does nothing if it is already running.
    pub fn start(&self) -> NetworkResult<()> {
        self.queue.start()
    }

    /// Stop the worker thread, see [`CommandQueue::stop`].
    ///
    /// Before the worker exits, every member algorithm's
    /// [`shutdown`](crate::network::Algorithm::shutdown) runs on it.
    pub fn stop(&self, graceful: bool) {
        self.queue.stop(graceful);
    }

    pub fn is_running(&self) -> bool {
        self.queue.is_running()
    }

    #[doc(hidden)]
    pub fn is_aborting(&self) -> bool {
        self.queue.is_aborting()
    }

    /// Commit an arbitrary command against the network state.
    pub fn commit<C>(&self, command: Arc<C>) -> Arc<C>
    where
        C: Command<NetworkState> + 'static,
    {
        self.queue.commit(command)
    }

    /// Load a file with the first registered reader that accepts it.
    pub fn load_file(&self, path: impl Into<PathBuf>, observer: Option<ObserverRef>) -> Arc<ReadFile> {
        self.commit(Arc::new(ReadFile::new(path, observer)))
    }

    pub fn add_algorithm(
        &self,
        algorithm: AlgorithmRef,
        observer: Option<ObserverRef>,
    ) -> Arc<AddAlgorithm> {
        self.commit(Arc::new(AddAlgorithm::new(algorithm, observer)))
    }

    pub fn remove_algorithm(
        &self,
        algorithm: AlgorithmRef,
        observer: Option<ObserverRef>,
    ) -> Arc<RemoveAlgorithm> {
        self.commit(Arc::new(RemoveAlgorithm::new(algorithm, observer)))
    }

    /// Connect output `from_name` of `from` to input `to_name` of `to`.
    ///
    /// Names are resolved when the command executes.
    pub fn connect_algorithms(
        &self,
        from: &AlgorithmRef,
        from_name: &str,
        to: &AlgorithmRef,
        to_name: &str,
        observer: Option<ObserverRef>,
    ) -> Arc<ConnectAlgorithms> {
        self.commit(Arc::new(ConnectAlgorithms::new(
            Arc::clone(from),
            from_name,
            Arc::clone(to),
            to_name,
            observer,
        )))
    }

    pub fn connect_connectors(
        &self,
        from: &Arc<Connector>,
        to: &Arc<Connector>,
        observer: Option<ObserverRef>,
    ) -> Arc<ConnectConnectors> {
        self.commit(Arc::new(ConnectConnectors::new(
            Arc::clone(from),
            Arc::clone(to),
            observer,
        )))
    }

    pub fn run_network(&self, observer: Option<ObserverRef>) -> Arc<RunNetwork> {
        self.commit(Arc::new(RunNetwork::new(observer)))
    }

    /// Visit a snapshot of the node set. The graph is not locked while visiting.
    pub fn visit_algorithms(&self, mut visitor: impl FnMut(&AlgorithmRef)) {
        for algorithm in &self.graph.algorithms() {
            visitor(algorithm);
        }
    }

    /// Visit the members that have a rendering capability.
    pub fn visit_visualizations(&self, mut visitor: impl FnMut(&dyn Visualization)) {
        self.visit_algorithms(|algorithm| {
            if let Some(visualization) = algorithm.as_visualization() {
                visitor(visualization);
            }
        });
    }

    /// Visit a snapshot of the edge set.
    pub fn visit_connections(&self, mut visitor: impl FnMut(&Arc<Connection>)) {
        for connection in &self.graph.connections() {
            visitor(connection);
        }
    }

    pub fn algorithms(&self) -> Vec<AlgorithmRef> {
        self.graph.algorithms()
    }

    pub fn connections(&self) -> Vec<Arc<Connection>> {
        self.graph.connections()
    }

    pub fn topology(&self) -> TopologySnapshot {
        TopologySnapshot::capture(&self.graph.algorithms(), &self.graph.connections())
    }
}

impl Default for ProcessingNetwork {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ProcessingNetwork {
    fn drop(&mut self) {
        if !self.queue.is_worker_thread() {
            self.queue.stop(self.config.graceful_shutdown_on_drop);
        }
    }
}

/// Builder for [`ProcessingNetwork`]. Readers are fixed once built.
#[derive(Default)]
pub struct ProcessingNetworkBuilder {
    config: NetworkConfig,
    readers: Vec<ReaderRef>,
}

impl ProcessingNetworkBuilder {
    pub fn config(mut self, config: NetworkConfig) -> Self {
        self.config = config;
        self
    }

    /// Register a reader. Readers are tried in registration order.
    pub fn reader(mut self, reader: ReaderRef) -> Self {
        self.readers.push(reader);
        self
    }

    pub fn readers(mut self, readers: impl IntoIterator<Item = ReaderRef>) -> Self {
        self.readers.extend(readers);
        self
    }

    pub fn build(self) -> ProcessingNetwork {
        let graph = Arc::new(GraphStore::default());
        let state = NetworkState::new(Arc::clone(&graph), self.readers);
        tracing::debug!("Building network '{}'", self.config.worker_name);
        ProcessingNetwork {
            queue: CommandQueue::with_exit_hook(
                self.config.worker_name.clone(),
                state,
                NetworkState::shutdown_algorithms,
            ),
            graph,
            config: self.config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::command::{CommandStatus, FnCommand};

    #[test]
    fn test_builder_uses_config() {
        let network = ProcessingNetwork::builder()
            .config(NetworkConfig::default().with_worker_name("unit-net"))
            .build();
        assert_eq!(network.config().worker_name, "unit-net");
        assert!(!network.is_running());
    }

    #[test]
    fn test_commit_custom_command() {
        let network = ProcessingNetwork::new();
        network.start().unwrap();
        let command = network.commit(Arc::new(FnCommand::new(
            "count",
            None,
            |state: &mut NetworkState| -> NetworkResult<()> {
                assert!(state.algorithms().is_empty());
                assert!(state.readers().is_empty());
                Ok(())
            },
        )));
        network.stop(true);
        assert_eq!(command.state().status(), CommandStatus::Succeeded);
    }

    #[test]
    fn test_drop_drains_by_default() {
        let network = ProcessingNetwork::new();
        network.start().unwrap();
        let run = network.run_network(None);
        drop(network);
        assert!(run.state().is_success());
    }
}
