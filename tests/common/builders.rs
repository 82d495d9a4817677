//! Builders for networks used in tests

use processing_network::config::NetworkConfig;
use processing_network::network::{ProcessingNetwork, ReaderRef};

/// Builder for started test networks
pub struct TestNetworkBuilder {
    worker_name: String,
    graceful: bool,
    readers: Vec<ReaderRef>,
}

impl TestNetworkBuilder {
    pub fn new(worker_name: &str) -> Self {
        Self {
            worker_name: worker_name.to_string(),
            graceful: true,
            readers: Vec::new(),
        }
    }

    pub fn reader(mut self, reader: ReaderRef) -> Self {
        self.readers.push(reader);
        self
    }

    pub fn abandon_on_drop(mut self) -> Self {
        self.graceful = false;
        self
    }

    /// Build and start the network.
    pub fn start(self) -> ProcessingNetwork {
        let config = NetworkConfig::default()
            .with_worker_name(self.worker_name)
            .with_graceful_shutdown_on_drop(self.graceful);
        let network = ProcessingNetwork::builder()
            .config(config)
            .readers(self.readers)
            .build();
        network.start().expect("failed to start network");
        network
    }
}

/// A started network with default settings and no readers
pub fn started_network() -> ProcessingNetwork {
    TestNetworkBuilder::new("test-network").start()
}
