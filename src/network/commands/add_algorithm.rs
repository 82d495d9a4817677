use crate::error::NetworkResult;
use crate::network::algorithm::AlgorithmRef;
use crate::network::command::{Command, CommandState};
use crate::network::observer::ObserverRef;
use crate::network::state::NetworkState;
use std::sync::Arc;

/// Add an algorithm to the node set. Adding a member again succeeds without effect.
pub struct AddAlgorithm {
    state: CommandState,
    algorithm: AlgorithmRef,
}

impl AddAlgorithm {
    pub fn new(algorithm: AlgorithmRef, observer: Option<ObserverRef>) -> Self {
        let description = format!("Adding algorithm '{}' to the network", algorithm.name());
        Self {
            state: CommandState::new("Add Algorithm", description, observer),
            algorithm,
        }
    }

    pub fn algorithm(&self) -> &AlgorithmRef {
        &self.algorithm
    }
}

impl Command<NetworkState> for AddAlgorithm {
    fn state(&self) -> &CommandState {
        &self.state
    }

    fn apply(&self, target: &mut NetworkState) -> NetworkResult<()> {
        if !target.add_network_node(Arc::clone(&self.algorithm)) {
            tracing::debug!("Algorithm '{}' is already in the network", self.algorithm.name());
        }
        Ok(())
    }
}
