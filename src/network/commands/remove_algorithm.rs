use crate::error::NetworkResult;
use crate::network::algorithm::AlgorithmRef;
use crate::network::command::{Command, CommandState};
use crate::network::observer::ObserverRef;
use crate::network::state::NetworkState;

/// Remove an algorithm from the node set.
///
/// Removing a non-member succeeds. Connections touching the algorithm are
/// kept, so its outputs keep feeding bound inputs.
pub struct RemoveAlgorithm {
    state: CommandState,
    algorithm: AlgorithmRef,
}

impl RemoveAlgorithm {
    pub fn new(algorithm: AlgorithmRef, observer: Option<ObserverRef>) -> Self {
        let description = format!("Removing algorithm '{}' from the network", algorithm.name());
        Self {
            state: CommandState::new("Remove Algorithm", description, observer),
            algorithm,
        }
    }

    pub fn algorithm(&self) -> &AlgorithmRef {
        &self.algorithm
    }
}

impl Command<NetworkState> for RemoveAlgorithm {
    fn state(&self) -> &CommandState {
        &self.state
    }

    fn apply(&self, target: &mut NetworkState) -> NetworkResult<()> {
        target.remove_network_node(&self.algorithm);
        Ok(())
    }
}
