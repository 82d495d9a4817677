use crate::error::NetworkResult;
use crate::network::command::{Command, CommandState};
use crate::network::observer::ObserverRef;
use crate::network::state::NetworkState;

/// Re-run every algorithm in the network.
///
/// This is a whole-graph pass in insertion order. It does not look at which
/// inputs changed; a dependency-aware scheduler would replace it.
pub struct RunNetwork {
    state: CommandState,
}

impl RunNetwork {
    pub fn new(observer: Option<ObserverRef>) -> Self {
        Self {
            state: CommandState::new("Run Network", "Processing all algorithms", observer),
        }
    }
}

impl Command<NetworkState> for RunNetwork {
    fn state(&self) -> &CommandState {
        &self.state
    }

    fn apply(&self, target: &mut NetworkState) -> NetworkResult<()> {
        target.run_network_impl()
    }
}
