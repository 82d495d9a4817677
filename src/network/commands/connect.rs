use crate::error::NetworkResult;
use crate::network::algorithm::AlgorithmRef;
use crate::network::command::{Command, CommandState};
use crate::network::connection::Connection;
use crate::network::connector::Connector;
use crate::network::observer::ObserverRef;
use crate::network::state::NetworkState;
use std::sync::Arc;

/// Connect an output of one algorithm to an input of another, by name.
///
/// Neither algorithm has to be in the node set. Fails without touching the
/// edge set if a name does not resolve or the connectors are incompatible.
pub struct ConnectAlgorithms {
    state: CommandState,
    from: AlgorithmRef,
    from_name: String,
    to: AlgorithmRef,
    to_name: String,
}

impl ConnectAlgorithms {
    pub fn new(
        from: AlgorithmRef,
        from_name: impl Into<String>,
        to: AlgorithmRef,
        to_name: impl Into<String>,
        observer: Option<ObserverRef>,
    ) -> Self {
        let from_name = from_name.into();
        let to_name = to_name.into();
        let description = format!(
            "Connecting {}:{} to {}:{}",
            from.name(),
            from_name,
            to.name(),
            to_name
        );
        Self {
            state: CommandState::new("Connect Algorithms", description, observer),
            from,
            from_name,
            to,
            to_name,
        }
    }

    pub fn from(&self) -> &AlgorithmRef {
        &self.from
    }

    pub fn from_name(&self) -> &str {
        &self.from_name
    }

    pub fn to(&self) -> &AlgorithmRef {
        &self.to
    }

    pub fn to_name(&self) -> &str {
        &self.to_name
    }
}

impl Command<NetworkState> for ConnectAlgorithms {
    fn state(&self) -> &CommandState {
        &self.state
    }

    fn apply(&self, target: &mut NetworkState) -> NetworkResult<()> {
        let connection = Connection::between(&self.from, &self.from_name, &self.to, &self.to_name)?;
        target.add_network_node_edge(connection);
        Ok(())
    }
}

/// Connect two connectors directly.
pub struct ConnectConnectors {
    state: CommandState,
    from: Arc<Connector>,
    to: Arc<Connector>,
}

impl ConnectConnectors {
    pub fn new(from: Arc<Connector>, to: Arc<Connector>, observer: Option<ObserverRef>) -> Self {
        let description = format!("Connecting {} to {}", from.name(), to.name());
        Self {
            state: CommandState::new("Connect Connectors", description, observer),
            from,
            to,
        }
    }
}

impl Command<NetworkState> for ConnectConnectors {
    fn state(&self) -> &CommandState {
        &self.state
    }

    fn apply(&self, target: &mut NetworkState) -> NetworkResult<()> {
        let connection = Connection::new(Arc::clone(&self.from), Arc::clone(&self.to))?;
        target.add_network_node_edge(connection);
        Ok(())
    }
}
