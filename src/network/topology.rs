//! Serializable snapshot of a network's graph.

use crate::error::{NetworkError, NetworkResult};
use crate::network::algorithm::AlgorithmRef;
use crate::network::connection::Connection;
use crate::network::connector::ConnectorDescriptor;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Snapshot of a single algorithm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlgorithmSnapshot {
    pub name: String,
    pub description: String,
    pub is_visualization: bool,
    pub connectors: Vec<ConnectorDescriptor>,
}

/// Snapshot of a single connection. Algorithm names are `None` for
/// connections made directly between connectors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionSnapshot {
    pub from_algorithm: Option<String>,
    pub from_connector: String,
    pub to_algorithm: Option<String>,
    pub to_connector: String,
    pub payload_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologySnapshot {
    pub algorithms: Vec<AlgorithmSnapshot>,
    pub connections: Vec<ConnectionSnapshot>,
}

impl TopologySnapshot {
    pub fn capture(algorithms: &[AlgorithmRef], connections: &[Arc<Connection>]) -> Self {
        let algorithms = algorithms
            .iter()
            .map(|a| AlgorithmSnapshot {
                name: a.name().to_string(),
                description: a.description().to_string(),
                is_visualization: a.as_visualization().is_some(),
                connectors: a.connectors().descriptors(),
            })
            .collect();

        let connections = connections
            .iter()
            .map(|c| ConnectionSnapshot {
                from_algorithm: c.from_algorithm().map(|a| a.name().to_string()),
                from_connector: c.from().name().to_string(),
                to_algorithm: c.to_algorithm().map(|a| a.name().to_string()),
                to_connector: c.to().name().to_string(),
                payload_type: c.from().payload_type().name().to_string(),
            })
            .collect();

        Self {
            algorithms,
            connections,
        }
    }

    pub fn to_json(&self) -> NetworkResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| NetworkError::Serialization(format!("Failed to serialize topology: {}", e)))
    }

    pub fn from_json(json: &str) -> NetworkResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| NetworkError::Serialization(format!("Failed to parse topology: {}", e)))
    }
}
