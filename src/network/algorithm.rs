//! Algorithm abstraction for the network.
//!
//! An algorithm is a node of the processing graph. It declares its connectors
//! once, at construction, and implements `process()`, which reads its inputs
//! and writes its outputs. Algorithms are shared (`Arc`): the network's node
//! set is one holder, connections and application code may hold others.

use crate::network::connector::{Connector, ConnectorDirection, ConnectorSet};
use crate::network::visualization::Visualization;
use std::sync::Arc;

/// Shared handle to an algorithm.
pub type AlgorithmRef = Arc<dyn Algorithm>;

/// A unit of computation with fixed, named input and output connectors.
///
/// `process()` may be called any number of times. It must only touch the
/// algorithm's own state and connector values, never the graph structure.
/// Since algorithms are shared between threads, mutable state lives behind
/// interior mutability.
pub trait Algorithm: Send + Sync {
    /// Human-readable name of this algorithm.
    fn name(&self) -> &str;

    fn description(&self) -> &str {
        ""
    }

    /// The connectors declared at construction.
    fn connectors(&self) -> &ConnectorSet;

    /// Read inputs, compute, write outputs. Runs on the network's worker thread.
    fn process(&self) -> anyhow::Result<()>;

    /// Called on the worker thread when the network stops.
    fn shutdown(&self) -> anyhow::Result<()> {
        Ok(())
    }

    /// The rendering capability of this algorithm, if it has one.
    fn as_visualization(&self) -> Option<&dyn Visualization> {
        None
    }

    fn input(&self, name: &str) -> Option<&Arc<Connector>> {
        self.connectors().input(name)
    }

    fn output(&self, name: &str) -> Option<&Arc<Connector>> {
        self.connectors().output(name)
    }
}

/// Identity comparison of two algorithm handles.
#[inline]
pub fn same_algorithm(a: &AlgorithmRef, b: &AlgorithmRef) -> bool {
    // Compare data pointers only; vtable pointers may differ across codegen units.
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

/// Look up a connector by name and direction, reporting which side was missing.
pub(crate) fn resolve_connector(
    algorithm: &dyn Algorithm,
    name: &str,
    direction: ConnectorDirection,
) -> crate::error::NetworkResult<Arc<Connector>> {
    algorithm
        .connectors()
        .find(name, direction)
        .cloned()
        .ok_or_else(|| crate::error::NetworkError::UnknownConnector {
            algorithm: algorithm.name().to_string(),
            connector: name.to_string(),
            direction,
        })
}
