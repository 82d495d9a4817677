//! Connections: the edges of the processing graph.
//!
//! A connection binds one output connector to one input connector. It is
//! validated on construction and never changes afterwards. The algorithms on
//! either side do not need to be members of the network, which lets callers
//! break data out of the graph for inspection.

use crate::error::NetworkResult;
use crate::network::algorithm::{resolve_connector, same_algorithm, AlgorithmRef};
use crate::network::connector::{Connector, ConnectorDirection};
use std::fmt;
use std::sync::Arc;

pub struct Connection {
    from: Arc<Connector>,
    to: Arc<Connector>,
    from_algorithm: Option<AlgorithmRef>,
    to_algorithm: Option<AlgorithmRef>,
}

impl Connection {
    /// Connect two connectors directly.
    pub fn new(from: Arc<Connector>, to: Arc<Connector>) -> NetworkResult<Self> {
        to.accepts(&from)?;
        Ok(Self {
            from,
            to,
            from_algorithm: None,
            to_algorithm: None,
        })
    }

    /// Connect `from.from_name` (an output) to `to.to_name` (an input).
    pub fn between(
        from: &AlgorithmRef,
        from_name: &str,
        to: &AlgorithmRef,
        to_name: &str,
    ) -> NetworkResult<Self> {
        let from_connector = resolve_connector(from.as_ref(), from_name, ConnectorDirection::Output)?;
        let to_connector = resolve_connector(to.as_ref(), to_name, ConnectorDirection::Input)?;
        let mut connection = Self::new(from_connector, to_connector)?;
        connection.from_algorithm = Some(Arc::clone(from));
        connection.to_algorithm = Some(Arc::clone(to));
        Ok(connection)
    }

    pub fn from(&self) -> &Arc<Connector> {
        &self.from
    }

    pub fn to(&self) -> &Arc<Connector> {
        &self.to
    }

    pub fn from_algorithm(&self) -> Option<&AlgorithmRef> {
        self.from_algorithm.as_ref()
    }

    pub fn to_algorithm(&self) -> Option<&AlgorithmRef> {
        self.to_algorithm.as_ref()
    }

    /// True if both connections bind the same output to the same input.
    pub fn same_endpoints(&self, other: &Connection) -> bool {
        Arc::ptr_eq(&self.from, &other.from) && Arc::ptr_eq(&self.to, &other.to)
    }

    /// True if this connection touches `algorithm` on either side.
    pub fn involves(&self, algorithm: &AlgorithmRef) -> bool {
        self.from_algorithm
            .iter()
            .chain(self.to_algorithm.iter())
            .any(|a| same_algorithm(a, algorithm))
    }

    /// Bind the input to the output. Returns the input's previous upstream.
    pub(crate) fn establish(&self) -> Option<Arc<Connector>> {
        self.to.bind(Arc::clone(&self.from))
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = |algo: &Option<AlgorithmRef>, connector: &Connector| match algo {
            Some(a) => format!("{}:{}", a.name(), connector.name()),
            None => connector.name().to_string(),
        };
        write!(
            f,
            "Connection({} -> {})",
            side(&self.from_algorithm, &self.from),
            side(&self.to_algorithm, &self.to)
        )
    }
}
