//! Connectors: the named, typed endpoints of an algorithm.
//!
//! Every algorithm declares its connectors once, at construction, through a
//! [`ConnectorSet`]. Commands address connectors by name, so a connection can
//! be queued before the target algorithm is part of the network.
//!
//! Outputs store the most recently produced value. Inputs store a reference to
//! the upstream output they are bound to and read through it, so a consumer
//! always sees the producer's latest value.

use crate::error::{NetworkError, NetworkResult};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::any::{Any, TypeId};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// Type-erased value flowing through connectors.
pub type Payload = Arc<dyn Any + Send + Sync>;

/// Whether a connector is an input or output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConnectorDirection {
    Input,
    Output,
}

impl fmt::Display for ConnectorDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectorDirection::Input => write!(f, "input"),
            ConnectorDirection::Output => write!(f, "output"),
        }
    }
}

/// Payload type tag. Two connectors can only be connected if their tags match.
#[derive(Clone, Copy)]
pub struct PayloadType {
    id: TypeId,
    name: &'static str,
}

impl PayloadType {
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Rust type name, for diagnostics only.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for PayloadType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for PayloadType {}

impl fmt::Debug for PayloadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PayloadType({})", self.name)
    }
}

/// Serializable description of a connector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectorDescriptor {
    pub name: String,
    pub description: String,
    pub direction: ConnectorDirection,
    pub payload_type: String,
}

/// An untyped connector. Typed access goes through [`Input`] and [`Output`].
pub struct Connector {
    name: String,
    description: String,
    direction: ConnectorDirection,
    payload: PayloadType,
    /// Last produced value. Only used by outputs.
    data: RwLock<Option<Payload>>,
    /// Bound upstream output. Only used by inputs.
    upstream: RwLock<Option<Arc<Connector>>>,
}

impl Connector {
    fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        direction: ConnectorDirection,
        payload: PayloadType,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            direction,
            payload,
            data: RwLock::new(None),
            upstream: RwLock::new(None),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn direction(&self) -> ConnectorDirection {
        self.direction
    }

    pub fn payload_type(&self) -> PayloadType {
        self.payload
    }

    pub fn is_input(&self) -> bool {
        self.direction == ConnectorDirection::Input
    }

    pub fn is_output(&self) -> bool {
        self.direction == ConnectorDirection::Output
    }

    /// Current value: the stored value for outputs, the upstream's value for inputs.
    pub fn data(&self) -> Option<Payload> {
        match self.direction {
            ConnectorDirection::Output => self.data.read().clone(),
            ConnectorDirection::Input => self.upstream.read().as_ref().and_then(|up| up.data()),
        }
    }

    /// The output this input is bound to, if any.
    pub fn upstream(&self) -> Option<Arc<Connector>> {
        self.upstream.read().clone()
    }

    pub fn descriptor(&self) -> ConnectorDescriptor {
        ConnectorDescriptor {
            name: self.name.clone(),
            description: self.description.clone(),
            direction: self.direction,
            payload_type: self.payload.name().to_string(),
        }
    }

    /// Check that `from` may feed this connector.
    pub fn accepts(&self, from: &Connector) -> NetworkResult<()> {
        if !from.is_output() || !self.is_input() {
            return Err(NetworkError::DirectionMismatch {
                from: from.name.clone(),
                to: self.name.clone(),
            });
        }
        if from.payload != self.payload {
            return Err(NetworkError::TypeMismatch {
                from: from.name.clone(),
                from_type: from.payload.name(),
                to: self.name.clone(),
                to_type: self.payload.name(),
            });
        }
        Ok(())
    }

    pub(crate) fn store(&self, value: Option<Payload>) {
        debug_assert!(self.is_output(), "only outputs hold data");
        *self.data.write() = value;
    }

    /// Bind this input to `upstream`, returning the previous binding.
    pub(crate) fn bind(&self, upstream: Arc<Connector>) -> Option<Arc<Connector>> {
        debug_assert!(self.is_input(), "only inputs can be bound");
        self.upstream.write().replace(upstream)
    }
}

impl fmt::Debug for Connector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connector")
            .field("name", &self.name)
            .field("direction", &self.direction)
            .field("payload", &self.payload)
            .finish()
    }
}

/// Typed handle to an input connector.
pub struct Input<T> {
    connector: Arc<Connector>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Any + Send + Sync> Input<T> {
    /// Value of the bound upstream output, if bound and set.
    pub fn data(&self) -> Option<Arc<T>> {
        self.connector.data()?.downcast::<T>().ok()
    }

    pub fn connector(&self) -> &Arc<Connector> {
        &self.connector
    }
}

impl<T> Clone for Input<T> {
    fn clone(&self) -> Self {
        Self {
            connector: Arc::clone(&self.connector),
            _marker: PhantomData,
        }
    }
}

/// Typed handle to an output connector.
pub struct Output<T> {
    connector: Arc<Connector>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Any + Send + Sync> Output<T> {
    pub fn set_data(&self, data: Arc<T>) {
        self.connector.store(Some(data));
    }

    pub fn clear(&self) {
        self.connector.store(None);
    }

    pub fn data(&self) -> Option<Arc<T>> {
        self.connector.data()?.downcast::<T>().ok()
    }

    pub fn connector(&self) -> &Arc<Connector> {
        &self.connector
    }
}

impl<T> Clone for Output<T> {
    fn clone(&self) -> Self {
        Self {
            connector: Arc::clone(&self.connector),
            _marker: PhantomData,
        }
    }
}

/// The fixed set of connectors of one algorithm.
///
/// Names are unique per direction: an algorithm may have an input and an
/// output that share a name, but never two inputs or two outputs.
#[derive(Debug, Default)]
pub struct ConnectorSet {
    inputs: Vec<Arc<Connector>>,
    outputs: Vec<Arc<Connector>>,
}

impl ConnectorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an input connector.
    ///
    /// # Panics
    ///
    /// Panics if an input with the same name was already declared.
    pub fn add_input<T: Any + Send + Sync>(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Input<T> {
        let connector = self.declare::<T>(name.into(), description.into(), ConnectorDirection::Input);
        Input {
            connector,
            _marker: PhantomData,
        }
    }

    /// Declare an output connector.
    ///
    /// # Panics
    ///
    /// Panics if an output with the same name was already declared.
    pub fn add_output<T: Any + Send + Sync>(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Output<T> {
        let connector =
            self.declare::<T>(name.into(), description.into(), ConnectorDirection::Output);
        Output {
            connector,
            _marker: PhantomData,
        }
    }

    fn declare<T: Any + Send + Sync>(
        &mut self,
        name: String,
        description: String,
        direction: ConnectorDirection,
    ) -> Arc<Connector> {
        assert!(
            self.find(&name, direction).is_none(),
            "duplicate {} connector name '{}'",
            direction,
            name
        );
        let connector = Arc::new(Connector::new(
            name,
            description,
            direction,
            PayloadType::of::<T>(),
        ));
        match direction {
            ConnectorDirection::Input => self.inputs.push(Arc::clone(&connector)),
            ConnectorDirection::Output => self.outputs.push(Arc::clone(&connector)),
        }
        connector
    }

    pub fn inputs(&self) -> &[Arc<Connector>] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[Arc<Connector>] {
        &self.outputs
    }

    pub fn input(&self, name: &str) -> Option<&Arc<Connector>> {
        self.find(name, ConnectorDirection::Input)
    }

    pub fn output(&self, name: &str) -> Option<&Arc<Connector>> {
        self.find(name, ConnectorDirection::Output)
    }

    pub fn find(&self, name: &str, direction: ConnectorDirection) -> Option<&Arc<Connector>> {
        let list = match direction {
            ConnectorDirection::Input => &self.inputs,
            ConnectorDirection::Output => &self.outputs,
        };
        list.iter().find(|c| c.name == name)
    }

    pub fn descriptors(&self) -> Vec<ConnectorDescriptor> {
        self.inputs
            .iter()
            .chain(self.outputs.iter())
            .map(|c| c.descriptor())
            .collect()
    }
}
