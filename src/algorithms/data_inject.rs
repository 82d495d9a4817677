//! DataInject: feeds externally produced data into the network.
//!
//! Typical use is to hand a [`ReadFile`](crate::network::commands::ReadFile)
//! result to downstream algorithms. `inject` stores the value; the next
//! `process()` publishes it on the "Data" output. Injecting again replaces
//! the pending value.

use crate::network::algorithm::Algorithm;
use crate::network::connector::{ConnectorSet, Output, Payload};
use parking_lot::Mutex;
use std::any::Any;
use std::sync::Arc;

/// Name of the single output connector.
pub const DATA_OUTPUT: &str = "Data";

pub struct DataInject<T> {
    name: String,
    connectors: ConnectorSet,
    output: Output<T>,
    pending: Mutex<Option<Arc<T>>>,
}

impl<T: Any + Send + Sync> DataInject<T> {
    pub fn new(name: impl Into<String>) -> Self {
        let mut connectors = ConnectorSet::new();
        let output = connectors.add_output(DATA_OUTPUT, "The injected data");
        Self {
            name: name.into(),
            connectors,
            output,
            pending: Mutex::new(None),
        }
    }

    /// Set the value published on the next `process()`.
    pub fn inject(&self, data: Arc<T>) {
        *self.pending.lock() = Some(data);
    }

    /// Inject a type-erased payload, e.g. a reader result.
    ///
    /// Returns false and injects nothing if the payload is not a `T`.
    pub fn inject_payload(&self, payload: Payload) -> bool {
        match payload.downcast::<T>() {
            Ok(data) => {
                self.inject(data);
                true
            }
            Err(_) => false,
        }
    }

    /// Value currently published on the output.
    pub fn data(&self) -> Option<Arc<T>> {
        self.output.data()
    }
}

impl<T: Any + Send + Sync> Algorithm for DataInject<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "Injects data into the network"
    }

    fn connectors(&self) -> &ConnectorSet {
        &self.connectors
    }

    fn process(&self) -> anyhow::Result<()> {
        if let Some(data) = self.pending.lock().take() {
            self.output.set_data(data);
        }
        Ok(())
    }
}
