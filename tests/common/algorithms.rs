//! Small algorithms and readers used across the integration tests

use parking_lot::Mutex;
use processing_network::network::{
    has_extension, Algorithm, ConnectorSet, Input, Output, Payload, Reader, RenderRequest,
    Visualization,
};
use processing_network::types::{BoundingBox, View};
use std::path::Path;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::Arc;

/// Publishes its current value on output "X".
pub struct Source {
    name: String,
    connectors: ConnectorSet,
    x: Output<u32>,
    value: AtomicU32,
}

impl Source {
    pub fn new(name: &str, value: u32) -> Arc<Self> {
        let mut connectors = ConnectorSet::new();
        let x = connectors.add_output("X", "the source value");
        Arc::new(Self {
            name: name.to_string(),
            connectors,
            x,
            value: AtomicU32::new(value),
        })
    }

    pub fn set(&self, value: u32) {
        self.value.store(value, Ordering::SeqCst);
    }
}

impl Algorithm for Source {
    fn name(&self) -> &str {
        &self.name
    }

    fn connectors(&self) -> &ConnectorSet {
        &self.connectors
    }

    fn process(&self) -> anyhow::Result<()> {
        self.x.set_data(Arc::new(self.value.load(Ordering::SeqCst)));
        Ok(())
    }
}

/// Records every value seen on input "Y", and the threads it was shut down on.
pub struct Sink {
    name: String,
    connectors: ConnectorSet,
    y: Input<u32>,
    observed: Mutex<Vec<u32>>,
    shutdowns: Mutex<Vec<Option<String>>>,
}

impl Sink {
    pub fn new(name: &str) -> Arc<Self> {
        let mut connectors = ConnectorSet::new();
        let y = connectors.add_input("Y", "value to record");
        Arc::new(Self {
            name: name.to_string(),
            connectors,
            y,
            observed: Mutex::new(Vec::new()),
            shutdowns: Mutex::new(Vec::new()),
        })
    }

    pub fn observed(&self) -> Vec<u32> {
        self.observed.lock().clone()
    }

    pub fn shutdowns(&self) -> Vec<Option<String>> {
        self.shutdowns.lock().clone()
    }
}

impl Algorithm for Sink {
    fn name(&self) -> &str {
        &self.name
    }

    fn connectors(&self) -> &ConnectorSet {
        &self.connectors
    }

    fn process(&self) -> anyhow::Result<()> {
        if let Some(value) = self.y.data() {
            self.observed.lock().push(*value);
        }
        Ok(())
    }

    fn shutdown(&self) -> anyhow::Result<()> {
        let thread = std::thread::current().name().map(str::to_string);
        self.shutdowns.lock().push(thread);
        Ok(())
    }
}

/// Always fails to process.
pub struct Faulty {
    connectors: ConnectorSet,
    runs: AtomicUsize,
}

impl Faulty {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            connectors: ConnectorSet::new(),
            runs: AtomicUsize::new(0),
        })
    }

    pub fn runs(&self) -> usize {
        self.runs.load(Ordering::SeqCst)
    }
}

impl Algorithm for Faulty {
    fn name(&self) -> &str {
        "Faulty"
    }

    fn connectors(&self) -> &ConnectorSet {
        &self.connectors
    }

    fn process(&self) -> anyhow::Result<()> {
        self.runs.fetch_add(1, Ordering::SeqCst);
        anyhow::bail!("division by zero")
    }
}

/// A rendering algorithm that plots the values on input "Y" along the x axis.
pub struct Plot {
    connectors: ConnectorSet,
    y: Input<u32>,
    last: Mutex<Option<u32>>,
    render_request: RenderRequest,
    frames: AtomicUsize,
}

impl Plot {
    pub fn new() -> Arc<Self> {
        let mut connectors = ConnectorSet::new();
        let y = connectors.add_input("Y", "value to plot");
        Arc::new(Self {
            connectors,
            y,
            last: Mutex::new(None),
            render_request: RenderRequest::new(),
            frames: AtomicUsize::new(0),
        })
    }

    pub fn frames(&self) -> usize {
        self.frames.load(Ordering::SeqCst)
    }
}

impl Algorithm for Plot {
    fn name(&self) -> &str {
        "Plot"
    }

    fn connectors(&self) -> &ConnectorSet {
        &self.connectors
    }

    fn process(&self) -> anyhow::Result<()> {
        let current = self.y.data().map(|v| *v);
        let mut last = self.last.lock();
        if *last != current {
            *last = current;
            self.render_request.request();
        }
        Ok(())
    }

    fn as_visualization(&self) -> Option<&dyn Visualization> {
        Some(self)
    }
}

impl Visualization for Plot {
    fn prepare(&self) -> anyhow::Result<()> {
        Ok(())
    }

    fn render(&self, _view: &View) -> anyhow::Result<()> {
        self.render_request.take();
        self.frames.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn finalize(&self) -> anyhow::Result<()> {
        Ok(())
    }

    fn bounding_box(&self) -> BoundingBox {
        match *self.last.lock() {
            Some(v) => BoundingBox::new([0.0, 0.0, 0.0], [v as f32, 1.0, 0.0]),
            None => BoundingBox::empty(),
        }
    }

    fn render_request(&self) -> &RenderRequest {
        &self.render_request
    }
}

/// Reads `.txt` files into a `String` payload.
pub struct TextReader;

impl Reader for TextReader {
    fn name(&self) -> &str {
        "Text"
    }

    fn can_load(&self, path: &Path) -> bool {
        has_extension(path, &["txt"])
    }

    fn load(&self, path: &Path) -> anyhow::Result<Payload> {
        let content = std::fs::read_to_string(path)?;
        Ok(Arc::new(content))
    }
}
