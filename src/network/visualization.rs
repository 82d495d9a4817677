//! Visualization contract.
//!
//! Some algorithms also render. They expose that capability through
//! [`Algorithm::as_visualization`](crate::network::Algorithm::as_visualization).
//! The render thread drives the lifecycle: `prepare()`, then repeated
//! `update()`/`render()`, and finally `finalize()`. The network never calls
//! these; it only makes new data available through connectors.

use crate::types::{BoundingBox, View};
use std::sync::atomic::{AtomicBool, Ordering};

/// Flag an algorithm raises from `process()` when its rendering is stale.
///
/// The render thread is not permanently redrawing, so it polls this flag to
/// decide when to re-pull data.
#[derive(Debug, Default)]
pub struct RenderRequest {
    requested: AtomicBool,
}

impl RenderRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self) {
        self.requested.store(true, Ordering::Release);
    }

    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::Acquire)
    }

    /// Clear the flag, returning whether it was set.
    pub fn take(&self) -> bool {
        self.requested.swap(false, Ordering::AcqRel)
    }
}

/// Rendering side of an algorithm. All methods run on the render thread.
pub trait Visualization: Send + Sync {
    /// Create resources (buffers, shaders).
    fn prepare(&self) -> anyhow::Result<()>;

    /// Called between frames. Return immediately if nothing changed.
    fn update(&self, _view: &View) -> anyhow::Result<()> {
        Ok(())
    }

    fn render(&self, view: &View) -> anyhow::Result<()>;

    /// Release resources created in `prepare()`.
    fn finalize(&self) -> anyhow::Result<()>;

    /// Area this visualization draws into. Keep it cheap.
    fn bounding_box(&self) -> BoundingBox;

    fn render_request(&self) -> &RenderRequest;

    fn is_rendering_requested(&self) -> bool {
        self.render_request().is_requested()
    }
}
