//! Small value types shared between the network and its visualizations.
//!
//! - [`BoundingBox`] - Axis-aligned bounds of rendered geometry
//! - [`View`] - The rendering area a visualization draws into

use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box. A default-constructed box is empty.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}

impl BoundingBox {
    /// An empty box: `min` is +inf and `max` is -inf, so any point extends it.
    pub const fn empty() -> Self {
        Self {
            min: [f32::INFINITY; 3],
            max: [f32::NEG_INFINITY; 3],
        }
    }

    pub fn new(min: [f32; 3], max: [f32; 3]) -> Self {
        Self { min, max }
    }

    /// Smallest box containing all given points
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a [f32; 3]>) -> Self {
        let mut bb = Self::empty();
        for p in points {
            bb.include_point(*p);
        }
        bb
    }

    pub fn is_empty(&self) -> bool {
        (0..3).any(|i| self.min[i] > self.max[i])
    }

    pub fn include_point(&mut self, p: [f32; 3]) {
        for i in 0..3 {
            self.min[i] = self.min[i].min(p[i]);
            self.max[i] = self.max[i].max(p[i]);
        }
    }

    /// Grow this box to also contain `other`. Empty boxes are ignored.
    pub fn include(&mut self, other: &BoundingBox) {
        if other.is_empty() {
            return;
        }
        self.include_point(other.min);
        self.include_point(other.max);
    }

    pub fn center(&self) -> Option<[f32; 3]> {
        if self.is_empty() {
            return None;
        }
        Some([
            (self.min[0] + self.max[0]) * 0.5,
            (self.min[1] + self.max[1]) * 0.5,
            (self.min[2] + self.max[2]) * 0.5,
        ])
    }

    pub fn size(&self) -> [f32; 3] {
        if self.is_empty() {
            return [0.0; 3];
        }
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }
}

/// The viewport a visualization renders to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct View {
    /// Viewport origin in pixels
    pub origin: [u32; 2],
    /// Viewport size in pixels
    pub size: [u32; 2],
    /// Bounding box of everything shown in this view
    pub scene_bounds: BoundingBox,
}

impl View {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            origin: [0, 0],
            size: [width, height],
            scene_bounds: BoundingBox::empty(),
        }
    }

    pub fn aspect_ratio(&self) -> f32 {
        if self.size[1] == 0 {
            return 1.0;
        }
        self.size[0] as f32 / self.size[1] as f32
    }
}
