//! Viewport geometry shared between the core and its adapters.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width * 0.5, self.height * 0.5)
    }
}

/// Minimum circle radius, centered at `origin`, that covers the whole
/// viewport: the distance to the farthest corner. Correct for any origin,
/// inside the viewport or not, and any aspect ratio.
pub fn cover_radius(origin: Point, viewport: Viewport) -> f32 {
    let dx = origin.x.max(viewport.width - origin.x);
    let dy = origin.y.max(viewport.height - origin.y);
    (dx * dx + dy * dy).sqrt()
}
