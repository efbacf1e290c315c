//! Point types handed to rendering sinks.

use serde::{Deserialize, Serialize};

/// A single 3D scatter point; `y` is the height at `(x, z)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceSample {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl SurfaceSample {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// True if all three coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// A time-series sample; `x` is the tick counter at append time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StreamPoint {
    pub x: f64,
    pub y: f64,
}

impl StreamPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}
