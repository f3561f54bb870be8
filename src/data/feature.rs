//! Detected-feature records

use serde::{Deserialize, Serialize};

/// A reported point of interest from the feature-detection stream
///
/// `x` and `y` are pixel offsets relative to the image center, so a feature
/// at (0, 0) sits in the middle of the frame. `inverse_size` scales the
/// marker drawn for this feature: radius = 1 / inverse_size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// Horizontal offset from the image center, in pixels
    pub x: i32,
    /// Vertical offset from the image center, in pixels
    pub y: i32,
    /// Inverse of the marker radius (no validation; see `radius`)
    pub inverse_size: f64,
}

impl Feature {
    /// Create a new feature
    pub fn new(x: i32, y: i32, inverse_size: f64) -> Self {
        Self { x, y, inverse_size }
    }

    /// Marker radius in pixels
    ///
    /// An `inverse_size` of zero yields an infinite radius and a negative
    /// one yields a negative radius; the rasterizer treats both as
    /// degenerate and draws nothing.
    pub fn radius(&self) -> f64 {
        1.0 / self.inverse_size
    }
}
