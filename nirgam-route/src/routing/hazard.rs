//! Hazard descriptors supplied per cycle.

use serde::{Deserialize, Serialize};

use crate::core::{PixelPoint, PixelRect};

/// A circular exclusion zone in map pixels.
///
/// Rasterized as the axis-aligned square of side `2 * radius` around the
/// centre. The radius is optional on input; the engine supplies its
/// configured default when absent.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hazard {
    pub x: f32,
    pub y: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f32>,
}

impl Hazard {
    /// Hazard using the engine's default radius
    pub fn at(x: f32, y: f32) -> Self {
        Self { x, y, radius: None }
    }

    /// Hazard with an explicit radius
    pub fn with_radius(x: f32, y: f32, radius: f32) -> Self {
        Self {
            x,
            y,
            radius: Some(radius),
        }
    }

    /// Hazard covering a detected bounding box: centred on the box, radius
    /// half its larger side.
    pub fn from_bounding_box(rect: PixelRect) -> Self {
        let c = rect.center();
        Self::with_radius(c.x, c.y, rect.width.max(rect.height) as f32 / 2.0)
    }

    pub fn center(&self) -> PixelPoint {
        PixelPoint::new(self.x, self.y)
    }

    /// Radius in effect, falling back to `default_radius`
    pub fn effective_radius(&self, default_radius: f32) -> f32 {
        self.radius.unwrap_or(default_radius).max(0.0)
    }

    /// Blocked square for this hazard
    pub fn rect(&self, default_radius: f32) -> PixelRect {
        PixelRect::centered_square(self.center(), self.effective_radius(default_radius))
    }

    /// Same hazard with the default radius made explicit
    pub fn resolved(&self, default_radius: f32) -> Self {
        Self::with_radius(self.x, self.y, self.effective_radius(default_radius))
    }
}
