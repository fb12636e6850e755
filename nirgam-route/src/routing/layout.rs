//! Fixed exit and guidance-node positions.
//!
//! Positions are surveyed once on a reference-resolution image and scaled
//! linearly to whatever resolution the static map is loaded at.

use serde::{Deserialize, Serialize};

use crate::core::PixelPoint;

/// A named pixel position
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NamedPoint {
    pub name: String,
    pub x: i32,
    pub y: i32,
}

impl NamedPoint {
    pub fn new(name: impl Into<String>, x: i32, y: i32) -> Self {
        Self {
            name: name.into(),
            x,
            y,
        }
    }

    pub fn position(&self) -> PixelPoint {
        PixelPoint::new(self.x as f32, self.y as f32)
    }
}

/// Exits and guidance nodes at a given resolution
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    /// Resolution the positions are expressed in
    pub width: u32,
    pub height: u32,
    /// Exits in registration order (earlier exits win path-length ties)
    pub exits: Vec<NamedPoint>,
    /// Guidance nodes
    pub nodes: Vec<NamedPoint>,
}

impl Layout {
    /// Rescale every position to a `width x height` map.
    ///
    /// Coordinates are multiplied by the per-axis ratio and truncated.
    pub fn scaled_to(&self, width: u32, height: u32) -> Layout {
        let sx = width as f64 / self.width.max(1) as f64;
        let sy = height as f64 / self.height.max(1) as f64;
        let scale = |p: &NamedPoint| {
            NamedPoint::new(
                p.name.clone(),
                (p.x as f64 * sx) as i32,
                (p.y as f64 * sy) as i32,
            )
        };

        Layout {
            width,
            height,
            exits: self.exits.iter().map(scale).collect(),
            nodes: self.nodes.iter().map(scale).collect(),
        }
    }

    /// Position of a guidance node by name
    pub fn node(&self, name: &str) -> Option<&NamedPoint> {
        self.nodes.iter().find(|n| n.name == name)
    }
}
