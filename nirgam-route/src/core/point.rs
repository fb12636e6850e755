//! Point and coordinate types for the guidance map.
//!
//! Two frames are in play:
//! - **Pixel frame**: the static map image, origin at the top-left pixel,
//!   X to the right, Y downwards.
//! - **Grid frame**: integer cell indices (`col`, `row`) of the occupancy
//!   grid, same orientation as the pixel frame.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// Grid coordinates (integer cell indices)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct GridCoord {
    /// Column index
    pub x: i32,
    /// Row index
    pub y: i32,
}

impl GridCoord {
    /// Create a new grid coordinate
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another coordinate
    #[inline]
    pub fn manhattan_distance(&self, other: &GridCoord) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Get the 4 axis-aligned neighbors (up, right, down, left in image frame)
    #[inline]
    pub fn neighbors_4(&self) -> [GridCoord; 4] {
        [
            GridCoord::new(self.x, self.y - 1), // Up
            GridCoord::new(self.x + 1, self.y), // Right
            GridCoord::new(self.x, self.y + 1), // Down
            GridCoord::new(self.x - 1, self.y), // Left
        ]
    }
}

impl Add for GridCoord {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        GridCoord::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for GridCoord {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        GridCoord::new(self.x - other.x, self.y - other.y)
    }
}

/// Pixel coordinates in the map image (f32, sub-pixel capable)
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelPoint {
    /// Column in pixels
    pub x: f32,
    /// Row in pixels (downwards)
    pub y: f32,
}

impl PixelPoint {
    /// Create a new pixel point
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Origin of the image
    pub const ZERO: PixelPoint = PixelPoint { x: 0.0, y: 0.0 };

    /// Euclidean distance to another point
    #[inline]
    pub fn distance(&self, other: &PixelPoint) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Nearest integer pixel, for drawing
    #[inline]
    pub fn rounded(&self) -> (i32, i32) {
        (self.x.round() as i32, self.y.round() as i32)
    }
}

impl Add for PixelPoint {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        PixelPoint::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for PixelPoint {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        PixelPoint::new(self.x - other.x, self.y - other.y)
    }
}

/// Axis-aligned pixel rectangle (top-left corner plus size).
///
/// Used both for regions injected into the grid and for bounding boxes
/// returned by the feature extractor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PixelRect {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Width in pixels
    pub width: i32,
    /// Height in pixels
    pub height: i32,
}

impl PixelRect {
    /// Create a new rectangle
    #[inline]
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Square of side `2 * half` centred on `center`.
    ///
    /// Corners are truncated toward zero, matching how hazard descriptors
    /// are rasterized.
    pub fn centered_square(center: PixelPoint, half: f32) -> Self {
        Self::new(
            (center.x - half) as i32,
            (center.y - half) as i32,
            (half * 2.0) as i32,
            (half * 2.0) as i32,
        )
    }

    /// Geometric centre
    #[inline]
    pub fn center(&self) -> PixelPoint {
        PixelPoint::new(
            self.x as f32 + self.width as f32 / 2.0,
            self.y as f32 + self.height as f32 / 2.0,
        )
    }

    /// Area in square pixels
    #[inline]
    pub fn area(&self) -> i64 {
        self.width.max(0) as i64 * self.height.max(0) as i64
    }
}
