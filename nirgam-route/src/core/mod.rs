//! Core types for the nirgam routing engine.
//!
//! - [`CellState`]: binary occupancy of a grid cell
//! - [`GridCoord`], [`PixelPoint`], [`PixelRect`]: coordinate types

mod cell;
mod point;

pub use cell::CellState;
pub use point::{GridCoord, PixelPoint, PixelRect};
