//! Occupancy grid implementation.
//!
//! - [`OccupancyGrid`]: cell storage, pixel/grid conversion, obstacle and
//!   exit registration, nearest-exit queries

mod storage;

pub use storage::{CellCounts, OccupancyGrid};

use crate::core::PixelPoint;
use crate::pathfinding::{AStarPlanner, PathResult};

impl OccupancyGrid {
    /// Shortest path from a pixel position to the nearest registered exit.
    ///
    /// Empty when the position's own cell is blocked, when no exit is
    /// registered, or when every exit is unreachable. Ties between exits of
    /// equal path length go to the one registered first.
    pub fn nearest_exit_path(&self, point: PixelPoint) -> PathResult {
        AStarPlanner::new(self).nearest_exit(point)
    }
}
