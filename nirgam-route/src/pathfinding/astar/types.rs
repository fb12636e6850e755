//! A* pathfinding types.

use crate::core::{GridCoord, PixelPoint};
use std::cmp::Ordering;

/// A node in the A* open set
#[derive(Clone, Copy, Debug)]
pub(super) struct AStarNode {
    pub coord: GridCoord,
    pub g_cost: u32, // Steps from start
    pub h_cost: u32, // Manhattan distance to goal
}

impl AStarNode {
    #[inline]
    pub fn f_cost(&self) -> u32 {
        self.g_cost + self.h_cost
    }
}

impl Eq for AStarNode {}

impl PartialEq for AStarNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Ord for AStarNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior: lowest f first, then the
        // node closest to the goal, then coordinates so pops are deterministic
        other
            .f_cost()
            .cmp(&self.f_cost())
            .then_with(|| other.h_cost.cmp(&self.h_cost))
            .then_with(|| other.coord.cmp(&self.coord))
    }
}

impl PartialOrd for AStarNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Result of a path search
#[derive(Clone, Debug, Default)]
pub struct PathResult {
    /// Path as grid cells, start first (empty if no path found)
    pub path_grid: Vec<GridCoord>,
    /// Path as cell-centre pixel waypoints, start first
    pub path_pixels: Vec<PixelPoint>,
    /// Index of the reached exit in registration order
    pub exit_index: Option<usize>,
    /// Number of nodes expanded during search
    pub nodes_expanded: usize,
    /// Reason for failure (if any)
    pub failure_reason: Option<PathFailure>,
}

impl PathResult {
    /// Create a failed result
    pub(crate) fn failed(reason: PathFailure, nodes_expanded: usize) -> Self {
        Self {
            nodes_expanded,
            failure_reason: Some(reason),
            ..Default::default()
        }
    }

    /// Whether a path was found
    #[inline]
    pub fn is_success(&self) -> bool {
        !self.path_grid.is_empty()
    }

    /// Path length in cells (including start and goal)
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.path_grid.len()
    }

    /// Path length in moves; equals the path cost on a unit-cost grid
    #[inline]
    pub fn steps(&self) -> usize {
        self.path_grid.len().saturating_sub(1)
    }
}

/// Reason for path failure
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathFailure {
    /// Start cell is blocked (the node stands inside a hazard or wall)
    StartBlocked,
    /// Goal cell is blocked (exit covered by a hazard)
    GoalBlocked,
    /// Start or goal is out of bounds
    OutOfBounds,
    /// No exits are registered
    NoExits,
    /// No path exists between start and any goal
    NoPath,
}

impl PathFailure {
    /// Short code for logs
    pub fn code(&self) -> &'static str {
        match self {
            Self::StartBlocked => "START_IN_HAZARD",
            Self::GoalBlocked => "EXIT_BLOCKED",
            Self::OutOfBounds => "OUT_OF_BOUNDS",
            Self::NoExits => "NO_EXITS",
            Self::NoPath => "ROUTE_UNREACHABLE",
        }
    }
}
