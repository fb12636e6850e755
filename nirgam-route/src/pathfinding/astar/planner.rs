//! A* planner implementation.

use crate::core::{GridCoord, PixelPoint};
use crate::grid::OccupancyGrid;
use log::{debug, trace};
use std::collections::BinaryHeap;

use super::types::{AStarNode, PathFailure, PathResult};

/// A* pathfinder over a 4-connected, unit-cost occupancy grid.
///
/// With unit step costs the Manhattan heuristic is admissible and
/// consistent, so the first time the goal is popped its path is a
/// shortest one.
pub struct AStarPlanner<'a> {
    grid: &'a OccupancyGrid,
}

impl<'a> AStarPlanner<'a> {
    /// Create a new A* planner
    pub fn new(grid: &'a OccupancyGrid) -> Self {
        Self { grid }
    }

    /// Find a path from start to goal (grid coordinates)
    pub fn find_path(&self, start: GridCoord, goal: GridCoord) -> PathResult {
        trace!(
            "[AStar] find_path: start=({},{}) goal=({},{})",
            start.x, start.y, goal.x, goal.y
        );

        let (Some(start_idx), Some(goal_idx)) = (
            self.grid.coord_to_index(start),
            self.grid.coord_to_index(goal),
        ) else {
            debug!("[AStar] FAILED: OutOfBounds - start or goal outside grid");
            return PathResult::failed(PathFailure::OutOfBounds, 0);
        };

        if !self.grid.is_free(start) {
            trace!("[AStar] FAILED: StartBlocked at ({},{})", start.x, start.y);
            return PathResult::failed(PathFailure::StartBlocked, 0);
        }
        if !self.grid.is_free(goal) {
            trace!("[AStar] FAILED: GoalBlocked at ({},{})", goal.x, goal.y);
            return PathResult::failed(PathFailure::GoalBlocked, 0);
        }

        // Best-known cost per cell; u32::MAX means undiscovered
        let mut g_scores = vec![u32::MAX; self.grid.cell_count()];
        let mut came_from: Vec<Option<usize>> = vec![None; self.grid.cell_count()];
        let mut open_set = BinaryHeap::new();

        g_scores[start_idx] = 0;
        open_set.push(AStarNode {
            coord: start,
            g_cost: 0,
            h_cost: start.manhattan_distance(&goal),
        });

        let mut nodes_expanded = 0;

        while let Some(current) = open_set.pop() {
            let Some(current_idx) = self.grid.coord_to_index(current.coord) else {
                continue;
            };

            // Stale entry: a cheaper route to this cell was found after it was pushed
            if current.g_cost > g_scores[current_idx] {
                continue;
            }
            nodes_expanded += 1;

            if current_idx == goal_idx {
                return self.reconstruct_path(&came_from, goal_idx, nodes_expanded);
            }

            for neighbor in current.coord.neighbors_4() {
                if !self.grid.is_free(neighbor) {
                    continue;
                }
                let Some(neighbor_idx) = self.grid.coord_to_index(neighbor) else {
                    continue;
                };

                let tentative_g = current.g_cost + 1;
                if tentative_g < g_scores[neighbor_idx] {
                    came_from[neighbor_idx] = Some(current_idx);
                    g_scores[neighbor_idx] = tentative_g;
                    open_set.push(AStarNode {
                        coord: neighbor,
                        g_cost: tentative_g,
                        h_cost: neighbor.manhattan_distance(&goal),
                    });
                }
            }
        }

        trace!("[AStar] FAILED: NoPath after expanding {} nodes", nodes_expanded);
        PathResult::failed(PathFailure::NoPath, nodes_expanded)
    }

    /// Find a path between two pixel positions
    pub fn find_path_pixels(&self, start: PixelPoint, goal: PixelPoint) -> PathResult {
        self.find_path(self.grid.pixel_to_grid(start), self.grid.pixel_to_grid(goal))
    }

    /// Shortest path from a pixel position to the nearest registered exit.
    ///
    /// Every exit is searched; the path with the fewest cells wins and ties
    /// go to the exit registered first.
    pub fn nearest_exit(&self, start: PixelPoint) -> PathResult {
        let exits = self.grid.exits();
        if exits.is_empty() {
            return PathResult::failed(PathFailure::NoExits, 0);
        }

        let start_cell = self.grid.pixel_to_grid(start);
        if !self.grid.is_free(start_cell) {
            return PathResult::failed(PathFailure::StartBlocked, 0);
        }

        let mut best: Option<PathResult> = None;
        let mut nodes_expanded = 0;

        for (exit_index, &exit) in exits.iter().enumerate() {
            let mut result = self.find_path(start_cell, exit);
            nodes_expanded += result.nodes_expanded;
            if !result.is_success() {
                continue;
            }
            let shorter = best
                .as_ref()
                .is_none_or(|b| result.cell_count() < b.cell_count());
            if shorter {
                result.exit_index = Some(exit_index);
                best = Some(result);
            }
        }

        match best {
            Some(mut result) => {
                result.nodes_expanded = nodes_expanded;
                result
            }
            None => PathResult::failed(PathFailure::NoPath, nodes_expanded),
        }
    }

    /// Walk `came_from` back from the goal
    fn reconstruct_path(
        &self,
        came_from: &[Option<usize>],
        goal_idx: usize,
        nodes_expanded: usize,
    ) -> PathResult {
        let cols = self.grid.cols();
        let mut path_grid = Vec::new();
        let mut current = Some(goal_idx);

        while let Some(idx) = current {
            path_grid.push(GridCoord::new((idx % cols) as i32, (idx / cols) as i32));
            current = came_from[idx];
        }
        path_grid.reverse();

        let path_pixels = path_grid
            .iter()
            .map(|c| self.grid.grid_to_pixel(*c))
            .collect();

        trace!(
            "[AStar] SUCCESS: path length={} cells, nodes_expanded={}",
            path_grid.len(),
            nodes_expanded
        );

        PathResult {
            path_grid,
            path_pixels,
            exit_index: None,
            nodes_expanded,
            failure_reason: None,
        }
    }
}
