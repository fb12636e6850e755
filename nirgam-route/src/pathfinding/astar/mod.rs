//! A* pathfinding algorithm.
//!
//! Implements A* search on the occupancy grid:
//! - 4-connected movement, unit step cost
//! - Manhattan heuristic
//! - Multi-exit search returning the nearest reachable exit

mod planner;
mod types;

pub use planner::AStarPlanner;
pub use types::{PathFailure, PathResult};

use crate::core::{GridCoord, PixelPoint};
use crate::grid::OccupancyGrid;

/// Quick path finding between two cells
pub fn find_path(grid: &OccupancyGrid, start: GridCoord, goal: GridCoord) -> PathResult {
    AStarPlanner::new(grid).find_path(start, goal)
}

/// Check if a path exists between two pixel positions
pub fn path_exists(grid: &OccupancyGrid, start: PixelPoint, goal: PixelPoint) -> bool {
    AStarPlanner::new(grid)
        .find_path_pixels(start, goal)
        .is_success()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CellState, PixelRect};

    fn create_test_grid() -> OccupancyGrid {
        OccupancyGrid::new(50, 50, 1).unwrap()
    }

    #[test]
    fn test_simple_path() {
        let grid = create_test_grid();

        let start = GridCoord::new(10, 25);
        let goal = GridCoord::new(40, 25);

        let result = find_path(&grid, start, goal);

        assert!(result.is_success());
        assert_eq!(result.path_grid[0], start);
        assert_eq!(*result.path_grid.last().unwrap(), goal);
        assert_eq!(result.steps(), 30);
    }

    #[test]
    fn test_path_is_4_connected() {
        let grid = create_test_grid();
        let result = find_path(&grid, GridCoord::new(10, 10), GridCoord::new(40, 40));

        assert_eq!(result.steps(), 60);
        for pair in result.path_grid.windows(2) {
            assert_eq!(pair[0].manhattan_distance(&pair[1]), 1);
        }
    }

    #[test]
    fn test_path_around_obstacle() {
        let mut grid = create_test_grid();

        // Wall across the middle
        for y in 15..35 {
            grid.set(GridCoord::new(25, y), CellState::Blocked);
        }

        let result = find_path(&grid, GridCoord::new(10, 25), GridCoord::new(40, 25));

        assert!(result.is_success());
        // Detour under the wall: 30 across plus 10 down and 10 back up
        assert_eq!(result.steps(), 50);
        assert!(result.path_grid.iter().all(|c| grid.is_free(*c)));
    }

    #[test]
    fn test_no_path() {
        let mut grid = create_test_grid();

        for y in 0..50 {
            grid.set(GridCoord::new(25, y), CellState::Blocked);
        }

        let result = find_path(&grid, GridCoord::new(10, 25), GridCoord::new(40, 25));

        assert!(!result.is_success());
        assert_eq!(result.failure_reason, Some(PathFailure::NoPath));
    }

    #[test]
    fn test_start_blocked() {
        let mut grid = create_test_grid();
        grid.set(GridCoord::new(10, 25), CellState::Blocked);

        let result = find_path(&grid, GridCoord::new(10, 25), GridCoord::new(40, 25));

        assert_eq!(result.failure_reason, Some(PathFailure::StartBlocked));
    }

    #[test]
    fn test_goal_blocked() {
        let mut grid = create_test_grid();
        grid.set(GridCoord::new(40, 25), CellState::Blocked);

        let result = find_path(&grid, GridCoord::new(10, 25), GridCoord::new(40, 25));

        assert_eq!(result.failure_reason, Some(PathFailure::GoalBlocked));
    }

    #[test]
    fn test_out_of_bounds() {
        let grid = create_test_grid();
        let result = find_path(&grid, GridCoord::new(-1, 0), GridCoord::new(5, 5));
        assert_eq!(result.failure_reason, Some(PathFailure::OutOfBounds));
    }

    #[test]
    fn test_start_is_goal() {
        let grid = create_test_grid();
        let result = find_path(&grid, GridCoord::new(3, 3), GridCoord::new(3, 3));
        assert_eq!(result.cell_count(), 1);
        assert_eq!(result.steps(), 0);
    }

    #[test]
    fn test_pixel_waypoints_are_cell_centres() {
        let grid = OccupancyGrid::new(100, 100, 10).unwrap();
        let result = AStarPlanner::new(&grid)
            .find_path_pixels(PixelPoint::new(1.0, 1.0), PixelPoint::new(38.0, 3.0));

        assert_eq!(result.path_pixels.first(), Some(&PixelPoint::new(5.0, 5.0)));
        assert_eq!(result.path_pixels.last(), Some(&PixelPoint::new(35.0, 5.0)));
        assert_eq!(result.path_pixels.len(), 4);
    }

    #[test]
    fn test_nearest_exit_picks_shortest() {
        let mut grid = create_test_grid();
        grid.register_exit(PixelRect::new(49, 25, 0, 0));
        grid.register_exit(PixelRect::new(0, 25, 0, 0));

        let result = AStarPlanner::new(&grid).nearest_exit(PixelPoint::new(10.0, 25.0));

        assert_eq!(result.exit_index, Some(1));
        assert_eq!(result.steps(), 10);
    }

    #[test]
    fn test_nearest_exit_tie_goes_to_first_registered() {
        let mut grid = create_test_grid();
        grid.register_exit(PixelRect::new(30, 25, 0, 0));
        grid.register_exit(PixelRect::new(10, 25, 0, 0));

        let result = AStarPlanner::new(&grid).nearest_exit(PixelPoint::new(20.0, 25.0));

        assert_eq!(result.exit_index, Some(0));
        assert_eq!(result.path_grid.last(), Some(&GridCoord::new(30, 25)));
    }

    #[test]
    fn test_nearest_exit_skips_blocked_exit() {
        let mut grid = create_test_grid();
        grid.register_exit(PixelRect::new(12, 25, 0, 0));
        grid.register_exit(PixelRect::new(40, 25, 0, 0));
        grid.set(GridCoord::new(12, 25), CellState::Blocked);

        let result = AStarPlanner::new(&grid).nearest_exit(PixelPoint::new(10.0, 25.0));

        assert_eq!(result.exit_index, Some(1));
    }

    #[test]
    fn test_nearest_exit_without_exits() {
        let grid = create_test_grid();
        let result = AStarPlanner::new(&grid).nearest_exit(PixelPoint::new(10.0, 25.0));
        assert_eq!(result.failure_reason, Some(PathFailure::NoExits));
        assert!(result.path_pixels.is_empty());
    }

    #[test]
    fn test_path_exists() {
        let grid = create_test_grid();
        assert!(path_exists(&grid, PixelPoint::new(0.0, 0.0), PixelPoint::new(49.0, 49.0)));
    }
}
