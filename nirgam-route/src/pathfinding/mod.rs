//! Path planning on the occupancy grid.
//!
//! ```rust,ignore
//! use nirgam_route::pathfinding::AStarPlanner;
//!
//! let planner = AStarPlanner::new(&grid);
//! let result = planner.nearest_exit(node_position);
//! if result.is_success() {
//!     println!("Exit {:?} in {} steps", result.exit_index, result.steps());
//! }
//! ```

pub mod astar;

pub use astar::{AStarPlanner, PathFailure, PathResult, find_path, path_exists};
