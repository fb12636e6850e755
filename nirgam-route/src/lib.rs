//! Nirgam: evacuation routing for guidance indicators.
//!
//! Each cycle turns the current hazards into one steering command per
//! guidance node, pointing along the shortest safe route to the nearest
//! exit.
//!
//! # Architecture
//!
//! ```text
//! camera frame ──► vision::SceneCalibrator ──► vision::FeatureExtractor
//!                                                   │ hazard / exit boxes
//! simulated hazards ────────────────────────────────┤
//!                                                   ▼
//!                                      routing::RoutingEngine
//!                                      ├─ grid::OccupancyGrid (rebuilt per cycle)
//!                                      ├─ pathfinding::AStarPlanner (per node)
//!                                      └─ guidance::DirectionResolver
//!                                                   │
//!                                                   ▼
//!                                   node name → UP/DOWN/LEFT/RIGHT/STOP/BLOCKED
//! ```
//!
//! # Coordinate frames
//!
//! - **Pixel**: map image pixels, origin top-left, Y down
//! - **Grid**: `cell_size`-pixel cells, same orientation
//!
//! # Example
//!
//! ```rust,ignore
//! use nirgam_route::{Hazard, NirgamConfig, RoutingEngine, StaticMap};
//!
//! let config = NirgamConfig::load_default()?;
//! let map = StaticMap::load("maps/corridor.png", config.grid.wall_threshold)?;
//! let mut engine = RoutingEngine::new(config.to_router_config(), map, &config.to_layout())?;
//!
//! let outcome = engine.process(&[Hazard::at(480.0, 250.0)]);
//! for (node, direction) in &outcome.directions {
//!     println!("{node}: {direction}");
//! }
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod grid;
pub mod guidance;
pub mod pathfinding;
pub mod render;
pub mod routing;
pub mod vision;

pub use config::NirgamConfig;
pub use crate::core::{CellState, GridCoord, PixelPoint, PixelRect};
pub use error::{CalibrationError, Error, Result};
pub use grid::OccupancyGrid;
pub use guidance::{Direction, DirectionResolver, SensorReport};
pub use pathfinding::{AStarPlanner, PathFailure, PathResult};
pub use routing::{Hazard, Layout, NamedPoint, RouteOutcome, RouterConfig, RoutingEngine, StaticMap};
pub use vision::{CalibrationMarkers, FeatureExtractor, SceneCalibrator};
