//! Routing orchestration.
//!
//! - [`Hazard`]: per-cycle exclusion zones
//! - [`Layout`]: exit and guidance-node positions
//! - [`StaticMap`]: map image and wall mask
//! - [`RoutingEngine`]: grid rebuild, exit search and direction per node

mod engine;
mod hazard;
mod layout;
mod static_map;

pub use engine::{RouteOutcome, RouterConfig, RoutingEngine};
pub use hazard::Hazard;
pub use layout::{Layout, NamedPoint};
pub use static_map::StaticMap;
