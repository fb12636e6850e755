//! Guidance commands for the physical indicators.
//!
//! - [`DirectionResolver`]: path → one of UP/DOWN/LEFT/RIGHT/STOP
//! - [`SensorReport`]: live-sensor overrides for display

mod direction;
mod sensor;

pub use direction::{Direction, DirectionResolver, ParseDirectionError};
pub use sensor::SensorReport;
