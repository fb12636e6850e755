//! Unified configuration loading.
//!
//! Loads all configuration from a single YAML file. Every field has a
//! default, so a partial file (or no file) is valid.

mod defaults;
mod grid;
mod layout;
mod nirgam;
mod vision;

pub use nirgam::NirgamConfig;

pub use grid::{DirectionSection, GridSection, HazardSection};
pub use layout::{LayoutSection, SensorSection};
pub use vision::VisionSection;
