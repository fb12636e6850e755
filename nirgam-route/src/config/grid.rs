//! Grid and hazard configuration sections.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::defaults;
use crate::routing::Hazard;

/// Occupancy grid settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GridSection {
    /// Pixels per cell side
    #[serde(default = "defaults::cell_size")]
    pub cell_size: u32,

    /// Map gray level above which a pixel is wall
    #[serde(default = "defaults::wall_threshold")]
    pub wall_threshold: u8,

    /// Side of the square registered around each exit (pixels)
    #[serde(default = "defaults::exit_box_size")]
    pub exit_box_size: u32,
}

impl Default for GridSection {
    fn default() -> Self {
        Self {
            cell_size: defaults::cell_size(),
            wall_threshold: defaults::wall_threshold(),
            exit_box_size: defaults::exit_box_size(),
        }
    }
}

/// Hazard settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HazardSection {
    /// Radius for hazards given without one (pixels)
    #[serde(default = "defaults::hazard_radius")]
    pub default_radius: f32,

    /// Named simulation zones, in map pixels
    #[serde(default = "defaults::hazard_presets")]
    pub presets: BTreeMap<String, Hazard>,
}

impl Default for HazardSection {
    fn default() -> Self {
        Self {
            default_radius: defaults::hazard_radius(),
            presets: defaults::hazard_presets(),
        }
    }
}

/// Direction resolver settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DirectionSection {
    /// Waypoints to look ahead along the path
    #[serde(default = "defaults::lookahead_steps")]
    pub lookahead_steps: usize,

    /// Dead zone as a fraction of the cell size
    #[serde(default = "defaults::dead_zone_cells")]
    pub dead_zone_cells: f32,
}

impl Default for DirectionSection {
    fn default() -> Self {
        Self {
            lookahead_steps: defaults::lookahead_steps(),
            dead_zone_cells: defaults::dead_zone_cells(),
        }
    }
}
