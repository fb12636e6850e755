//! Layout and sensor configuration sections.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::defaults;
use crate::routing::{Layout, NamedPoint};

/// Exit and guidance-node positions at the reference resolution
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LayoutSection {
    #[serde(default = "defaults::reference_width")]
    pub reference_width: u32,

    #[serde(default = "defaults::reference_height")]
    pub reference_height: u32,

    /// Exits in registration order
    #[serde(default = "defaults::layout_exits")]
    pub exits: Vec<NamedPoint>,

    /// Guidance nodes
    #[serde(default = "defaults::layout_nodes")]
    pub nodes: Vec<NamedPoint>,
}

impl Default for LayoutSection {
    fn default() -> Self {
        Self {
            reference_width: defaults::reference_width(),
            reference_height: defaults::reference_height(),
            exits: defaults::layout_exits(),
            nodes: defaults::layout_nodes(),
        }
    }
}

impl LayoutSection {
    pub fn to_layout(&self) -> Layout {
        Layout {
            width: self.reference_width,
            height: self.reference_height,
            exits: self.exits.clone(),
            nodes: self.nodes.clone(),
        }
    }
}

/// Live-sensor settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SensorSection {
    /// Sensor indicator index -> guidance node name
    #[serde(default = "defaults::sensor_nodes")]
    pub nodes: BTreeMap<u8, String>,
}

impl Default for SensorSection {
    fn default() -> Self {
        Self {
            nodes: defaults::sensor_nodes(),
        }
    }
}
