//! Live-sensor input.
//!
//! A remote sensor hub reports a hazard flag, an occupant count, and
//! optionally a direction per indicator keyed by a small index. Overrides
//! only change what is displayed; the routed directions stay as computed.

use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::direction::Direction;

/// One report from the sensor hub
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorReport {
    /// Hazard detected somewhere in the space
    #[serde(default)]
    pub hazard: bool,

    /// Occupants currently counted
    #[serde(default)]
    pub occupants: u32,

    /// Direction overrides keyed by indicator index
    #[serde(default)]
    pub overrides: BTreeMap<u8, Direction>,
}

impl SensorReport {
    /// Does this report carry any override?
    pub fn has_overrides(&self) -> bool {
        !self.overrides.is_empty()
    }

    /// Display mapping: routed directions with sensor overrides applied.
    ///
    /// `node_names` maps the sensor's indicator index to the node name.
    /// Indices with no known node, and names not present in `routed`, are
    /// ignored so the result keeps exactly one entry per routed node.
    pub fn apply_overrides(
        &self,
        routed: &BTreeMap<String, Direction>,
        node_names: &BTreeMap<u8, String>,
    ) -> BTreeMap<String, Direction> {
        let mut display = routed.clone();

        for (index, direction) in &self.overrides {
            let Some(name) = node_names.get(index) else {
                warn!("[Sensor] override for unknown indicator index {}", index);
                continue;
            };
            match display.get_mut(name) {
                Some(slot) => *slot = *direction,
                None => warn!("[Sensor] override for unrouted node {}", name),
            }
        }

        display
    }
}
