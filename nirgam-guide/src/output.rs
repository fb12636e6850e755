//! Cycle report for the terminal or downstream tooling.

use nirgam_route::{Direction, Hazard, RouteOutcome, SensorReport};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write;

/// Per-node line of the report
#[derive(Debug, Serialize)]
pub struct NodeReport {
    /// Routed direction
    pub direction: Direction,
    /// Direction shown on the indicator (after sensor overrides)
    pub display: Direction,
    /// Path length in steps, None when unreachable
    pub steps: Option<usize>,
    /// Index of the exit reached
    pub exit: Option<usize>,
    /// Failure code when BLOCKED
    pub failure: Option<&'static str>,
}

/// Whole-cycle report
#[derive(Debug, Serialize)]
pub struct CycleReport {
    pub nodes: BTreeMap<String, NodeReport>,
    pub hazards: Vec<Hazard>,
    pub exits: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calibrated: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sensor: Option<SensorReport>,
}

impl CycleReport {
    pub fn new(
        outcome: &RouteOutcome,
        sensor: Option<&SensorReport>,
        sensor_nodes: &BTreeMap<u8, String>,
    ) -> Self {
        let display = match sensor {
            Some(report) => report.apply_overrides(&outcome.directions, sensor_nodes),
            None => outcome.directions.clone(),
        };

        let nodes = outcome
            .directions
            .iter()
            .map(|(name, direction)| {
                let path = outcome.paths.get(name);
                let node = NodeReport {
                    direction: *direction,
                    display: display.get(name).copied().unwrap_or(*direction),
                    steps: path.filter(|p| p.is_success()).map(|p| p.steps()),
                    exit: path.and_then(|p| p.exit_index),
                    failure: path.and_then(|p| p.failure_reason).map(|f| f.code()),
                };
                (name.clone(), node)
            })
            .collect();

        Self {
            nodes,
            hazards: outcome.hazards.clone(),
            exits: outcome.exits.len(),
            calibrated: outcome.calibrated,
            sensor: sensor.cloned(),
        }
    }

    /// Human-readable table
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{} hazards, {} exits{}",
            self.hazards.len(),
            self.exits,
            match self.calibrated {
                Some(true) => ", calibrated frame",
                Some(false) => ", raw frame",
                None => "",
            }
        );
        if let Some(sensor) = &self.sensor {
            let _ = writeln!(
                out,
                "sensor: hazard={} occupants={}",
                sensor.hazard, sensor.occupants
            );
        }

        let width = self.nodes.keys().map(|k| k.chars().count()).max().unwrap_or(0);
        for (name, node) in &self.nodes {
            let detail = match (node.steps, node.failure) {
                (Some(steps), _) => format!("{} steps to exit {}", steps, node.exit.unwrap_or(0)),
                (None, Some(code)) => code.to_string(),
                (None, None) => String::new(),
            };
            let shown = if node.display != node.direction {
                format!("{} (routed {})", node.display, node.direction)
            } else {
                node.display.to_string()
            };
            let pad = width - name.chars().count();
            let _ = writeln!(out, "  {}{}  {:<20} {}", name, " ".repeat(pad), shown, detail);
        }
        out
    }
}
