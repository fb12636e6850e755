//! Discrete steering commands for guidance indicators.
//!
//! A path is reduced to one command by looking a fixed number of steps
//! ahead and taking the dominant axis of the displacement:
//!
//! ```text
//!            UP (dy < 0)
//!                 ▲
//!   LEFT ◄── node ──► RIGHT      |dx| >= |dy|  → LEFT / RIGHT
//!                 ▼              |dy| >  |dx|  → UP / DOWN
//!           DOWN (dy > 0)        both within dead zone → STOP
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::PixelPoint;

/// Command shown on a guidance indicator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    /// Walk towards the top of the map
    Up,
    /// Walk towards the bottom of the map
    Down,
    /// Walk towards the left of the map
    Left,
    /// Walk towards the right of the map
    Right,
    /// Already at the exit
    Stop,
    /// No safe route from this indicator
    Blocked,
}

impl Direction {
    /// Wire/display name
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "UP",
            Direction::Down => "DOWN",
            Direction::Left => "LEFT",
            Direction::Right => "RIGHT",
            Direction::Stop => "STOP",
            Direction::Blocked => "BLOCKED",
        }
    }

    /// Unit step in image coordinates, None for STOP and BLOCKED
    pub fn unit_vector(&self) -> Option<(f32, f32)> {
        match self {
            Direction::Up => Some((0.0, -1.0)),
            Direction::Down => Some((0.0, 1.0)),
            Direction::Left => Some((-1.0, 0.0)),
            Direction::Right => Some((1.0, 0.0)),
            Direction::Stop | Direction::Blocked => None,
        }
    }

    /// Is this one of the four movement commands?
    pub fn is_movement(&self) -> bool {
        self.unit_vector().is_some()
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing a direction name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown direction: {0}")]
pub struct ParseDirectionError(String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "UP" => Ok(Direction::Up),
            "DOWN" => Ok(Direction::Down),
            "LEFT" => Ok(Direction::Left),
            "RIGHT" => Ok(Direction::Right),
            "STOP" => Ok(Direction::Stop),
            "BLOCKED" => Ok(Direction::Blocked),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}

/// Turns a routed path into a single steering command.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionResolver {
    /// Waypoints to look ahead along the path
    lookahead_steps: usize,
    /// Per-axis displacement (pixels) at or below which the node is "there"
    dead_zone: f32,
}

impl DirectionResolver {
    /// Create a resolver. Negative dead zones are treated as zero.
    pub fn new(lookahead_steps: usize, dead_zone: f32) -> Self {
        Self {
            lookahead_steps,
            dead_zone: dead_zone.max(0.0),
        }
    }

    /// Waypoints looked ahead
    pub fn lookahead_steps(&self) -> usize {
        self.lookahead_steps
    }

    /// Dead zone in pixels
    pub fn dead_zone(&self) -> f32 {
        self.dead_zone
    }

    /// Look-ahead waypoint: `lookahead_steps` along the path, or the last one
    pub fn lookahead_target(&self, path: &[PixelPoint]) -> Option<PixelPoint> {
        let last = path.len().checked_sub(1)?;
        Some(path[self.lookahead_steps.min(last)])
    }

    /// Steering command for an indicator at `current` following `path`.
    ///
    /// An empty path has no route and yields BLOCKED. A single-waypoint
    /// path means the indicator already sits on the exit cell: STOP.
    pub fn resolve(&self, current: PixelPoint, path: &[PixelPoint]) -> Direction {
        let Some(target) = self.lookahead_target(path) else {
            return Direction::Blocked;
        };
        if path.len() == 1 {
            return Direction::Stop;
        }

        let dx = target.x - current.x;
        let dy = target.y - current.y;

        if dx.abs() <= self.dead_zone && dy.abs() <= self.dead_zone {
            Direction::Stop
        } else if dx.abs() >= dy.abs() {
            if dx > 0.0 {
                Direction::Right
            } else {
                Direction::Left
            }
        } else if dy > 0.0 {
            Direction::Down
        } else {
            Direction::Up
        }
    }
}

impl Default for DirectionResolver {
    fn default() -> Self {
        Self::new(5, 5.0)
    }
}
