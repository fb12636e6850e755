//! Main NirgamConfig and conversion methods.

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

use super::grid::{DirectionSection, GridSection, HazardSection};
use super::layout::{LayoutSection, SensorSection};
use super::vision::VisionSection;
use crate::error::{Error, Result};
use crate::guidance::DirectionResolver;
use crate::routing::{Layout, RouterConfig};

/// Full configuration loaded from YAML
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct NirgamConfig {
    /// Grid settings
    #[serde(default)]
    pub grid: GridSection,

    /// Hazard settings
    #[serde(default)]
    pub hazards: HazardSection,

    /// Direction resolver settings
    #[serde(default)]
    pub direction: DirectionSection,

    /// Color thresholds and rectification
    #[serde(default)]
    pub vision: VisionSection,

    /// Exit and guidance-node positions
    #[serde(default)]
    pub layout: LayoutSection,

    /// Live-sensor index mapping
    #[serde(default)]
    pub sensor: SensorSection,
}

impl NirgamConfig {
    /// Load and validate configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&contents)?;
        debug!("[Config] loaded {}", path.display());
        Ok(config)
    }

    /// Load from default config path (configs/nirgam.yaml)
    pub fn load_default() -> Result<Self> {
        let path = Path::new("configs/nirgam.yaml");
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse and validate a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Check cross-field invariants
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(Error::InvalidConfig(msg));

        if self.grid.cell_size == 0 {
            return invalid("grid.cell_size must be positive".into());
        }
        if self.hazards.default_radius < 0.0 {
            return invalid("hazards.default_radius must not be negative".into());
        }
        if self.direction.lookahead_steps == 0 {
            return invalid("direction.lookahead_steps must be at least 1".into());
        }
        if self.direction.dead_zone_cells < 0.0 {
            return invalid("direction.dead_zone_cells must not be negative".into());
        }

        let ranges = std::iter::once(&self.vision.marker).chain(&self.vision.hazard);
        if let Some(r) = ranges.into_iter().find(|r| !r.is_ordered()) {
            return invalid(format!("HSV range {:?}..{:?} is inverted", r.lower, r.upper));
        }
        if self.vision.hazard.is_empty() {
            return invalid("vision.hazard needs at least one range".into());
        }

        if self.layout.reference_width == 0 || self.layout.reference_height == 0 {
            return invalid("layout reference size must be positive".into());
        }
        let mut names = BTreeSet::new();
        for node in &self.layout.nodes {
            if !names.insert(node.name.as_str()) {
                return invalid(format!("duplicate guidance node {}", node.name));
            }
        }
        if let Some(name) = self.sensor.nodes.values().find(|n| !names.contains(n.as_str())) {
            return invalid(format!("sensor maps to unknown node {}", name));
        }

        Ok(())
    }

    /// Convert to the routing engine settings
    pub fn to_router_config(&self) -> RouterConfig {
        RouterConfig {
            cell_size: self.grid.cell_size,
            default_hazard_radius: self.hazards.default_radius,
            exit_box_size: self.grid.exit_box_size,
            resolver: self.direction_resolver(),
            calibration: self.vision.to_calibration_settings(),
            features: self.vision.to_feature_settings(),
            rectified_size: self.vision.rectified_size(),
        }
    }

    /// Resolver with the dead zone converted to pixels
    pub fn direction_resolver(&self) -> DirectionResolver {
        DirectionResolver::new(
            self.direction.lookahead_steps,
            self.direction.dead_zone_cells * self.grid.cell_size as f32,
        )
    }

    /// Layout at the reference resolution
    pub fn to_layout(&self) -> Layout {
        self.layout.to_layout()
    }
}
