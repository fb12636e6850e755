//! Vision configuration section.

use serde::{Deserialize, Serialize};

use super::defaults;
use crate::vision::{CalibrationSettings, FeatureSettings, HsvRange};

/// Color classification and calibration thresholds
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VisionSection {
    /// Boundary marker color band
    #[serde(default = "defaults::marker_range")]
    pub marker: HsvRange,

    /// Hazard color bands (hue wraps around red)
    #[serde(default = "defaults::hazard_ranges")]
    pub hazard: Vec<HsvRange>,

    /// Brightness at or below which a pixel is exit signage
    #[serde(default = "defaults::exit_max_value")]
    pub exit_max_value: u8,

    #[serde(default = "defaults::marker_min_area")]
    pub marker_min_area: f64,

    #[serde(default = "defaults::feature_min_area")]
    pub hazard_min_area: f64,

    #[serde(default = "defaults::feature_min_area")]
    pub exit_min_area: f64,

    /// Morphology kernel sides (pixels)
    #[serde(default = "defaults::marker_kernel")]
    pub marker_kernel: u8,

    #[serde(default = "defaults::hazard_kernel")]
    pub hazard_kernel: u8,

    #[serde(default = "defaults::exit_kernel")]
    pub exit_kernel: u8,

    /// Rectified frame size; the map size when unset
    #[serde(default)]
    pub output_width: Option<u32>,

    #[serde(default)]
    pub output_height: Option<u32>,
}

impl Default for VisionSection {
    fn default() -> Self {
        Self {
            marker: defaults::marker_range(),
            hazard: defaults::hazard_ranges(),
            exit_max_value: defaults::exit_max_value(),
            marker_min_area: defaults::marker_min_area(),
            hazard_min_area: defaults::feature_min_area(),
            exit_min_area: defaults::feature_min_area(),
            marker_kernel: defaults::marker_kernel(),
            hazard_kernel: defaults::hazard_kernel(),
            exit_kernel: defaults::exit_kernel(),
            output_width: None,
            output_height: None,
        }
    }
}

impl VisionSection {
    pub fn to_calibration_settings(&self) -> CalibrationSettings {
        CalibrationSettings {
            marker_range: self.marker,
            kernel: self.marker_kernel,
            min_area: self.marker_min_area,
        }
    }

    pub fn to_feature_settings(&self) -> FeatureSettings {
        FeatureSettings {
            hazard_ranges: self.hazard.clone(),
            hazard_kernel: self.hazard_kernel,
            hazard_min_area: self.hazard_min_area,
            exit_max_value: self.exit_max_value,
            exit_kernel: self.exit_kernel,
            exit_min_area: self.exit_min_area,
        }
    }

    /// Rectified size when both dimensions are set
    pub fn rectified_size(&self) -> Option<(u32, u32)> {
        self.output_width.zip(self.output_height)
    }
}
