//! Hazard and exit extraction by color signature.
//!
//! Both detectors are pure functions of the frame. Boxes are returned in
//! reading order (top to bottom, then left to right).

use image::RgbImage;
use log::debug;

use super::blobs::{clean_mask, extract_blobs};
use super::color::{HsvRange, mask_in_ranges};
use crate::core::PixelRect;

/// Thresholds for hazard and exit classification
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureSettings {
    /// Hazard color bands (hue wraps, so usually two)
    pub hazard_ranges: Vec<HsvRange>,
    pub hazard_kernel: u8,
    pub hazard_min_area: f64,
    /// Pixels at or below this brightness count as exit signage
    pub exit_max_value: u8,
    pub exit_kernel: u8,
    pub exit_min_area: f64,
}

impl Default for FeatureSettings {
    fn default() -> Self {
        Self {
            hazard_ranges: vec![
                HsvRange::new([0, 100, 100], [10, 255, 255]),
                HsvRange::new([160, 100, 100], [179, 255, 255]),
            ],
            hazard_kernel: 5,
            hazard_min_area: 200.0,
            exit_max_value: 60,
            exit_kernel: 3,
            exit_min_area: 200.0,
        }
    }
}

/// Classifies rectified frames into hazard and exit regions
#[derive(Clone, Debug, Default)]
pub struct FeatureExtractor {
    settings: FeatureSettings,
}

impl FeatureExtractor {
    pub fn new(settings: FeatureSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &FeatureSettings {
        &self.settings
    }

    /// Bounding boxes of hazard-colored regions
    pub fn detect_hazards(&self, frame: &RgbImage) -> Vec<PixelRect> {
        let s = &self.settings;
        let boxes = regions(frame, &s.hazard_ranges, s.hazard_kernel, s.hazard_min_area);
        debug!("[Features] {} hazard regions", boxes.len());
        boxes
    }

    /// Bounding boxes of dark regions, whatever their hue
    pub fn detect_exits(&self, frame: &RgbImage) -> Vec<PixelRect> {
        let s = &self.settings;
        let dark = HsvRange::new([0, 0, 0], [179, 255, s.exit_max_value]);
        let boxes = regions(frame, &[dark], s.exit_kernel, s.exit_min_area);
        debug!("[Features] {} exit regions", boxes.len());
        boxes
    }
}

fn regions(frame: &RgbImage, ranges: &[HsvRange], kernel: u8, min_area: f64) -> Vec<PixelRect> {
    let mask = clean_mask(&mask_in_ranges(frame, ranges), kernel);
    let mut boxes: Vec<PixelRect> = extract_blobs(&mask, min_area)
        .into_iter()
        .map(|b| b.bbox)
        .collect();
    boxes.sort_by_key(|r| (r.y, r.x));
    boxes
}
