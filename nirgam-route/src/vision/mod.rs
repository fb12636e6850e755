//! Camera-frame understanding.
//!
//! ```text
//! raw frame ──► SceneCalibrator ──► rectified frame ──► FeatureExtractor
//!               (markers, warp)                         (hazard / exit boxes)
//! ```
//!
//! - [`color`]: 8-bit HSV conversion and range masks
//! - [`blobs`]: morphology cleanup and outer-contour blobs
//! - [`SceneCalibrator`]: boundary markers and rectification
//! - [`FeatureExtractor`]: hazard and exit regions

pub mod blobs;
mod calibration;
pub mod color;
mod features;

pub use calibration::{
    CalibrationMarkers, CalibrationSettings, Rectified, SceneCalibrator, order_corners,
};
pub use color::{Hsv, HsvRange};
pub use features::{FeatureExtractor, FeatureSettings};
