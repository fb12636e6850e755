//! Boundary-marker calibration.
//!
//! Four colored markers sit at the corners of the monitored area. Finding
//! them in a camera frame gives the quadrilateral that is warped onto the
//! canonical map rectangle.

use image::{Rgb, RgbImage};
use imageproc::geometric_transformations::{Interpolation, Projection, warp_into};
use log::{debug, warn};

use super::blobs::{clean_mask, extract_blobs};
use super::color::{HsvRange, mask_in_ranges};
use crate::core::PixelPoint;
use crate::error::CalibrationError;

/// Twice the triangle area (square pixels) below which three markers count
/// as collinear.
const COLLINEAR_EPSILON: f32 = 1e-3;

/// Marker detection thresholds
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CalibrationSettings {
    /// Marker color band
    pub marker_range: HsvRange,
    /// Square morphology kernel side (pixels)
    pub kernel: u8,
    /// Minimum marker blob area (square pixels)
    pub min_area: f64,
}

impl Default for CalibrationSettings {
    fn default() -> Self {
        Self {
            marker_range: HsvRange::new([90, 50, 50], [140, 255, 255]),
            kernel: 5,
            min_area: 100.0,
        }
    }
}

/// Marker centroids in corner order
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CalibrationMarkers {
    pub top_left: PixelPoint,
    pub top_right: PixelPoint,
    pub bottom_right: PixelPoint,
    pub bottom_left: PixelPoint,
}

impl CalibrationMarkers {
    /// Corners as TL, TR, BR, BL
    pub fn as_array(&self) -> [PixelPoint; 4] {
        [self.top_left, self.top_right, self.bottom_right, self.bottom_left]
    }
}

/// Assign four points to corners by coordinate sums and differences.
///
/// TL has the smallest `x + y`, BR the largest; TR has the largest `x - y`,
/// BL the smallest. Valid for a convex quad rotated less than 45 degrees.
pub fn order_corners(points: [PixelPoint; 4]) -> CalibrationMarkers {
    let sum = |p: &PixelPoint| p.x + p.y;
    let diff = |p: &PixelPoint| p.x - p.y;

    CalibrationMarkers {
        top_left: extreme(&points, sum, false),
        top_right: extreme(&points, diff, true),
        bottom_right: extreme(&points, sum, true),
        bottom_left: extreme(&points, diff, false),
    }
}

fn extreme(points: &[PixelPoint; 4], key: impl Fn(&PixelPoint) -> f32, largest: bool) -> PixelPoint {
    let mut best = points[0];
    for p in &points[1..] {
        let better = if largest {
            key(p) > key(&best)
        } else {
            key(p) < key(&best)
        };
        if better {
            best = *p;
        }
    }
    best
}

/// Projection taking the marker quad onto the output rectangle corners.
///
/// None when three markers are collinear or the transform is singular.
fn marker_projection(markers: &CalibrationMarkers, out_width: u32, out_height: u32) -> Option<Projection> {
    let corners = markers.as_array();
    if has_collinear_triple(&corners) {
        return None;
    }

    let right = out_width.saturating_sub(1) as f32;
    let bottom = out_height.saturating_sub(1) as f32;
    let from = corners.map(|p| (p.x, p.y));
    let to = [(0.0, 0.0), (right, 0.0), (right, bottom), (0.0, bottom)];
    Projection::from_control_points(from, to)
}

fn has_collinear_triple(pts: &[PixelPoint; 4]) -> bool {
    const TRIPLES: [(usize, usize, usize); 4] = [(0, 1, 2), (0, 1, 3), (0, 2, 3), (1, 2, 3)];
    TRIPLES.iter().any(|&(i, j, k)| {
        let (a, b, c) = (pts[i], pts[j], pts[k]);
        let cross = (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x);
        cross.abs() < COLLINEAR_EPSILON
    })
}

/// Rectified frame plus whether a real calibration produced it
#[derive(Clone, Debug)]
pub struct Rectified {
    pub image: RgbImage,
    pub calibrated: bool,
}

/// Finds boundary markers and rectifies frames.
///
/// Remembers the markers of the last frame that calibrated successfully so
/// a frame with occluded markers can still be rectified.
#[derive(Clone, Debug, Default)]
pub struct SceneCalibrator {
    settings: CalibrationSettings,
    last: Option<CalibrationMarkers>,
}

impl SceneCalibrator {
    pub fn new(settings: CalibrationSettings) -> Self {
        Self {
            settings,
            last: None,
        }
    }

    /// Markers from the last successful calibration
    pub fn last_markers(&self) -> Option<&CalibrationMarkers> {
        self.last.as_ref()
    }

    /// Locate the four boundary markers in a frame.
    ///
    /// The four largest qualifying blobs are kept; fewer than four is a
    /// failure.
    pub fn detect_boundary_markers(
        &self,
        frame: &RgbImage,
    ) -> Result<CalibrationMarkers, CalibrationError> {
        let mask = mask_in_ranges(frame, &[self.settings.marker_range]);
        let mask = clean_mask(&mask, self.settings.kernel);

        let mut blobs: Vec<_> = extract_blobs(&mask, self.settings.min_area)
            .into_iter()
            .filter(|b| b.centroid.is_some())
            .collect();
        blobs.sort_by(|a, b| b.area.total_cmp(&a.area));

        let centroids: Vec<PixelPoint> = blobs.iter().take(4).filter_map(|b| b.centroid).collect();
        let Ok(corners) = <[PixelPoint; 4]>::try_from(centroids) else {
            return Err(CalibrationError::MarkersNotFound { found: blobs.len() });
        };

        let markers = order_corners(corners);
        debug!("[Calib] markers {:?}", markers);
        Ok(markers)
    }

    /// Warp the frame so the markers land on the corners of an
    /// `out_width x out_height` image.
    ///
    /// Output pixels whose source falls outside the frame are black.
    pub fn rectify(
        &self,
        frame: &RgbImage,
        markers: &CalibrationMarkers,
        out_width: u32,
        out_height: u32,
    ) -> Result<RgbImage, CalibrationError> {
        let projection = marker_projection(markers, out_width, out_height)
            .ok_or(CalibrationError::DegenerateHomography)?;

        let mut out = RgbImage::new(out_width, out_height);
        warp_into(frame, &projection, Interpolation::Bilinear, Rgb([0, 0, 0]), &mut out);
        Ok(out)
    }

    /// Detect markers and remember them on success.
    pub fn calibrate(&mut self, frame: &RgbImage) -> Result<CalibrationMarkers, CalibrationError> {
        let markers = self.detect_boundary_markers(frame)?;
        self.last = Some(markers);
        Ok(markers)
    }

    /// Rectify with this frame's markers, else the remembered ones, else
    /// hand back the raw frame uncalibrated.
    pub fn rectify_or_raw(&mut self, frame: &RgbImage, out_width: u32, out_height: u32) -> Rectified {
        if let Err(e) = self.calibrate(frame) {
            warn!("[Calib] {}", e);
        }

        if let Some(markers) = self.last {
            match self.rectify(frame, &markers, out_width, out_height) {
                Ok(image) => return Rectified { image, calibrated: true },
                Err(e) => warn!("[Calib] {}", e),
            }
        }

        warn!("[Calib] no usable calibration, using raw frame");
        Rectified {
            image: frame.clone(),
            calibrated: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_with_squares(w: u32, h: u32, centers: &[(u32, u32)], half: u32) -> RgbImage {
        RgbImage::from_fn(w, h, |x, y| {
            let hit = centers
                .iter()
                .any(|&(cx, cy)| x + half >= cx && x < cx + half && y + half >= cy && y < cy + half);
            if hit { Rgb([0, 0, 255]) } else { Rgb([255, 255, 255]) }
        })
    }

    #[test]
    fn test_order_corners_axis_aligned() {
        let pts = [
            PixelPoint::new(90.0, 90.0),
            PixelPoint::new(10.0, 10.0),
            PixelPoint::new(10.0, 90.0),
            PixelPoint::new(90.0, 10.0),
        ];
        let m = order_corners(pts);
        assert_eq!(m.top_left, PixelPoint::new(10.0, 10.0));
        assert_eq!(m.top_right, PixelPoint::new(90.0, 10.0));
        assert_eq!(m.bottom_right, PixelPoint::new(90.0, 90.0));
        assert_eq!(m.bottom_left, PixelPoint::new(10.0, 90.0));
    }

    #[test]
    fn test_detect_markers() {
        let frame = frame_with_squares(200, 160, &[(30, 30), (170, 25), (175, 130), (25, 135)], 10);
        let calib = SceneCalibrator::default();
        let m = calib.detect_boundary_markers(&frame).unwrap();

        assert!(m.top_left.distance(&PixelPoint::new(29.5, 29.5)) < 1.5);
        assert!(m.top_right.distance(&PixelPoint::new(169.5, 24.5)) < 1.5);
        assert!(m.bottom_right.distance(&PixelPoint::new(174.5, 129.5)) < 1.5);
        assert!(m.bottom_left.distance(&PixelPoint::new(24.5, 134.5)) < 1.5);
    }

    #[test]
    fn test_too_few_markers() {
        let frame = frame_with_squares(200, 160, &[(30, 30), (170, 25), (175, 130)], 10);
        let calib = SceneCalibrator::default();
        assert_eq!(
            calib.detect_boundary_markers(&frame),
            Err(CalibrationError::MarkersNotFound { found: 3 })
        );
    }

    #[test]
    fn test_rectify_degenerate() {
        let p = PixelPoint::new(5.0, 5.0);
        let markers = CalibrationMarkers {
            top_left: p,
            top_right: p,
            bottom_right: p,
            bottom_left: p,
        };
        let frame = RgbImage::new(20, 20);
        let calib = SceneCalibrator::default();
        assert_eq!(
            calib.rectify(&frame, &markers, 10, 10),
            Err(CalibrationError::DegenerateHomography)
        );
    }

    #[test]
    fn test_rectify_collinear_markers() {
        let markers = CalibrationMarkers {
            top_left: PixelPoint::new(0.0, 0.0),
            top_right: PixelPoint::new(5.0, 5.0),
            bottom_right: PixelPoint::new(10.0, 10.0),
            bottom_left: PixelPoint::new(0.0, 10.0),
        };
        let frame = RgbImage::new(20, 20);
        assert_eq!(
            SceneCalibrator::default().rectify(&frame, &markers, 10, 10),
            Err(CalibrationError::DegenerateHomography)
        );
    }

    #[test]
    fn test_rectify_translation() {
        let frame = RgbImage::from_fn(20, 20, |x, y| {
            if x == 5 && y == 7 {
                Rgb([200, 100, 50])
            } else {
                Rgb([0, 0, 0])
            }
        });
        // Quad offset by (2, 3) onto a 10x10 output
        let markers = CalibrationMarkers {
            top_left: PixelPoint::new(2.0, 3.0),
            top_right: PixelPoint::new(11.0, 3.0),
            bottom_right: PixelPoint::new(11.0, 12.0),
            bottom_left: PixelPoint::new(2.0, 12.0),
        };
        let out = SceneCalibrator::default()
            .rectify(&frame, &markers, 10, 10)
            .unwrap();

        assert_eq!(out.dimensions(), (10, 10));
        let moved = out.get_pixel(3, 4).0;
        for (got, want) in moved.iter().zip([200u8, 100, 50]) {
            assert!(got.abs_diff(want) <= 2, "{:?}", moved);
        }
        assert!(out.get_pixel(7, 7).0.iter().all(|&c| c <= 2));
    }

    #[test]
    fn test_rectify_outside_frame_is_black() {
        let frame = RgbImage::from_pixel(20, 20, Rgb([255, 255, 255]));
        // Markers span the right half; the output's right part samples past the edge
        let markers = CalibrationMarkers {
            top_left: PixelPoint::new(10.0, 0.0),
            top_right: PixelPoint::new(29.0, 0.0),
            bottom_right: PixelPoint::new(29.0, 19.0),
            bottom_left: PixelPoint::new(10.0, 19.0),
        };
        let out = SceneCalibrator::default()
            .rectify(&frame, &markers, 20, 20)
            .unwrap();

        assert!(out.get_pixel(2, 10).0.iter().all(|&c| c >= 250));
        assert_eq!(out.get_pixel(17, 10), &Rgb([0, 0, 0]));
    }

    #[test]
    fn test_calibration_memory() {
        let good = frame_with_squares(200, 160, &[(30, 30), (170, 30), (170, 130), (30, 130)], 10);
        let blank = RgbImage::from_pixel(200, 160, Rgb([255, 255, 255]));

        let mut calib = SceneCalibrator::default();
        let raw = calib.rectify_or_raw(&blank, 100, 80);
        assert!(!raw.calibrated);
        assert_eq!(raw.image.dimensions(), (200, 160));

        assert!(calib.rectify_or_raw(&good, 100, 80).calibrated);
        let remembered = calib.rectify_or_raw(&blank, 100, 80);
        assert!(remembered.calibrated);
        assert_eq!(remembered.image.dimensions(), (100, 80));
        assert!(calib.last_markers().is_some());
    }
}
