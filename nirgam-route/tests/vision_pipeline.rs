//! Vision pipeline on synthetic camera frames.

use image::{DynamicImage, GrayImage, Rgb, RgbImage};
use nirgam_route::vision::CalibrationSettings;
use nirgam_route::{
    Direction, FeatureExtractor, Layout, NamedPoint, PixelPoint, RouterConfig, RoutingEngine,
    SceneCalibrator, StaticMap,
};

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const MARKER: Rgb<u8> = Rgb([20, 40, 230]);
const FIRE: Rgb<u8> = Rgb([250, 30, 20]);
const SIGN: Rgb<u8> = Rgb([15, 15, 15]);

/// Fill the half-open box `[x0, x1) x [y0, y1)`, clipped to the frame
fn fill(frame: &mut RgbImage, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb<u8>) {
    for y in y0.max(0)..y1.min(frame.height() as i32) {
        for x in x0.max(0)..x1.min(frame.width() as i32) {
            frame.put_pixel(x as u32, y as u32, color);
        }
    }
}

/// White frame with a 24x24 marker centred on each point
fn frame_with_markers(width: u32, height: u32, corners: &[PixelPoint]) -> RgbImage {
    let mut frame = RgbImage::from_pixel(width, height, WHITE);
    for c in corners {
        let (cx, cy) = c.rounded();
        fill(&mut frame, cx - 12, cy - 12, cx + 12, cy + 12, MARKER);
    }
    frame
}

fn rotated_square(center: PixelPoint, half: f32, degrees: f32) -> [PixelPoint; 4] {
    let (s, c) = degrees.to_radians().sin_cos();
    // TL, TR, BR, BL before rotation
    [(-half, -half), (half, -half), (half, half), (-half, half)].map(|(x, y)| {
        PixelPoint::new(center.x + x * c - y * s, center.y + x * s + y * c)
    })
}

#[test]
fn test_corner_ordering_under_rotation() {
    let calibrator = SceneCalibrator::new(CalibrationSettings::default());

    for degrees in [0.0, 15.0, 30.0] {
        let corners = rotated_square(PixelPoint::new(200.0, 200.0), 100.0, degrees);
        let frame = frame_with_markers(400, 400, &corners);

        let markers = calibrator
            .detect_boundary_markers(&frame)
            .unwrap_or_else(|e| panic!("{} deg: {}", degrees, e));

        for (found, expected) in markers.as_array().iter().zip(corners.iter()) {
            assert!(
                found.distance(expected) < 2.0,
                "{} deg: found {:?}, expected {:?}",
                degrees,
                found,
                expected
            );
        }
    }
}

#[test]
fn test_missing_marker_fails_calibration() {
    let corners = rotated_square(PixelPoint::new(200.0, 200.0), 100.0, 0.0);
    let frame = frame_with_markers(400, 400, &corners[..3]);

    let mut calibrator = SceneCalibrator::default();
    assert!(calibrator.calibrate(&frame).is_err());
    assert!(calibrator.last_markers().is_none());
}

#[test]
fn test_rectified_features_land_in_map_frame() {
    let corners = rotated_square(PixelPoint::new(200.0, 200.0), 150.0, 0.0);
    let mut frame = frame_with_markers(400, 400, &corners);
    fill(&mut frame, 170, 170, 230, 230, FIRE);
    fill(&mut frame, 60, 300, 90, 330, SIGN);

    let calibrator = SceneCalibrator::default();
    let markers = calibrator.detect_boundary_markers(&frame).unwrap();
    // Marker quad spans ~300 px, so this is close to a pure translation
    let rectified = calibrator.rectify(&frame, &markers, 301, 301).unwrap();
    assert_eq!(rectified.dimensions(), (301, 301));

    let extractor = FeatureExtractor::default();
    let hazards = extractor.detect_hazards(&rectified);
    assert_eq!(hazards.len(), 1);
    let h = hazards[0];
    assert!((h.x - 120).abs() <= 2, "hazard x {}", h.x);
    assert!((h.y - 120).abs() <= 2, "hazard y {}", h.y);
    assert!((h.width - 60).abs() <= 2, "hazard width {}", h.width);

    let exits = extractor.detect_exits(&rectified);
    assert_eq!(exits.len(), 1);
    assert!((exits[0].x - 10).abs() <= 2, "exit x {}", exits[0].x);
    assert!((exits[0].y - 250).abs() <= 2, "exit y {}", exits[0].y);
}

#[test]
fn test_process_frame_routes_around_detected_fire() {
    let map = StaticMap::from_image(&DynamicImage::ImageLuma8(GrayImage::new(301, 301)), 60);
    let layout = Layout {
        width: 301,
        height: 301,
        exits: vec![NamedPoint::new("Exit", 295, 150)],
        nodes: vec![
            NamedPoint::new("in_fire", 150, 150),
            NamedPoint::new("clear", 20, 20),
        ],
    };
    let mut engine = RoutingEngine::new(RouterConfig::default(), map, &layout).unwrap();

    let corners = rotated_square(PixelPoint::new(200.0, 200.0), 150.0, 0.0);
    let mut frame = frame_with_markers(400, 400, &corners);
    fill(&mut frame, 170, 170, 230, 230, FIRE);

    let outcome = engine.process_frame(&frame);

    assert_eq!(outcome.calibrated, Some(true));
    assert_eq!(outcome.hazards.len(), 1);
    assert_eq!(outcome.directions["in_fire"], Direction::Blocked);
    assert!(outcome.directions["clear"].is_movement());

    let annotated = engine.annotate(&outcome);
    assert_eq!(annotated.dimensions(), (301, 301));
}
