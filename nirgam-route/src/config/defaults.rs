//! Default value functions for serde deserialization.

use std::collections::BTreeMap;

use crate::routing::{Hazard, NamedPoint};
use crate::vision::HsvRange;

pub fn cell_size() -> u32 {
    10
}

pub fn wall_threshold() -> u8 {
    60
}

pub fn exit_box_size() -> u32 {
    20
}

pub fn hazard_radius() -> f32 {
    60.0
}

pub fn hazard_presets() -> BTreeMap<String, Hazard> {
    BTreeMap::from([
        ("left_corridor".to_string(), Hazard::at(180.0, 250.0)),
        ("central_hall".to_string(), Hazard::at(480.0, 250.0)),
        ("right_corridor".to_string(), Hazard::at(800.0, 300.0)),
        ("upper_corridor".to_string(), Hazard::at(480.0, 100.0)),
    ])
}

pub fn lookahead_steps() -> usize {
    5
}

pub fn dead_zone_cells() -> f32 {
    0.5
}

pub fn marker_range() -> HsvRange {
    HsvRange::new([90, 50, 50], [140, 255, 255])
}

pub fn hazard_ranges() -> Vec<HsvRange> {
    vec![
        HsvRange::new([0, 100, 100], [10, 255, 255]),
        HsvRange::new([160, 100, 100], [179, 255, 255]),
    ]
}

pub fn exit_max_value() -> u8 {
    60
}

pub fn marker_min_area() -> f64 {
    100.0
}

pub fn feature_min_area() -> f64 {
    200.0
}

pub fn marker_kernel() -> u8 {
    5
}

pub fn hazard_kernel() -> u8 {
    5
}

pub fn exit_kernel() -> u8 {
    3
}

pub fn reference_width() -> u32 {
    640
}

pub fn reference_height() -> u32 {
    480
}

pub fn layout_exits() -> Vec<NamedPoint> {
    vec![
        NamedPoint::new("Exit_1 (bottom-left)", 28, 366),
        NamedPoint::new("Exit_2 (bottom-right)", 560, 361),
        NamedPoint::new("Exit_3 (top)", 290, 19),
    ]
}

pub fn layout_nodes() -> Vec<NamedPoint> {
    vec![
        NamedPoint::new("LED_1 (top-right)", 548, 55),
        NamedPoint::new("LED_2 (bottom-centre)", 288, 360),
        NamedPoint::new("LED_3 (centre)", 286, 193),
        NamedPoint::new("LED_4 (left)", 29, 195),
    ]
}

pub fn sensor_nodes() -> BTreeMap<u8, String> {
    layout_nodes()
        .into_iter()
        .enumerate()
        .map(|(i, n)| (i as u8 + 1, n.name))
        .collect()
}
