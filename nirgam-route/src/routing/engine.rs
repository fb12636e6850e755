//! Per-cycle routing orchestration.
//!
//! Every call to [`RoutingEngine::process`] rebuilds the grid from scratch:
//!
//! ```text
//! reset ─► static walls ─► hazards ─► exits ─► per node (name order):
//!                                              nearest exit path ─► direction
//! ```
//!
//! Nothing from a previous cycle survives, so identical inputs always give
//! identical outputs.

use image::RgbImage;
use log::{debug, info, warn};
use std::collections::BTreeMap;

use super::hazard::Hazard;
use super::layout::Layout;
use super::static_map::StaticMap;
use crate::core::{GridCoord, PixelPoint, PixelRect};
use crate::error::Result;
use crate::grid::OccupancyGrid;
use crate::guidance::{Direction, DirectionResolver};
use crate::pathfinding::{PathFailure, PathResult};
use crate::render;
use crate::vision::{
    CalibrationSettings, FeatureExtractor, FeatureSettings, SceneCalibrator,
};

/// Engine settings
#[derive(Clone, Debug)]
pub struct RouterConfig {
    /// Pixels per grid cell
    pub cell_size: u32,
    /// Radius for hazards that do not carry one (pixels)
    pub default_hazard_radius: f32,
    /// Side of the square registered around each exit (pixels)
    pub exit_box_size: u32,
    /// Path to direction conversion
    pub resolver: DirectionResolver,
    /// Boundary marker detection
    pub calibration: CalibrationSettings,
    /// Hazard and exit classification
    pub features: FeatureSettings,
    /// Size frames are rectified to; None uses the map size
    pub rectified_size: Option<(u32, u32)>,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            cell_size: 10,
            default_hazard_radius: 60.0,
            exit_box_size: 20,
            resolver: DirectionResolver::new(5, 5.0),
            calibration: CalibrationSettings::default(),
            features: FeatureSettings::default(),
            rectified_size: None,
        }
    }
}

/// Result of one routing cycle
#[derive(Clone, Debug, Default)]
pub struct RouteOutcome {
    /// One direction per guidance node, keyed by node name
    pub directions: BTreeMap<String, Direction>,
    /// Search result per guidance node
    pub paths: BTreeMap<String, PathResult>,
    /// Hazards injected this cycle, radius resolved
    pub hazards: Vec<Hazard>,
    /// Exit cells registered this cycle, in registration order
    pub exits: Vec<GridCoord>,
    /// Vision cycles only: whether the frame was rectified
    pub calibrated: Option<bool>,
}

impl RouteOutcome {
    /// Nodes that received BLOCKED
    pub fn blocked_nodes(&self) -> impl Iterator<Item = &str> {
        self.directions
            .iter()
            .filter(|(_, d)| **d == Direction::Blocked)
            .map(|(name, _)| name.as_str())
    }
}

/// Owns the grid and recomputes every node's direction per cycle.
///
/// Cycles take `&mut self`, so one engine never runs two cycles at once.
/// Independent engines can run in parallel.
pub struct RoutingEngine {
    config: RouterConfig,
    map: StaticMap,
    layout: Layout,
    grid: OccupancyGrid,
    calibrator: SceneCalibrator,
    extractor: FeatureExtractor,
}

impl RoutingEngine {
    /// Create an engine for `map`. Layout positions are rescaled to the map
    /// resolution.
    pub fn new(config: RouterConfig, map: StaticMap, layout: &Layout) -> Result<Self> {
        let grid = OccupancyGrid::new(map.width(), map.height(), config.cell_size)?;
        let layout = layout.scaled_to(map.width(), map.height());
        info!(
            "[Router] {} exits, {} nodes on {}x{} grid",
            layout.exits.len(),
            layout.nodes.len(),
            grid.cols(),
            grid.rows()
        );

        Ok(Self {
            calibrator: SceneCalibrator::new(config.calibration),
            extractor: FeatureExtractor::new(config.features.clone()),
            config,
            map,
            layout,
            grid,
        })
    }

    /// Layout at map resolution
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn map(&self) -> &StaticMap {
        &self.map
    }

    /// Grid as left by the last cycle
    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Run one cycle with the given hazards.
    pub fn process(&mut self, hazards: &[Hazard]) -> RouteOutcome {
        self.run_cycle(hazards, &[])
    }

    /// Run one cycle from a camera frame.
    ///
    /// The frame is rectified (falling back to the last calibration, then
    /// to the raw frame), hazards and exits are extracted, and detected
    /// exits are registered after the configured ones.
    pub fn process_frame(&mut self, frame: &RgbImage) -> RouteOutcome {
        let (out_w, out_h) = self
            .config
            .rectified_size
            .unwrap_or((self.map.width(), self.map.height()));
        let rectified = self.calibrator.rectify_or_raw(frame, out_w, out_h);

        let sx = self.map.width() as f32 / rectified.image.width().max(1) as f32;
        let sy = self.map.height() as f32 / rectified.image.height().max(1) as f32;
        let to_map = |r: PixelRect| {
            PixelRect::new(
                (r.x as f32 * sx) as i32,
                (r.y as f32 * sy) as i32,
                (r.width as f32 * sx) as i32,
                (r.height as f32 * sy) as i32,
            )
        };

        let hazards: Vec<Hazard> = self
            .extractor
            .detect_hazards(&rectified.image)
            .into_iter()
            .map(|r| Hazard::from_bounding_box(to_map(r)))
            .collect();
        let exits: Vec<PixelRect> = self
            .extractor
            .detect_exits(&rectified.image)
            .into_iter()
            .map(to_map)
            .collect();

        let mut outcome = self.run_cycle(&hazards, &exits);
        outcome.calibrated = Some(rectified.calibrated);
        outcome
    }

    /// Map image with hazards, exits, paths and directions drawn on it
    pub fn annotate(&self, outcome: &RouteOutcome) -> RgbImage {
        render::annotate(self.map.image(), &self.layout, &self.grid, outcome)
    }

    fn run_cycle(&mut self, hazards: &[Hazard], detected_exits: &[PixelRect]) -> RouteOutcome {
        let default_radius = self.config.default_hazard_radius;

        self.grid.reset();
        self.grid.load_static_mask(self.map.mask());

        let hazards: Vec<Hazard> = hazards.iter().map(|h| h.resolved(default_radius)).collect();
        for hazard in &hazards {
            self.grid.mark_region_blocked(hazard.rect(default_radius));
        }

        let half = self.config.exit_box_size as f32 / 2.0;
        for exit in &self.layout.exits {
            self.grid
                .register_exit(PixelRect::centered_square(exit.position(), half));
        }
        for rect in detected_exits {
            self.grid.register_exit(*rect);
        }

        let mut nodes: Vec<(&str, PixelPoint)> = self
            .layout
            .nodes
            .iter()
            .map(|n| (n.name.as_str(), n.position()))
            .collect();
        nodes.sort_by(|a, b| a.0.cmp(b.0));

        let mut outcome = RouteOutcome {
            hazards,
            exits: self.grid.exits().to_vec(),
            ..Default::default()
        };

        for (name, position) in nodes {
            let result = self.grid.nearest_exit_path(position);
            let direction = if result.is_success() {
                let d = self.config.resolver.resolve(position, &result.path_pixels);
                debug!(
                    "[Router] {} -> exit {:?} in {} steps: {}",
                    name,
                    result.exit_index,
                    result.steps(),
                    d
                );
                d
            } else {
                match result.failure_reason {
                    Some(PathFailure::StartBlocked) => {
                        warn!("[Router] {} StartInHazard: node cell is blocked", name)
                    }
                    Some(reason) => warn!("[Router] {} RouteUnreachable ({})", name, reason.code()),
                    None => warn!("[Router] {} RouteUnreachable", name),
                }
                Direction::Blocked
            };

            outcome.directions.insert(name.to_string(), direction);
            outcome.paths.insert(name.to_string(), result);
        }

        let blocked = outcome.blocked_nodes().count();
        info!(
            "[Router] cycle: {} hazards, {} exits, {}/{} nodes routed",
            outcome.hazards.len(),
            outcome.exits.len(),
            outcome.directions.len() - blocked,
            outcome.directions.len()
        );
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::NamedPoint;
    use image::{DynamicImage, GrayImage, Luma};

    /// 100x100 open floor with a wall band across row 50..60 except a
    /// doorway at x 40..60
    fn corridor_map() -> StaticMap {
        let gray = GrayImage::from_fn(100, 100, |x, y| {
            let wall = (50..60).contains(&y) && !(40..60).contains(&x);
            Luma([if wall { 255 } else { 0 }])
        });
        StaticMap::from_image(&DynamicImage::ImageLuma8(gray), 60)
    }

    fn layout() -> Layout {
        Layout {
            width: 100,
            height: 100,
            exits: vec![NamedPoint::new("Exit_A", 95, 95)],
            nodes: vec![
                NamedPoint::new("N2", 5, 5),
                NamedPoint::new("N1", 85, 85),
            ],
        }
    }

    fn engine() -> RoutingEngine {
        let config = RouterConfig {
            default_hazard_radius: 10.0,
            resolver: DirectionResolver::new(5, 5.0),
            ..Default::default()
        };
        RoutingEngine::new(config, corridor_map(), &layout()).unwrap()
    }

    #[test]
    fn test_every_node_gets_a_direction() {
        let mut engine = engine();
        let outcome = engine.process(&[]);

        assert_eq!(outcome.directions.len(), 2);
        assert_eq!(
            outcome.directions.keys().collect::<Vec<_>>(),
            vec!["N1", "N2"]
        );
        assert!(outcome.directions.values().all(|d| d.is_movement()));
        assert_eq!(outcome.exits, vec![GridCoord::new(9, 9)]);
    }

    #[test]
    fn test_hazard_in_doorway_blocks_far_node() {
        let mut engine = engine();
        let outcome = engine.process(&[Hazard::at(50.0, 55.0)]);

        assert_eq!(outcome.directions["N2"], Direction::Blocked);
        assert!(outcome.directions["N1"].is_movement());
        assert_eq!(
            outcome.paths["N2"].failure_reason,
            Some(PathFailure::NoPath)
        );
        assert_eq!(outcome.hazards[0].radius, Some(10.0));
    }

    #[test]
    fn test_hazard_on_node_is_blocked() {
        let mut engine = engine();
        let outcome = engine.process(&[Hazard::with_radius(85.0, 85.0, 5.0)]);
        assert_eq!(outcome.directions["N1"], Direction::Blocked);
        assert_eq!(
            outcome.paths["N1"].failure_reason,
            Some(PathFailure::StartBlocked)
        );
    }

    #[test]
    fn test_cycles_do_not_leak_hazards() {
        let mut engine = engine();
        let clear = engine.process(&[]);
        engine.process(&[Hazard::at(50.0, 55.0)]);
        let again = engine.process(&[]);
        assert_eq!(clear.directions, again.directions);
    }

    #[test]
    fn test_process_frame_without_markers_uses_raw_frame() {
        let mut engine = engine();
        let frame = RgbImage::from_pixel(100, 100, image::Rgb([200, 200, 200]));
        let outcome = engine.process_frame(&frame);
        assert_eq!(outcome.calibrated, Some(false));
        assert!(outcome.hazards.is_empty());
        assert_eq!(outcome.directions.len(), 2);
    }

    #[test]
    fn test_layout_scaled_to_map() {
        let mut reference = layout();
        reference.width = 200;
        reference.height = 200;
        let engine = RoutingEngine::new(RouterConfig::default(), corridor_map(), &reference).unwrap();
        assert_eq!(engine.layout().exits[0], NamedPoint::new("Exit_A", 47, 47));
    }
}
