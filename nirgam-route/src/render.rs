//! Annotated scene for operators.
//!
//! Draws one cycle's result onto a copy of the map: hazards as concentric
//! discs, exit cells, each node's routed path, and the node's direction as
//! an arrow (a cross when BLOCKED, a ring when STOP).

use image::{Rgb, RgbImage};
use imageproc::drawing::{
    draw_filled_circle_mut, draw_filled_rect_mut, draw_hollow_circle_mut, draw_line_segment_mut,
};
use imageproc::rect::Rect;

use crate::core::PixelPoint;
use crate::grid::OccupancyGrid;
use crate::guidance::Direction;
use crate::routing::{Layout, RouteOutcome};

const HAZARD_OUTER: Rgb<u8> = Rgb([255, 140, 0]);
const HAZARD_INNER: Rgb<u8> = Rgb([230, 30, 20]);
const HAZARD_CORE: Rgb<u8> = Rgb([255, 230, 60]);
const EXIT: Rgb<u8> = Rgb([0, 200, 80]);
const PATH: Rgb<u8> = Rgb([0, 200, 255]);
const NODE: Rgb<u8> = Rgb([40, 90, 255]);
const BLOCKED: Rgb<u8> = Rgb([255, 0, 0]);

/// Arrow shaft length in pixels
const ARROW_LEN: f32 = 18.0;
/// Node marker radius in pixels
const NODE_RADIUS: i32 = 5;

/// Draw `outcome` on a copy of `base`.
pub fn annotate(
    base: &RgbImage,
    layout: &Layout,
    grid: &OccupancyGrid,
    outcome: &RouteOutcome,
) -> RgbImage {
    let mut canvas = base.clone();
    // No disc needs to be wider than the canvas diagonal
    let (w, h) = canvas.dimensions();
    let max_radius = (w as f32).hypot(h as f32).ceil();

    for hazard in &outcome.hazards {
        let r = hazard.radius.unwrap_or(0.0);
        let center = hazard.center().rounded();
        for (scale, color) in [(1.0, HAZARD_OUTER), (0.6, HAZARD_INNER), (0.3, HAZARD_CORE)] {
            let radius = (r * scale).min(max_radius).round() as i32;
            if radius > 0 {
                draw_filled_circle_mut(&mut canvas, center, radius, color);
            }
        }
    }

    let cs = grid.cell_size();
    for exit in &outcome.exits {
        let rect = Rect::at(exit.x * cs as i32, exit.y * cs as i32).of_size(cs, cs);
        draw_filled_rect_mut(&mut canvas, rect, EXIT);
    }

    for path in outcome.paths.values() {
        for pair in path.path_pixels.windows(2) {
            draw_line_segment_mut(&mut canvas, (pair[0].x, pair[0].y), (pair[1].x, pair[1].y), PATH);
        }
    }

    for node in &layout.nodes {
        let Some(direction) = outcome.directions.get(&node.name) else {
            continue;
        };
        draw_direction(&mut canvas, node.position(), *direction);
    }

    canvas
}

fn draw_direction(canvas: &mut RgbImage, at: PixelPoint, direction: Direction) {
    let center = at.rounded();
    match direction.unit_vector() {
        Some((ux, uy)) => {
            draw_filled_circle_mut(canvas, center, NODE_RADIUS, NODE);
            let tip = (at.x + ux * ARROW_LEN, at.y + uy * ARROW_LEN);
            draw_line_segment_mut(canvas, (at.x, at.y), tip, NODE);
            // Arrow head: two strokes back from the tip, rotated +-45 degrees
            let back = ARROW_LEN / 3.0;
            for (px, py) in [(-uy, ux), (uy, -ux)] {
                let end = (tip.0 - (ux - px) * back, tip.1 - (uy - py) * back);
                draw_line_segment_mut(canvas, tip, end, NODE);
            }
        }
        None if direction == Direction::Stop => {
            draw_filled_circle_mut(canvas, center, NODE_RADIUS, EXIT);
            draw_hollow_circle_mut(canvas, center, NODE_RADIUS * 2, EXIT);
        }
        None => {
            let r = NODE_RADIUS as f32 * 1.5;
            draw_line_segment_mut(canvas, (at.x - r, at.y - r), (at.x + r, at.y + r), BLOCKED);
            draw_line_segment_mut(canvas, (at.x - r, at.y + r), (at.x + r, at.y - r), BLOCKED);
        }
    }
}
