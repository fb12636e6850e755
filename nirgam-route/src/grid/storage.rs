//! Occupancy grid storage.
//!
//! A flat row-major array of cell states sized from the map's pixel
//! dimensions, plus the set of registered exit cells.

use image::GrayImage;
use log::{debug, trace};

use crate::core::{CellState, GridCoord, PixelPoint, PixelRect};
use crate::error::{Error, Result};

/// Discretized occupancy map over the map image.
///
/// The grid uses the image coordinate system:
/// - (0, 0) is the top-left cell
/// - Positive X is to the right, positive Y is down
/// - Cell (x, y) covers pixels `[x*cell_size, (x+1)*cell_size)` horizontally
///   and `[y*cell_size, (y+1)*cell_size)` vertically
///
/// Pixel lookups are clamped into `[0, cols-1] x [0, rows-1]`, so every
/// pixel (even outside the image) maps to exactly one cell.
#[derive(Clone, Debug)]
pub struct OccupancyGrid {
    /// Cell states (CellState as u8: Free=0, Blocked=1)
    cells: Vec<u8>,
    /// Registered exit cells, in registration order, deduplicated
    exits: Vec<GridCoord>,

    /// Grid width in cells
    cols: usize,
    /// Grid height in cells
    rows: usize,
    /// Pixels per cell side
    cell_size: u32,
    /// Map width in pixels
    width: u32,
    /// Map height in pixels
    height: u32,
}

impl OccupancyGrid {
    /// Create a grid for a `width x height` pixel map.
    ///
    /// `cols = width / cell_size`, `rows = height / cell_size` (floor).
    /// Fails when the cell size is zero or the map is smaller than one cell.
    pub fn new(width: u32, height: u32, cell_size: u32) -> Result<Self> {
        if cell_size == 0 {
            return Err(Error::InvalidConfig("cell size must be positive".into()));
        }
        let cols = (width / cell_size) as usize;
        let rows = (height / cell_size) as usize;
        if cols == 0 || rows == 0 {
            return Err(Error::InvalidConfig(format!(
                "map {}x{} is smaller than one {}px cell",
                width, height, cell_size
            )));
        }

        debug!(
            "[Grid] new {}x{} cells ({}x{} px, cell {}px)",
            cols, rows, width, height, cell_size
        );

        Ok(Self {
            cells: vec![CellState::Free as u8; cols * rows],
            exits: Vec::new(),
            cols,
            rows,
            cell_size,
            width,
            height,
        })
    }

    /// Grid width in cells
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Grid height in cells
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Pixels per cell side
    #[inline]
    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Map size in pixels (width, height)
    #[inline]
    pub fn pixel_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Total number of cells
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cols * self.rows
    }

    /// Clear every cell to Free and forget all exits.
    pub fn reset(&mut self) {
        self.cells.fill(CellState::Free as u8);
        self.exits.clear();
    }

    /// Convert pixel coordinates to the containing cell, clamped to the grid
    #[inline]
    pub fn pixel_to_grid(&self, point: PixelPoint) -> GridCoord {
        let cs = self.cell_size as f32;
        let gx = (point.x / cs).floor() as i64;
        let gy = (point.y / cs).floor() as i64;
        GridCoord::new(
            gx.clamp(0, self.cols as i64 - 1) as i32,
            gy.clamp(0, self.rows as i64 - 1) as i32,
        )
    }

    /// Convert grid coordinates to the cell's centre pixel
    #[inline]
    pub fn grid_to_pixel(&self, coord: GridCoord) -> PixelPoint {
        let cs = self.cell_size as i32;
        PixelPoint::new(
            (coord.x * cs + cs / 2) as f32,
            (coord.y * cs + cs / 2) as f32,
        )
    }

    /// Check if grid coordinates are within bounds
    #[inline]
    pub fn is_valid_coord(&self, coord: GridCoord) -> bool {
        coord.x >= 0 && coord.y >= 0 && (coord.x as usize) < self.cols && (coord.y as usize) < self.rows
    }

    /// Convert grid coordinates to flat array index
    #[inline]
    pub fn coord_to_index(&self, coord: GridCoord) -> Option<usize> {
        if self.is_valid_coord(coord) {
            Some(coord.y as usize * self.cols + coord.x as usize)
        } else {
            None
        }
    }

    /// Cell state at grid coordinates (None if out of bounds)
    #[inline]
    pub fn get(&self, coord: GridCoord) -> Option<CellState> {
        self.coord_to_index(coord)
            .map(|i| CellState::from_u8(self.cells[i]))
    }

    /// Is the cell inside the grid and walkable?
    #[inline]
    pub fn is_free(&self, coord: GridCoord) -> bool {
        self.get(coord).is_some_and(CellState::is_free)
    }

    /// Set cell state at grid coordinates.
    /// Returns true if the state changed
    #[inline]
    pub fn set(&mut self, coord: GridCoord, state: CellState) -> bool {
        match self.coord_to_index(coord) {
            Some(i) => {
                let changed = self.cells[i] != state as u8;
                self.cells[i] = state as u8;
                changed
            }
            None => false,
        }
    }

    /// Mark every cell touched by the pixel rectangle as Blocked.
    ///
    /// The rectangle is sampled every `cell_size` pixels starting at its
    /// top-left corner; each sample is clamped into the grid. Rectangles
    /// partly or fully outside the map are clamped, never rejected.
    ///
    /// Returns the number of cells that changed from Free to Blocked.
    pub fn mark_region_blocked(&mut self, rect: PixelRect) -> usize {
        let step = self.cell_size as i64;
        let xs = axis_samples(rect.x as i64, rect.width as i64, step, self.width as i64);
        let ys = axis_samples(rect.y as i64, rect.height as i64, step, self.height as i64);
        let mut changed = 0;

        for &px in &xs {
            for &py in &ys {
                let coord = self.pixel_to_grid(PixelPoint::new(px as f32, py as f32));
                if self.set(coord, CellState::Blocked) {
                    changed += 1;
                }
            }
        }

        trace!(
            "[Grid] blocked region ({}, {}, {}x{}): {} cells changed",
            rect.x, rect.y, rect.width, rect.height, changed
        );
        changed
    }

    /// Block cells whose centre pixel is marked in the static obstacle mask.
    ///
    /// Any nonzero mask pixel is an obstacle (wall, shop). Samples falling
    /// outside the mask are clamped to its border.
    pub fn load_static_mask(&mut self, mask: &GrayImage) -> usize {
        let (mask_w, mask_h) = mask.dimensions();
        if mask_w == 0 || mask_h == 0 {
            return 0;
        }

        let mut blocked = 0;
        for row in 0..self.rows {
            for col in 0..self.cols {
                let coord = GridCoord::new(col as i32, row as i32);
                let center = self.grid_to_pixel(coord);
                let px = (center.x as u32).min(mask_w - 1);
                let py = (center.y as u32).min(mask_h - 1);
                if mask.get_pixel(px, py).0[0] > 0 {
                    self.set(coord, CellState::Blocked);
                    blocked += 1;
                }
            }
        }

        debug!("[Grid] static mask blocked {} of {} cells", blocked, self.cell_count());
        blocked
    }

    /// Register an exit from its pixel bounding box.
    ///
    /// The box centre is converted to a cell; the exit is added only if no
    /// exit already occupies that cell. Returns true if it was added.
    pub fn register_exit(&mut self, rect: PixelRect) -> bool {
        let coord = self.pixel_to_grid(rect.center());
        if self.exits.contains(&coord) {
            return false;
        }
        self.exits.push(coord);
        true
    }

    /// Registered exit cells in registration order
    #[inline]
    pub fn exits(&self) -> &[GridCoord] {
        &self.exits
    }

    /// Count cells by state
    pub fn count_by_state(&self) -> CellCounts {
        let blocked = self.cells.iter().filter(|&&c| c != 0).count();
        CellCounts {
            free: self.cells.len() - blocked,
            blocked,
        }
    }

    /// Render the grid as text (`.` free, `#` blocked, `E` exit), one row per line.
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity((self.cols + 1) * self.rows);
        for row in 0..self.rows {
            for col in 0..self.cols {
                let coord = GridCoord::new(col as i32, row as i32);
                if self.exits.contains(&coord) {
                    out.push('E');
                } else {
                    out.push(self.get(coord).unwrap_or_default().as_char());
                }
            }
            out.push('\n');
        }
        out
    }
}

/// Sample positions `start, start + step, ..` below `start + len`, clamped
/// into `[0, limit)`.
///
/// Samples past either border collapse onto that border pixel, so the
/// result never holds more than `limit / step + 2` entries.
fn axis_samples(start: i64, len: i64, step: i64, limit: i64) -> Vec<i64> {
    if len <= 0 || limit <= 0 {
        return Vec::new();
    }
    let end = start + len;
    let last = start + (len - 1) / step * step;

    let mut samples = Vec::new();
    if start < 0 {
        samples.push(0);
    }
    let mut p = if start < 0 {
        start + (-start + step - 1) / step * step
    } else {
        start
    };
    while p < end.min(limit) {
        samples.push(p);
        p += step;
    }
    if last >= limit {
        samples.push(limit - 1);
    }
    samples
}

/// Cell counts by state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CellCounts {
    /// Walkable cells
    pub free: usize,
    /// Blocked cells (walls and hazards)
    pub blocked: usize,
}

impl CellCounts {
    /// Total cells
    pub fn total(&self) -> usize {
        self.free + self.blocked
    }
}
