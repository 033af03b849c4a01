use std::ops::Range;

use tracing::debug;

use crate::Coord;
use crate::Px;

/// The smallest a cell can be drawn, in pixels per cell.
pub const MIN_CELL_SIZE: Px = 1;

/// The largest a cell can be drawn, in pixels per cell.
pub const MAX_CELL_SIZE: Px = 32;

/// Mapping between screen pixels and logical grid cells.
///
/// The logical grid spans `grid_width * cell_size` by `grid_height *
/// cell_size` pixels; the viewport is a `view_width x view_height` window
/// into that space, positioned by `offset_x`/`offset_y` (pixels, measured
/// from the grid's top-left corner, never negative).
///
/// Every mutation re-clamps the offsets so the window never scrolls past the
/// grid's edge, and collapses them to 0 whenever the whole grid fits on
/// screen.
pub struct Viewport {
    /// Pixels per cell. Bounded by `MIN_CELL_SIZE..=MAX_CELL_SIZE`.
    cell_size: Px,

    offset_x: Px,
    offset_y: Px,

    /// Visible window size in pixels.
    view_width: Px,
    view_height: Px,

    /// Grid extent in cells. Fixed, mirrors the engine's dimensions.
    grid_height: Px,
    grid_width: Px,
}

impl Viewport {
    pub fn new(
        grid_height: usize,
        grid_width: usize,
        cell_size: Px,
        view_width: Px,
        view_height: Px,
    ) -> Self {
        let mut view = Self {
            cell_size: cell_size.clamp(MIN_CELL_SIZE, MAX_CELL_SIZE),
            offset_x: 0,
            offset_y: 0,
            view_width: view_width.max(0),
            view_height: view_height.max(0),
            grid_height: grid_height as Px,
            grid_width: grid_width as Px,
        };

        view.clamp_offsets();

        view
    }

    pub fn cell_size(&self) -> Px {
        self.cell_size
    }

    pub fn offsets(&self) -> (Px, Px) {
        (self.offset_x, self.offset_y)
    }

    pub fn view_width(&self) -> Px {
        self.view_width
    }

    pub fn view_height(&self) -> Px {
        self.view_height
    }

    /// Map a screen pixel to the `(row, col)` of the cell under it.
    ///
    /// The result may lie outside `0..height` / `0..width`; callers
    /// range-check before mutating the grid. Floor division keeps the
    /// mapping consistent for pixels left of or above the grid origin.
    pub fn screen_to_grid(&self, screen_x: Px, screen_y: Px) -> (Coord, Coord) {
        let col = (screen_x + self.offset_x).div_euclid(self.cell_size);
        let row = (screen_y + self.offset_y).div_euclid(self.cell_size);

        (row, col)
    }

    /// Map a cell's `(row, col)` to the screen pixel of its top-left corner.
    /// Inverse of [`Viewport::screen_to_grid`].
    pub fn grid_to_screen(&self, row: Coord, col: Coord) -> (Px, Px) {
        let screen_x = col * self.cell_size - self.offset_x;
        let screen_y = row * self.cell_size - self.offset_y;

        (screen_x, screen_y)
    }

    /// Shift the viewport by the given pixel deltas, then clamp.
    pub fn pan(&mut self, delta_x: Px, delta_y: Px) {
        self.offset_x = self.offset_x.saturating_add(delta_x);
        self.offset_y = self.offset_y.saturating_add(delta_y);

        self.clamp_offsets();
    }

    /// Change the cell size while keeping the grid point under the focus
    /// pixel visually stationary.
    ///
    /// The focus point's fractional grid coordinate is computed with the old
    /// cell size, then the offsets are re-derived from it at the new size.
    /// Offset clamping runs last and wins near the grid's edge, where focus
    /// stability cannot be honored without scrolling past the boundary.
    pub fn zoom_at(&mut self, focus_x: Px, focus_y: Px, new_cell_size: Px) {
        let new_cell_size = new_cell_size.clamp(MIN_CELL_SIZE, MAX_CELL_SIZE);

        if new_cell_size == self.cell_size {
            return;
        }

        // fractional grid coordinate under the focus pixel
        let grid_x = (focus_x + self.offset_x) as f64 / self.cell_size as f64;
        let grid_y = (focus_y + self.offset_y) as f64 / self.cell_size as f64;

        self.cell_size = new_cell_size;

        self.offset_x = (grid_x * new_cell_size as f64).round() as Px - focus_x;
        self.offset_y = (grid_y * new_cell_size as f64).round() as Px - focus_y;

        self.clamp_offsets();
    }

    /// Record a new visible window size and re-clamp the offsets against it.
    pub fn resize(&mut self, view_width: Px, view_height: Px) {
        debug!("viewport resized to {view_width}x{view_height}");

        self.view_width = view_width.max(0);
        self.view_height = view_height.max(0);

        self.clamp_offsets();
    }

    /// Clamp each offset to `[0, max(0, grid_extent_px - view_extent_px)]`.
    ///
    /// Idempotent. When the whole grid fits within the viewport, the offsets
    /// collapse to 0.
    pub fn clamp_offsets(&mut self) {
        let max_x = (self.grid_width * self.cell_size - self.view_width).max(0);
        let max_y = (self.grid_height * self.cell_size - self.view_height).max(0);

        self.offset_x = self.offset_x.clamp(0, max_x);
        self.offset_y = self.offset_y.clamp(0, max_y);
    }

    /// The `(rows, cols)` ranges of cells intersecting the visible window.
    pub fn visible_cells(&self) -> (Range<Coord>, Range<Coord>) {
        let left = self.offset_x / self.cell_size;
        let top = self.offset_y / self.cell_size;

        let right = self
            .grid_width
            .min((self.offset_x + self.view_width) / self.cell_size + 1);
        let bottom = self
            .grid_height
            .min((self.offset_y + self.view_height) / self.cell_size + 1);

        (top..bottom, left..right)
    }
}
