//! Canvas-space and paper-space geometry.
//!
//! Both computations share the A4 aspect ratio. Canvas sizing works in whole
//! pixels so the drawing surface holds an exact number of cells; paper layout
//! works in millimeters with a single uniform cell size.

use serde::{Deserialize, Serialize};

use crate::PaperSize;

/// Long side over short side of an A-series sheet.
pub const PAPER_ASPECT_RATIO: f32 = 297.0 / 210.0;

/// Absolute cap on canvas width.
pub const MAX_CANVAS_WIDTH: f32 = 800.0;

/// Absolute cap on canvas height.
pub const MAX_CANVAS_HEIGHT: f32 = 600.0;

/// Horizontal room reserved around the canvas inside the viewport.
pub const VIEWPORT_WIDTH_INSET: f32 = 60.0;

/// Share of the viewport height the canvas may occupy.
pub const VIEWPORT_HEIGHT_FRACTION: f32 = 0.6;

/// Cell size used to derive a preferred canvas extent.
pub const NOMINAL_CELL_PX: f32 = 25.0;

/// Smallest on-screen cell.
pub const MIN_CELL_PX: u32 = 15;

/// Largest on-screen cell.
pub const MAX_CELL_PX: u32 = 30;

/// Default page margin for exports.
pub const DEFAULT_MARGIN_MM: f32 = 20.0;

/// Size of the area the canvas is laid out in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Width in logical pixels.
    pub width: f32,
    /// Height in logical pixels.
    pub height: f32,
}

impl Viewport {
    /// A viewport of the given size.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// A viewport that never constrains the canvas below its absolute caps.
    #[must_use]
    pub fn unconstrained() -> Self {
        Self {
            width: f32::INFINITY,
            height: f32::INFINITY,
        }
    }

    fn bounds(self) -> (f32, f32) {
        (
            (self.width - VIEWPORT_WIDTH_INSET).min(MAX_CANVAS_WIDTH),
            (self.height * VIEWPORT_HEIGHT_FRACTION).min(MAX_CANVAS_HEIGHT),
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::unconstrained()
    }
}

/// On-screen canvas size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasDimensions {
    /// Canvas width, always `cell_size * cols`.
    pub width: u32,
    /// Canvas height, always `cell_size * rows`.
    pub height: u32,
    /// Edge length of one cell.
    pub cell_size: u32,
}

/// Size the interactive canvas for a grid inside `viewport`.
///
/// The aspect-constrained box is computed first, the per-cell size is taken
/// from the tighter axis, floored to whole pixels and clamped to
/// [`MIN_CELL_PX`]..=[`MAX_CELL_PX`]. The returned extent is then rebuilt from
/// the cell size so no partial cell remains.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn canvas_dimensions(
    rows: usize,
    cols: usize,
    is_horizontal: bool,
    viewport: Viewport,
) -> CanvasDimensions {
    let (max_width, max_height) = viewport.bounds();
    let rows_f = rows.max(1) as f32;
    let cols_f = cols.max(1) as f32;

    let (width, height) = if is_horizontal {
        let mut width = max_width.min(cols_f * NOMINAL_CELL_PX);
        let mut height = width / PAPER_ASPECT_RATIO;
        if height > max_height {
            height = max_height;
            width = height * PAPER_ASPECT_RATIO;
        }
        (width, height)
    } else {
        let mut height = max_height.min(rows_f * NOMINAL_CELL_PX);
        let mut width = height / PAPER_ASPECT_RATIO;
        if width > max_width {
            width = max_width;
            height = width * PAPER_ASPECT_RATIO;
        }
        (width, height)
    };

    // f32::max/min discard NaN, so degenerate viewports land on the clamp.
    let raw = (width / cols_f).min(height / rows_f).floor();
    let cell_size = raw.max(MIN_CELL_PX as f32).min(MAX_CELL_PX as f32) as u32;

    CanvasDimensions {
        width: cell_size * cols as u32,
        height: cell_size * rows as u32,
        cell_size,
    }
}

/// Page and grid placement in millimeters, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaperLayout {
    /// Oriented page width.
    pub page_width: f32,
    /// Oriented page height.
    pub page_height: f32,
    /// Margin reserved on every side.
    pub margin: f32,
    /// Uniform cell edge length.
    pub cell_size: f32,
    /// Left edge of the grid.
    pub start_x: f32,
    /// Top edge of the grid.
    pub start_y: f32,
    /// Grid rows.
    pub rows: usize,
    /// Grid columns.
    pub cols: usize,
}

impl PaperLayout {
    /// Total grid width.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn grid_width(&self) -> f32 {
        self.cols as f32 * self.cell_size
    }

    /// Total grid height.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn grid_height(&self) -> f32 {
        self.rows as f32 * self.cell_size
    }

    /// Top-left corner of cell `(row, col)`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn cell_origin(&self, row: usize, col: usize) -> (f32, f32) {
        (
            self.start_x + col as f32 * self.cell_size,
            self.start_y + row as f32 * self.cell_size,
        )
    }
}

/// Lay a `rows x cols` grid out on `paper`.
///
/// The page is forced landscape when `is_horizontal`, portrait otherwise. The
/// cell size is the tighter of the two axis constraints and the grid is
/// centered inside the margin box. Callers guarantee `rows, cols >= 1`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn paper_layout(
    rows: usize,
    cols: usize,
    is_horizontal: bool,
    paper: PaperSize,
    margin: f32,
) -> PaperLayout {
    let (w, h) = paper.dimensions_mm();
    let (page_width, page_height) = if is_horizontal {
        (w.max(h), w.min(h))
    } else {
        (w.min(h), w.max(h))
    };

    let available_width = page_width - 2.0 * margin;
    let available_height = page_height - 2.0 * margin;
    let cell_size = (available_width / cols as f32).min(available_height / rows as f32);

    let start_x = margin + (available_width - cols as f32 * cell_size) / 2.0;
    let start_y = margin + (available_height - rows as f32 * cell_size) / 2.0;

    PaperLayout {
        page_width,
        page_height,
        margin,
        cell_size,
        start_x,
        start_y,
        rows,
        cols,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    #[test]
    fn test_viewport_bounds_by_value() {
        let viewport = Viewport::new(260.0, 500.0);
        let (w, h) = viewport.bounds();
        assert!((w - 200.0).abs() < f32::EPSILON);
        assert!((h - 300.0).abs() < f32::EPSILON);
        let (w, h) = Viewport::unconstrained().bounds();
        assert!((w - MAX_CANVAS_WIDTH).abs() < f32::EPSILON);
        assert!((h - MAX_CANVAS_HEIGHT).abs() < f32::EPSILON);
    }

    #[test]
    fn test_canvas_horizontal_bounds() {
        let dims = canvas_dimensions(10, 20, true, Viewport::default());
        assert!(dims.width > 0 && dims.height > 0);
        assert!((MIN_CELL_PX..=MAX_CELL_PX).contains(&dims.cell_size));
    }

    #[test]
    fn test_canvas_is_whole_cells() {
        let dims = canvas_dimensions(10, 15, true, Viewport::default());
        assert_eq!(dims.width, dims.cell_size * 15);
        assert_eq!(dims.height, dims.cell_size * 10);
    }

    #[test]
    fn test_canvas_large_grid_hits_minimum() {
        let dims = canvas_dimensions(50, 50, true, Viewport::default());
        assert_eq!(dims.cell_size, MIN_CELL_PX);
    }

    #[test]
    fn test_canvas_small_grid_respects_maximum() {
        // 2 columns of 25 px give a 50 px wide box; the column term (25)
        // is tighter than the row term (50 / 1.414).
        let dims = canvas_dimensions(1, 2, true, Viewport::default());
        assert_eq!(dims.cell_size, 25);

        let dims = canvas_dimensions(1, 1, false, Viewport::default());
        assert!(dims.cell_size <= MAX_CELL_PX);
    }

    #[test]
    fn test_canvas_vertical_uses_rows() {
        // Portrait 33x22 (transposed default): height capped to 600 px,
        // width 600 / 1.414 = 424.3 px, cells min(424.3/22, 600/33) = 18.2.
        let dims = canvas_dimensions(33, 22, false, Viewport::default());
        assert_eq!(dims.cell_size, 18);
        assert_eq!(dims.width, 18 * 22);
        assert_eq!(dims.height, 18 * 33);
    }

    #[test]
    fn test_canvas_tiny_viewport_clamps() {
        let dims = canvas_dimensions(10, 10, true, Viewport::new(10.0, 10.0));
        assert_eq!(dims.cell_size, MIN_CELL_PX);
        let dims = canvas_dimensions(10, 10, true, Viewport::new(f32::NAN, f32::NAN));
        assert!((MIN_CELL_PX..=MAX_CELL_PX).contains(&dims.cell_size));
    }

    #[test]
    fn test_paper_orientation() {
        let landscape = paper_layout(2, 3, true, PaperSize::A4, DEFAULT_MARGIN_MM);
        assert!((landscape.page_width - 297.0).abs() < EPS);
        assert!((landscape.page_height - 210.0).abs() < EPS);

        let portrait = paper_layout(2, 3, false, PaperSize::A4, DEFAULT_MARGIN_MM);
        assert!((portrait.page_width - 210.0).abs() < EPS);
        assert!((portrait.page_height - 297.0).abs() < EPS);
    }

    #[test]
    fn test_single_cell_centered_on_a5_portrait() {
        let layout = paper_layout(1, 1, false, PaperSize::A5, DEFAULT_MARGIN_MM);
        let left = layout.start_x;
        let right = layout.page_width - (layout.start_x + layout.cell_size);
        let top = layout.start_y;
        let bottom = layout.page_height - (layout.start_y + layout.cell_size);

        assert!((left - right).abs() < EPS);
        assert!((top - bottom).abs() < EPS);
        // The width constraint is the tighter one on a portrait sheet.
        assert!((layout.cell_size - (148.0 - 40.0)).abs() < EPS);
        assert!((left - DEFAULT_MARGIN_MM).abs() < EPS);
    }

    #[test]
    fn test_cell_origin() {
        let layout = paper_layout(4, 4, true, PaperSize::A3, 10.0);
        let (x, y) = layout.cell_origin(2, 3);
        assert!((x - (layout.start_x + 3.0 * layout.cell_size)).abs() < EPS);
        assert!((y - (layout.start_y + 2.0 * layout.cell_size)).abs() < EPS);
    }
}
