//! Interactive canvas rendering.
//!
//! A frame is composed as an SVG scene and rasterized onto a
//! `tiny_skia::Pixmap` with resvg. Cells are drawn first (white under symbols,
//! flat color otherwise), then the grid lines over every cell, then the
//! symbols tinted with their cell color.

use std::fmt::Write;

use grid_core::symbols::{self, SymbolPaint, STROKE_WIDTH, VIEWBOX_SIZE};
use grid_core::{
    canvas_dimensions, CanvasDimensions, GridConfig, HexColor, Matrix, PointerEvent, Viewport,
};

use crate::error::{RenderError, RenderResult};

/// Symbol edge length relative to the cell.
pub const CANVAS_SYMBOL_RATIO: f32 = 0.85;

/// Grid line color.
pub const GRID_LINE_COLOR: &str = "#DDDDDD";

/// Grid line width in pixels.
pub const GRID_LINE_WIDTH: f32 = 1.0;

/// Record of one symbol drawn on the canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolDraw {
    /// Cell row.
    pub row: usize,
    /// Cell column.
    pub col: usize,
    /// Registry id.
    pub id: String,
    /// Whether the glyph was filled or stroked.
    pub paint: SymbolPaint,
}

/// A composed frame, before rasterization.
#[derive(Debug, Clone)]
pub struct CanvasScene {
    /// Canvas size and cell size used for the frame.
    pub dimensions: CanvasDimensions,
    /// SVG document of the frame.
    pub svg: String,
    /// Symbols drawn, in row-major order.
    pub symbols: Vec<SymbolDraw>,
}

/// A rasterized frame.
pub struct CanvasFrame {
    /// The composed scene.
    pub scene: CanvasScene,
    /// Drawing surface.
    pub pixmap: tiny_skia::Pixmap,
}

/// Draws a grid onto a pixel surface and maps pointer input back to cells.
#[derive(Debug, Clone, Default)]
pub struct CanvasRenderer {
    viewport: Viewport,
}

impl CanvasRenderer {
    /// Create a renderer laid out inside `viewport`.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self { viewport }
    }

    /// The current viewport.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Update the viewport after the host area was resized.
    pub fn resize(&mut self, viewport: Viewport) {
        tracing::debug!(
            width = viewport.width,
            height = viewport.height,
            "Canvas viewport resized"
        );
        self.viewport = viewport;
    }

    /// Canvas and cell size for `config` in the current viewport.
    #[must_use]
    pub fn dimensions(&self, config: &GridConfig) -> CanvasDimensions {
        canvas_dimensions(config.rows, config.cols, config.is_horizontal, self.viewport)
    }

    /// Compose the SVG scene for one frame.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn compose(&self, matrix: &Matrix, config: &GridConfig) -> CanvasScene {
        let dimensions = self.dimensions(config);
        let cell = dimensions.cell_size as f32;
        let white = HexColor::white();

        let mut svg = String::with_capacity(256 + config.rows * config.cols * 96);
        let _ = write!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
            w = dimensions.width,
            h = dimensions.height,
        );

        for i in 0..config.rows {
            for j in 0..config.cols {
                let fill = match matrix.get(i, j) {
                    Some(c) if !c.has_symbol() => &c.color,
                    _ => &white,
                };
                let _ = write!(
                    svg,
                    "<rect x=\"{}\" y=\"{}\" width=\"{cell}\" height=\"{cell}\" fill=\"{fill}\"/>",
                    j as f32 * cell,
                    i as f32 * cell,
                );
            }
        }

        let _ = write!(
            svg,
            "<g fill=\"none\" stroke=\"{GRID_LINE_COLOR}\" stroke-width=\"{GRID_LINE_WIDTH}\">"
        );
        for i in 0..config.rows {
            for j in 0..config.cols {
                let _ = write!(
                    svg,
                    "<rect x=\"{}\" y=\"{}\" width=\"{cell}\" height=\"{cell}\"/>",
                    j as f32 * cell,
                    i as f32 * cell,
                );
            }
        }
        svg.push_str("</g>");

        let symbol_size = (cell * CANVAS_SYMBOL_RATIO).floor();
        let scale = symbol_size / VIEWBOX_SIZE;
        let inset = (cell - symbol_size) / 2.0;
        let mut drawn = Vec::new();

        for (i, j, c) in matrix.painted_cells() {
            if !config.contains(i, j) {
                continue;
            }
            let Some(id) = c.symbol.as_deref() else {
                continue;
            };
            let Some(symbol) = symbols::resolve(id) else {
                tracing::trace!(row = i, col = j, id, "Skipping unknown symbol");
                continue;
            };

            let paint = match symbol.paint {
                SymbolPaint::Fill => format!("fill=\"{}\" stroke=\"none\"", c.color),
                SymbolPaint::Stroke => format!(
                    "fill=\"none\" stroke=\"{}\" stroke-width=\"{STROKE_WIDTH}\" stroke-linecap=\"round\" stroke-linejoin=\"round\"",
                    c.color
                ),
            };
            let _ = write!(
                svg,
                "<g transform=\"translate({} {}) scale({scale})\"><path d=\"{}\" {paint}/></g>",
                j as f32 * cell + inset,
                i as f32 * cell + inset,
                symbol.path_data,
            );
            drawn.push(SymbolDraw {
                row: i,
                col: j,
                id: symbol.id.to_string(),
                paint: symbol.paint,
            });
        }

        svg.push_str("</svg>");
        tracing::trace!(
            rows = config.rows,
            cols = config.cols,
            symbols = drawn.len(),
            "Composed canvas scene"
        );

        CanvasScene {
            dimensions,
            svg,
            symbols: drawn,
        }
    }

    /// Compose and rasterize one frame.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Export`] if the scene cannot be parsed or the
    /// surface cannot be allocated.
    pub fn render(&self, matrix: &Matrix, config: &GridConfig) -> RenderResult<CanvasFrame> {
        let scene = self.compose(matrix, config);
        let pixmap = rasterize(&scene)?;
        Ok(CanvasFrame { scene, pixmap })
    }

    /// Cell under a canvas-relative point, if inside the grid.
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn cell_at(&self, config: &GridConfig, x: f32, y: f32) -> Option<(usize, usize)> {
        if !(x.is_finite() && y.is_finite()) || x < 0.0 || y < 0.0 {
            return None;
        }
        let cell = self.dimensions(config).cell_size as f32;
        let col = (x / cell).floor() as usize;
        let row = (y / cell).floor() as usize;
        config.contains(row, col).then_some((row, col))
    }

    /// Hit-test a pointer event and report the cell to `on_cell`.
    ///
    /// `origin` is the canvas's top-left corner in client coordinates. Events
    /// outside the grid, and touch events without touch points, are ignored.
    /// Returns whether `on_cell` was invoked.
    pub fn handle_pointer(
        &self,
        config: &GridConfig,
        event: &PointerEvent,
        origin: (f32, f32),
        mut on_cell: impl FnMut(usize, usize),
    ) -> bool {
        let Some((x, y)) = event.position() else {
            return false;
        };
        match self.cell_at(config, x - origin.0, y - origin.1) {
            Some((row, col)) => {
                tracing::trace!(row, col, "Pointer hit");
                on_cell(row, col);
                true
            }
            None => false,
        }
    }
}

/// Rasterize a composed scene onto a new pixmap.
///
/// # Errors
///
/// Returns [`RenderError::Export`] if the SVG does not parse or the pixmap
/// cannot be allocated.
pub fn rasterize(scene: &CanvasScene) -> RenderResult<tiny_skia::Pixmap> {
    let tree = usvg::Tree::from_str(&scene.svg, &usvg::Options::default())
        .map_err(|e| RenderError::Export(format!("SVG parsing failed: {e}")))?;

    let mut pixmap = tiny_skia::Pixmap::new(
        scene.dimensions.width.max(1),
        scene.dimensions.height.max(1),
    )
    .ok_or_else(|| RenderError::Export("Failed to create pixmap".to_string()))?;

    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());
    Ok(pixmap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use grid_core::{Cell, TouchEvent, TouchPhase, TouchPoint};

    fn hex(s: &str) -> HexColor {
        HexColor::parse(s).expect("color")
    }

    fn config(rows: usize, cols: usize) -> GridConfig {
        GridConfig::new(rows, cols, true).expect("config")
    }

    #[test]
    fn test_compose_records_symbols_in_row_major_order() {
        let matrix = Matrix::empty(2, 2)
            .with_cell(1, 0, Some(Cell::with_symbol(hex("#FF0000"), "cross")))
            .with_cell(0, 1, Some(Cell::with_symbol(hex("#00FF00"), "star")))
            .with_cell(1, 1, Some(Cell::filled(hex("#0000FF"))));

        let scene = CanvasRenderer::default().compose(&matrix, &config(2, 2));
        let ids: Vec<_> = scene.symbols.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["star", "cross"]);
        assert_eq!(scene.symbols[0].paint, SymbolPaint::Fill);
        assert_eq!(scene.symbols[1].paint, SymbolPaint::Stroke);
        assert!(scene.svg.contains("fill=\"#0000FF\""));
    }

    #[test]
    fn test_unknown_symbol_draws_nothing() {
        let matrix =
            Matrix::empty(1, 1).with_cell(0, 0, Some(Cell::with_symbol(hex("#FF0000"), "nope")));
        let scene = CanvasRenderer::default().compose(&matrix, &config(1, 1));
        assert!(scene.symbols.is_empty());
        assert!(!scene.svg.contains("#FF0000"));
    }

    #[test]
    fn test_render_paints_cell_color() {
        let matrix = Matrix::empty(2, 2).with_cell(0, 0, Some(Cell::filled(hex("#FF0000"))));
        let frame = CanvasRenderer::default()
            .render(&matrix, &config(2, 2))
            .expect("render");

        let cell = frame.scene.dimensions.cell_size;
        assert_eq!(frame.pixmap.width(), frame.scene.dimensions.width);

        let center = frame.pixmap.pixel(cell / 2, cell / 2).expect("pixel");
        assert_eq!((center.red(), center.green(), center.blue()), (255, 0, 0));

        let other = frame
            .pixmap
            .pixel(cell + cell / 2, cell + cell / 2)
            .expect("pixel");
        assert_eq!((other.red(), other.green(), other.blue()), (255, 255, 255));
    }

    #[test]
    fn test_cell_at_bounds() {
        let renderer = CanvasRenderer::default();
        let config = config(10, 15);
        let cell = renderer.dimensions(&config).cell_size as f32;

        assert_eq!(renderer.cell_at(&config, 0.0, 0.0), Some((0, 0)));
        assert_eq!(
            renderer.cell_at(&config, cell * 3.5, cell * 2.5),
            Some((2, 3))
        );
        assert_eq!(renderer.cell_at(&config, -1.0, 5.0), None);
        assert_eq!(renderer.cell_at(&config, cell * 15.0, 0.0), None);
        assert_eq!(renderer.cell_at(&config, 0.0, cell * 10.0), None);
    }

    #[test]
    fn test_handle_pointer_subtracts_origin() {
        let renderer = CanvasRenderer::default();
        let config = config(3, 3);
        let cell = renderer.dimensions(&config).cell_size as f32;

        let mut hits = Vec::new();
        let event = PointerEvent::Mouse {
            x: 100.0 + cell * 1.5,
            y: 50.0 + cell * 2.5,
        };
        assert!(renderer.handle_pointer(&config, &event, (100.0, 50.0), |r, c| hits.push((r, c))));
        assert_eq!(hits, vec![(2, 1)]);
    }

    #[test]
    fn test_handle_pointer_ignores_empty_touch_and_misses() {
        let renderer = CanvasRenderer::default();
        let config = config(3, 3);
        let mut called = false;

        let empty = PointerEvent::Touch(TouchEvent::new(TouchPhase::Start, vec![]));
        assert!(!renderer.handle_pointer(&config, &empty, (0.0, 0.0), |_, _| called = true));

        let outside = PointerEvent::Touch(TouchEvent::new(
            TouchPhase::Start,
            vec![TouchPoint { id: 0, x: 5.0, y: 5.0 }],
        ));
        assert!(!renderer.handle_pointer(&config, &outside, (10.0, 10.0), |_, _| called = true));
        assert!(!called);
    }

    #[test]
    fn test_resize_changes_cell_size() {
        let mut renderer = CanvasRenderer::default();
        let config = config(10, 10);
        let before = renderer.dimensions(&config).cell_size;
        renderer.resize(Viewport::new(200.0, 200.0));
        let after = renderer.dimensions(&config).cell_size;
        assert!(after <= before);
        assert_eq!(after, 15);
    }
}
