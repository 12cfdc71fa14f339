//! Grid export to paper-sized PDF documents.
//!
//! One export call lays the grid out on the chosen paper, paints a white
//! background and the grid lines, then walks every cell in row-major order.
//! Flat fills are re-bordered so the grid stays visible over them.
//! Symbol cells go through a [`SymbolEmbedder`]; each embed is awaited before
//! the next cell is drawn. A failed embed degrades that one cell to a filled
//! [`FallbackShape`] and the export carries on. Layout and serialization
//! failures abort the export with no partial document.

pub mod embed;
#[cfg(feature = "export")]
mod pdf;

use base64::Engine;
use chrono::{DateTime, Utc};
use grid_core::{
    paper_layout, FallbackShape, GridConfig, Language, Matrix, Orientation, PaperLayout,
    PaperSize, SymbolPaint,
};
use serde::{Deserialize, Serialize};

use crate::error::{RenderError, RenderResult};

pub use embed::{SymbolEmbedder, VectorEmbedder};

/// Default page margin.
pub const DEFAULT_MARGIN_MM: f32 = grid_core::geometry::DEFAULT_MARGIN_MM;

/// Symbol edge length relative to the cell.
pub const DEFAULT_SYMBOL_RATIO: f32 = 0.8;

/// Fallback half-extent (square) or radius (circle) relative to the cell.
pub const DEFAULT_FALLBACK_RATIO: f32 = 0.4;

/// Grid line width.
pub const DEFAULT_GRID_LINE_WIDTH_MM: f32 = 0.1;

/// Grid line color.
pub const DEFAULT_GRID_LINE_RGB: [u8; 3] = [200, 200, 200];

/// `strftime` pattern of the file name timestamp.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H-%M-%S";

/// Title baseline, measured from the top edge.
const TITLE_OFFSET_MM: f32 = 15.0;

/// Grid info baseline, measured from the bottom edge.
const INFO_OFFSET_MM: f32 = 10.0;

/// Fixed export settings, constant within one export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportOptions {
    /// Margin reserved on every side of the page.
    pub margin_mm: f32,
    /// Symbol edge length relative to the cell.
    pub symbol_ratio: f32,
    /// Fallback half-extent relative to the cell.
    pub fallback_ratio: f32,
    /// Grid line width.
    pub grid_line_width_mm: f32,
    /// Grid line color.
    pub grid_line_rgb: [u8; 3],
    /// Print the title and grid info lines.
    pub captions: bool,
    /// Caption language.
    pub language: Language,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            margin_mm: DEFAULT_MARGIN_MM,
            symbol_ratio: DEFAULT_SYMBOL_RATIO,
            fallback_ratio: DEFAULT_FALLBACK_RATIO,
            grid_line_width_mm: DEFAULT_GRID_LINE_WIDTH_MM,
            grid_line_rgb: DEFAULT_GRID_LINE_RGB,
            captions: true,
            language: Language::default(),
        }
    }
}

/// What to do with the finished document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportMode {
    /// Hand back bytes and a file name.
    #[default]
    Download,
    /// Hand back an in-memory `data:` URL.
    Preview,
}

/// One export invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportRequest {
    /// Target paper.
    pub paper: PaperSize,
    /// Download or preview.
    pub mode: ExportMode,
    /// Clock value stamped into the file name.
    pub timestamp: DateTime<Utc>,
}

impl ExportRequest {
    /// A download request.
    #[must_use]
    pub fn download(paper: PaperSize, timestamp: DateTime<Utc>) -> Self {
        Self {
            paper,
            mode: ExportMode::Download,
            timestamp,
        }
    }

    /// A preview request.
    #[must_use]
    pub fn preview(paper: PaperSize, timestamp: DateTime<Utc>) -> Self {
        Self {
            paper,
            mode: ExportMode::Preview,
            timestamp,
        }
    }
}

/// The finished document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutput {
    /// File to save.
    Download {
        /// Generated file name.
        filename: String,
        /// PDF bytes.
        bytes: Vec<u8>,
    },
    /// Document to open in a viewer.
    Preview {
        /// `data:application/pdf;base64,...` URL.
        data_url: String,
    },
}

/// A symbol drawn from its vector outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbeddedSymbol {
    /// Cell row.
    pub row: usize,
    /// Cell column.
    pub col: usize,
    /// Registry id.
    pub id: String,
    /// Fill or stroke.
    pub paint: SymbolPaint,
}

/// A symbol replaced by a fallback primitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FallbackSymbol {
    /// Cell row.
    pub row: usize,
    /// Cell column.
    pub col: usize,
    /// Symbol id as stored in the cell.
    pub id: String,
    /// Primitive drawn instead.
    pub shape: FallbackShape,
    /// Why embedding failed.
    pub reason: String,
}

/// Summary of one export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportReport {
    /// Page and grid placement.
    pub layout: PaperLayout,
    /// Painted cells, with or without a symbol.
    pub filled_cells: usize,
    /// Symbols drawn as vectors, in draw order.
    pub embedded: Vec<EmbeddedSymbol>,
    /// Symbols drawn as fallbacks, in draw order.
    pub fallbacks: Vec<FallbackSymbol>,
}

/// Document plus report.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    /// The document.
    pub output: ExportOutput,
    /// What was drawn.
    pub report: ExportReport,
}

/// File name for an export:
/// `grid_<symbols|colors>_<rows>x<cols>_<paper>_<landscape|portrait>_<timestamp>.pdf`.
#[must_use]
pub fn export_filename(
    matrix: &Matrix,
    config: &GridConfig,
    paper: PaperSize,
    timestamp: DateTime<Utc>,
) -> String {
    let kind = if matrix.has_symbols() {
        "symbols"
    } else {
        "colors"
    };
    format!(
        "grid_{kind}_{}x{}_{paper}_{}_{}.pdf",
        config.rows,
        config.cols,
        Orientation::from_horizontal(config.is_horizontal).label(),
        timestamp.format(TIMESTAMP_FORMAT),
    )
}

/// Wrap PDF bytes in a `data:` URL.
#[must_use]
pub fn preview_data_url(bytes: &[u8]) -> String {
    format!(
        "data:application/pdf;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}

/// Renders grids into PDF documents.
pub struct PdfExporter<E = VectorEmbedder> {
    options: ExportOptions,
    embedder: E,
}

impl PdfExporter<VectorEmbedder> {
    /// Create an exporter with the vector embedder.
    #[must_use]
    pub fn new(options: ExportOptions) -> Self {
        Self::with_embedder(options, VectorEmbedder)
    }

    /// Create an exporter with default options.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(ExportOptions::default())
    }
}

impl<E: SymbolEmbedder> PdfExporter<E> {
    /// Create an exporter with a custom embedder.
    #[must_use]
    pub fn with_embedder(options: ExportOptions, embedder: E) -> Self {
        Self { options, embedder }
    }

    /// The export settings.
    #[must_use]
    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Paper placement for `config`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Layout`] for a zero-sized grid or a margin that
    /// leaves no room on the page.
    pub fn layout(&self, config: &GridConfig, paper: PaperSize) -> RenderResult<PaperLayout> {
        if config.rows == 0 || config.cols == 0 {
            return Err(RenderError::Layout(format!(
                "grid must have at least one row and column, got {}x{}",
                config.rows, config.cols
            )));
        }
        let layout = paper_layout(
            config.rows,
            config.cols,
            config.is_horizontal,
            paper,
            self.options.margin_mm,
        );
        if !(layout.cell_size.is_finite() && layout.cell_size > 0.0) {
            return Err(RenderError::Layout(format!(
                "margin {} mm leaves no room on {paper}",
                self.options.margin_mm
            )));
        }
        Ok(layout)
    }

    /// Export `matrix` as one PDF page.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Layout`] if the grid cannot be placed,
    /// [`RenderError::Export`] if the document cannot be serialized and
    /// [`RenderError::NoBackend`] if the crate was built without the
    /// `export` feature. Per-cell symbol failures are not errors.
    #[cfg(feature = "export")]
    pub async fn export(
        &self,
        matrix: &Matrix,
        config: &GridConfig,
        request: &ExportRequest,
    ) -> RenderResult<ExportArtifact> {
        let layout = self.layout(config, request.paper)?;
        let options = &self.options;
        let page = pdf::PdfPage::new(
            options.language.export_title(),
            layout.page_width,
            layout.page_height,
        );

        let (grid_w, grid_h) = (layout.grid_width(), layout.grid_height());
        page.fill_rect(layout.start_x, layout.start_y, grid_w, grid_h, [255, 255, 255]);

        for j in 0..=layout.cols {
            let (x, _) = layout.cell_origin(0, j);
            page.line(
                (x, layout.start_y),
                (x, layout.start_y + grid_h),
                options.grid_line_width_mm,
                options.grid_line_rgb,
            );
        }
        for i in 0..=layout.rows {
            let (_, y) = layout.cell_origin(i, 0);
            page.line(
                (layout.start_x, y),
                (layout.start_x + grid_w, y),
                options.grid_line_width_mm,
                options.grid_line_rgb,
            );
        }

        let mut report = ExportReport {
            layout,
            filled_cells: 0,
            embedded: Vec::new(),
            fallbacks: Vec::new(),
        };
        let cell = layout.cell_size;
        let symbol_size = cell * options.symbol_ratio;

        for i in 0..layout.rows {
            for j in 0..layout.cols {
                let Some(content) = matrix.get(i, j) else {
                    continue;
                };
                report.filled_cells += 1;
                let (x, y) = layout.cell_origin(i, j);
                let color = content.color.rgb();

                let Some(id) = content.symbol.as_deref() else {
                    page.fill_rect(x, y, cell, cell, color);
                    // The fill covers the grid lines; stroke the border again on top.
                    page.stroke_rect(
                        x,
                        y,
                        cell,
                        cell,
                        options.grid_line_width_mm,
                        options.grid_line_rgb,
                    );
                    continue;
                };

                let embedded = match grid_core::symbols::resolve(id) {
                    Some(symbol) => self.embedder.embed(symbol).await,
                    None => Err(RenderError::UnknownSymbol(id.to_string())),
                };

                match embedded {
                    Ok(outline) => {
                        let inset = (cell - symbol_size) / 2.0;
                        page.symbol(&outline, x + inset, y + inset, symbol_size, color);
                        tracing::trace!(row = i, col = j, id, "Embedded symbol");
                        report.embedded.push(EmbeddedSymbol {
                            row: i,
                            col: j,
                            id: id.to_string(),
                            paint: outline.paint,
                        });
                    }
                    Err(e) => {
                        let shape = grid_core::symbols::fallback_shape(id);
                        tracing::warn!(row = i, col = j, id, ?shape, "Symbol fallback: {e}");
                        page.fallback(
                            shape,
                            x + cell / 2.0,
                            y + cell / 2.0,
                            cell * options.fallback_ratio,
                            color,
                        );
                        report.fallbacks.push(FallbackSymbol {
                            row: i,
                            col: j,
                            id: id.to_string(),
                            shape,
                            reason: e.to_string(),
                        });
                    }
                }
            }
        }

        if options.captions {
            let font = page.builtin_font()?;
            let center = layout.page_width / 2.0;
            page.centered_text(
                options.language.export_title(),
                16.0,
                center,
                TITLE_OFFSET_MM,
                [0, 0, 0],
                &font,
            );
            let info = format!(
                "{} x {} ({})",
                config.rows,
                config.cols,
                options.language.orientation_label(config.is_horizontal)
            );
            page.centered_text(
                &info,
                10.0,
                center,
                layout.page_height - INFO_OFFSET_MM,
                [100, 100, 100],
                &font,
            );
        }

        let bytes = page.save()?;
        let output = match request.mode {
            ExportMode::Download => ExportOutput::Download {
                filename: export_filename(matrix, config, request.paper, request.timestamp),
                bytes,
            },
            ExportMode::Preview => ExportOutput::Preview {
                data_url: preview_data_url(&bytes),
            },
        };

        tracing::info!(
            rows = config.rows,
            cols = config.cols,
            paper = %request.paper,
            filled = report.filled_cells,
            fallbacks = report.fallbacks.len(),
            "Exported grid"
        );

        Ok(ExportArtifact { output, report })
    }

    /// Export is unavailable without a PDF backend.
    ///
    /// # Errors
    ///
    /// Always returns [`RenderError::NoBackend`].
    #[cfg(not(feature = "export"))]
    #[allow(clippy::unused_async)]
    pub async fn export(
        &self,
        _matrix: &Matrix,
        _config: &GridConfig,
        _request: &ExportRequest,
    ) -> RenderResult<ExportArtifact> {
        Err(RenderError::NoBackend(
            "PDF export not enabled (compile with 'export' feature)".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use grid_core::{Cell, HexColor};

    fn timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7)
            .single()
            .expect("valid timestamp")
    }

    #[test]
    fn test_filename_kind_and_shape() {
        let config = GridConfig::new(22, 33, true).expect("config");
        let plain = Matrix::empty(22, 33);
        assert_eq!(
            export_filename(&plain, &config, PaperSize::A4, timestamp()),
            "grid_colors_22x33_A4_landscape_2024-03-09T14-05-07.pdf"
        );

        let red = HexColor::parse("#FF0000").expect("red");
        let with_symbol = plain.with_cell(0, 0, Some(Cell::with_symbol(red, "star")));
        let portrait = GridConfig::new(22, 33, false).expect("config");
        assert_eq!(
            export_filename(&with_symbol, &portrait, PaperSize::A3, timestamp()),
            "grid_symbols_22x33_A3_portrait_2024-03-09T14-05-07.pdf"
        );
    }

    #[test]
    fn test_preview_url_prefix() {
        let url = preview_data_url(b"%PDF-1.3");
        assert_eq!(url, "data:application/pdf;base64,JVBERi0xLjM=");
    }

    #[test]
    fn test_layout_rejects_zero_and_oversized_margin() {
        let exporter = PdfExporter::with_defaults();
        let zero = GridConfig {
            rows: 0,
            cols: 3,
            is_horizontal: true,
        };
        assert!(matches!(
            exporter.layout(&zero, PaperSize::A4),
            Err(RenderError::Layout(_))
        ));

        let wide = PdfExporter::new(ExportOptions {
            margin_mm: 200.0,
            ..ExportOptions::default()
        });
        let config = GridConfig::new(2, 2, true).expect("config");
        assert!(matches!(
            wide.layout(&config, PaperSize::A5),
            Err(RenderError::Layout(_))
        ));
    }

    #[test]
    fn test_default_options() {
        let options = ExportOptions::default();
        assert!((options.margin_mm - 20.0).abs() < f32::EPSILON);
        assert!((options.symbol_ratio - 0.8).abs() < f32::EPSILON);
        assert_eq!(options.grid_line_rgb, [200, 200, 200]);
        assert!(options.captions);
        assert_eq!(options.language, Language::Ro);
    }
}
