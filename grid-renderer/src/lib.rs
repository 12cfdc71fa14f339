//! # Grid Renderer
//!
//! Drawing backends for grids built on the resvg/tiny-skia pipeline and
//! printpdf.
//!
//! ## Outputs
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │         Matrix + GridConfig (grid-core)     │
//! ├──────────────────────┬──────────────────────┤
//! │ CanvasRenderer       │ PdfExporter          │
//! │ SVG scene -> Pixmap  │ mm layout -> PDF     │
//! │ pointer hit-testing  │ vector symbols with  │
//! │                      │ fallback primitives  │
//! └──────────────────────┴──────────────────────┘
//! ```
//!
//! Both outputs take the fill/stroke decision for every symbol from the
//! registry in `grid_core::symbols`, so the document matches the screen.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod canvas;
pub mod error;
pub mod export;
pub mod outline;

pub use canvas::{CanvasFrame, CanvasRenderer, CanvasScene, SymbolDraw};
pub use error::{RenderError, RenderResult};
pub use export::{
    export_filename, preview_data_url, EmbeddedSymbol, ExportArtifact, ExportMode, ExportOptions,
    ExportOutput, ExportReport, ExportRequest, FallbackSymbol, PdfExporter, SymbolEmbedder,
    VectorEmbedder,
};
pub use outline::{symbol_outline, SymbolOutline};

/// Renderer version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
