//! Renderer error types.

use thiserror::Error;

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur during rendering and export.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The crate was built without a PDF backend.
    #[error("No rendering backend available: {0}")]
    NoBackend(String),

    /// A symbol id missing from the registry.
    #[error("Unknown symbol: {0}")]
    UnknownSymbol(String),

    /// Symbol path data could not be parsed into an outline.
    #[error("Symbol path error: {0}")]
    SymbolPath(String),

    /// Drawing a symbol into the document failed.
    #[error("Symbol embedding failed: {0}")]
    Embed(String),

    /// The grid cannot be laid out on paper.
    #[error("Layout failed: {0}")]
    Layout(String),

    /// Rasterization or document serialization failed.
    #[error("Export failed: {0}")]
    Export(String),
}
