//! Error types for grid operations.

use thiserror::Error;

/// Result type for grid operations.
pub type GridResult<T> = Result<T, GridError>;

/// Errors that can occur in grid operations.
#[derive(Debug, Error)]
pub enum GridError {
    /// Requested grid dimensions fall outside the supported range.
    #[error("Invalid grid dimensions {rows}x{cols} (rows and columns must be within {min}-{max})")]
    InvalidDimensions {
        /// Requested row count.
        rows: usize,
        /// Requested column count.
        cols: usize,
        /// Smallest accepted value.
        min: usize,
        /// Largest accepted value.
        max: usize,
    },

    /// A cell address outside the current grid.
    #[error("Cell ({row}, {col}) is outside the grid")]
    CellOutOfBounds {
        /// Row index.
        row: usize,
        /// Column index.
        col: usize,
    },

    /// A color string that is not a `#RRGGBB` hex triplet.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// Paper size name not in the A-series set.
    #[error("Unknown paper size: {0}")]
    UnknownPaperSize(String),

    /// Preference store failure.
    #[error("Preference store error: {0}")]
    Preferences(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error from a file-backed store.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
