//! Grid configuration, paper sizes and dimension limits.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{GridError, GridResult};

/// Smallest accepted row/column count.
pub const MIN_DIMENSION: usize = 1;

/// Largest accepted row/column count.
pub const MAX_DIMENSION: usize = 50;

/// Rows of a freshly opened grid.
pub const DEFAULT_ROWS: usize = 22;

/// Columns of a freshly opened grid.
pub const DEFAULT_COLS: usize = 33;

/// Colors offered before the user edits the palette.
pub const DEFAULT_PALETTE: [&str; 8] = [
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FFEAA7", "#DDA0DD", "#98D8C8", "#F7DC6F",
];

/// Check a requested grid size against [`MIN_DIMENSION`]..=[`MAX_DIMENSION`].
///
/// # Errors
///
/// Returns [`GridError::InvalidDimensions`] if either value is out of range.
pub fn validate_dimensions(rows: usize, cols: usize) -> GridResult<()> {
    let range = MIN_DIMENSION..=MAX_DIMENSION;
    if range.contains(&rows) && range.contains(&cols) {
        Ok(())
    } else {
        Err(GridError::InvalidDimensions {
            rows,
            cols,
            min: MIN_DIMENSION,
            max: MAX_DIMENSION,
        })
    }
}

/// Page orientation of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Long axis horizontal (`is_horizontal = true`).
    Landscape,
    /// Long axis vertical.
    Portrait,
}

impl Orientation {
    /// Orientation for an `is_horizontal` flag.
    #[must_use]
    pub fn from_horizontal(is_horizontal: bool) -> Self {
        if is_horizontal {
            Self::Landscape
        } else {
            Self::Portrait
        }
    }

    /// Lower-case label used in file names.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Landscape => "landscape",
            Self::Portrait => "portrait",
        }
    }
}

/// Grid shape and orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub cols: usize,
    /// Whether the grid maps to landscape paper.
    pub is_horizontal: bool,
}

impl GridConfig {
    /// Create a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidDimensions`] if `rows` or `cols` is out of range.
    pub fn new(rows: usize, cols: usize, is_horizontal: bool) -> GridResult<Self> {
        validate_dimensions(rows, cols)?;
        Ok(Self {
            rows,
            cols,
            is_horizontal,
        })
    }

    /// The orientation as an enum.
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        Orientation::from_horizontal(self.is_horizontal)
    }

    /// Whether `(row, col)` addresses a cell of this grid.
    #[must_use]
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            is_horizontal: true,
        }
    }
}

/// Supported A-series paper formats.
///
/// Dimensions are stored portrait (`width < height`); geometry orients the
/// page from the grid's `is_horizontal` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PaperSize {
    /// 297 x 420 mm.
    A3,
    /// 210 x 297 mm.
    #[default]
    A4,
    /// 148 x 210 mm.
    A5,
}

impl PaperSize {
    /// All sizes, largest first.
    pub const ALL: [PaperSize; 3] = [PaperSize::A3, PaperSize::A4, PaperSize::A5];

    /// Portrait `(width_mm, height_mm)`.
    #[must_use]
    pub fn dimensions_mm(self) -> (f32, f32) {
        match self {
            Self::A3 => (297.0, 420.0),
            Self::A4 => (210.0, 297.0),
            Self::A5 => (148.0, 210.0),
        }
    }

    /// Short name (`"A4"`).
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::A3 => "A3",
            Self::A4 => "A4",
            Self::A5 => "A5",
        }
    }
}

impl fmt::Display for PaperSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PaperSize {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A3" => Ok(Self::A3),
            "A4" => Ok(Self::A4),
            "A5" => Ok(Self::A5),
            _ => Err(GridError::UnknownPaperSize(s.to_string())),
        }
    }
}
