//! Grid state owned by the application.

use serde::{Deserialize, Serialize};

use crate::{
    resolve_toggle, transpose, Cell, GridConfig, GridError, GridResult, HexColor, Matrix,
    PaperSize, Selection,
};

/// A requested change to the grid, as produced by UI or replay input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum Intent {
    /// Change the grid size; discards all painted content.
    Resize {
        /// New row count.
        rows: usize,
        /// New column count.
        cols: usize,
    },
    /// Click on a cell with the current selection.
    EditCell {
        /// Target row.
        row: usize,
        /// Target column.
        col: usize,
    },
    /// Write a cell directly, bypassing the toggle policy.
    SetCell {
        /// Target row.
        row: usize,
        /// Target column.
        col: usize,
        /// New content; `None` clears.
        #[serde(default)]
        cell: Option<Cell>,
    },
    /// Flip between landscape and portrait.
    ToggleOrientation,
    /// Empty every cell.
    Clear,
    /// Change the active color.
    SelectColor {
        /// New color.
        color: HexColor,
    },
    /// Change the active symbol; `None` paints flat color.
    SelectSymbol {
        /// Symbol id.
        #[serde(default)]
        symbol: Option<String>,
    },
    /// Change the export paper.
    SelectPaper {
        /// New paper size.
        paper: PaperSize,
    },
}

/// The grid being edited: configuration, cells, selection and paper.
#[derive(Debug, Clone, PartialEq)]
pub struct GridState {
    config: GridConfig,
    matrix: Matrix,
    selection: Selection,
    paper: PaperSize,
}

impl GridState {
    /// Create an empty grid.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidDimensions`] if the size is out of range.
    pub fn new(rows: usize, cols: usize, is_horizontal: bool) -> GridResult<Self> {
        let config = GridConfig::new(rows, cols, is_horizontal)?;
        Ok(Self::from_config(config))
    }

    /// Create an empty grid from an already validated configuration.
    #[must_use]
    pub fn from_config(config: GridConfig) -> Self {
        Self {
            matrix: Matrix::empty(config.rows, config.cols),
            config,
            selection: Selection::default(),
            paper: PaperSize::default(),
        }
    }

    /// Current shape and orientation.
    #[must_use]
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Current matrix revision.
    #[must_use]
    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    /// Active color and symbol.
    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Paper chosen for export.
    #[must_use]
    pub fn paper(&self) -> PaperSize {
        self.paper
    }

    /// Apply one intent.
    ///
    /// Validation happens before the matrix is touched, so a rejected intent
    /// leaves the state unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidDimensions`] for an out-of-range resize and
    /// [`GridError::CellOutOfBounds`] for a cell outside the grid.
    pub fn apply(&mut self, intent: Intent) -> GridResult<()> {
        match intent {
            Intent::Resize { rows, cols } => {
                self.config = GridConfig::new(rows, cols, self.config.is_horizontal)?;
                self.matrix = Matrix::empty(rows, cols);
                tracing::debug!(rows, cols, "Grid resized");
            }
            Intent::EditCell { row, col } => {
                self.check_bounds(row, col)?;
                let next = resolve_toggle(self.matrix.get(row, col), &self.selection);
                tracing::trace!(row, col, painted = next.is_some(), "Cell toggled");
                self.matrix = self.matrix.with_cell(row, col, next);
            }
            Intent::SetCell { row, col, cell } => {
                self.check_bounds(row, col)?;
                self.matrix = self.matrix.with_cell(row, col, cell);
            }
            Intent::ToggleOrientation => {
                let flipped = transpose(&self.matrix, self.config.rows, self.config.cols);
                self.config = GridConfig {
                    rows: flipped.rows,
                    cols: flipped.cols,
                    is_horizontal: !self.config.is_horizontal,
                };
                self.matrix = flipped.matrix;
                tracing::debug!(
                    rows = self.config.rows,
                    cols = self.config.cols,
                    orientation = self.config.orientation().label(),
                    "Orientation toggled"
                );
            }
            Intent::Clear => {
                self.matrix = Matrix::empty(self.config.rows, self.config.cols);
                tracing::debug!("Grid cleared");
            }
            Intent::SelectColor { color } => self.selection.color = color,
            Intent::SelectSymbol { symbol } => self.selection.symbol = symbol,
            Intent::SelectPaper { paper } => self.paper = paper,
        }
        Ok(())
    }

    /// Apply intents in order, stopping at the first rejected one.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by [`GridState::apply`].
    pub fn apply_all(&mut self, intents: impl IntoIterator<Item = Intent>) -> GridResult<()> {
        intents.into_iter().try_for_each(|intent| self.apply(intent))
    }

    fn check_bounds(&self, row: usize, col: usize) -> GridResult<()> {
        if self.config.contains(row, col) {
            Ok(())
        } else {
            Err(GridError::CellOutOfBounds { row, col })
        }
    }
}

impl Default for GridState {
    fn default() -> Self {
        Self::from_config(GridConfig::default())
    }
}
