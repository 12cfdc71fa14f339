//! Copy-on-write cell matrix.
//!
//! A [`Matrix`] maps row indices to rows of `cols` optional [`Cell`]s. Every
//! mutation returns a new revision; rows are shared between revisions through
//! `Arc` and only the written row is cloned, so an older revision is never
//! observed changing underneath a renderer that still holds it.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::{Cell, HexColor};

type Row = Arc<Vec<Option<Cell>>>;

/// Grid cell state, keyed by row then column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Matrix {
    rows: BTreeMap<usize, Row>,
    cols: usize,
}

impl Matrix {
    /// A matrix of `rows` rows with every cell empty.
    #[must_use]
    pub fn empty(rows: usize, cols: usize) -> Self {
        let blank: Row = Arc::new(vec![None; cols]);
        Self {
            rows: (0..rows).map(|i| (i, Arc::clone(&blank))).collect(),
            cols,
        }
    }

    /// A matrix with no rows materialized yet; rows are created on first write.
    #[must_use]
    pub fn sparse(cols: usize) -> Self {
        Self {
            rows: BTreeMap::new(),
            cols,
        }
    }

    /// Build from fully materialized rows. Short rows are padded, long rows truncated.
    pub(crate) fn from_rows(cols: usize, rows: Vec<Vec<Option<Cell>>>) -> Self {
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(cols, None);
                row
            })
            .enumerate()
            .map(|(i, row)| (i, Arc::new(row)))
            .collect();
        Self { rows, cols }
    }

    /// Width of every row.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of materialized rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// A materialized row, if present.
    #[must_use]
    pub fn row(&self, row: usize) -> Option<&[Option<Cell>]> {
        self.rows.get(&row).map(|r| r.as_slice())
    }

    /// The cell at `(row, col)`; `None` for empty or out-of-range positions.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(&row)?.get(col)?.as_ref()
    }

    /// A new revision with exactly `(row, col)` replaced.
    ///
    /// A missing row is created full of empty cells before the write. Columns
    /// outside the row width are ignored; callers bounds-check first.
    #[must_use]
    pub fn with_cell(&self, row: usize, col: usize, cell: Option<Cell>) -> Self {
        if col >= self.cols {
            tracing::warn!(row, col, cols = self.cols, "Ignoring write outside row width");
            return self.clone();
        }

        let mut next = self.clone();
        let target = next
            .rows
            .entry(row)
            .or_insert_with(|| Arc::new(vec![None; self.cols]));
        Arc::make_mut(target)[col] = cell;
        next
    }

    /// Painted cells in row-major order.
    pub fn painted_cells(&self) -> impl Iterator<Item = (usize, usize, &Cell)> {
        self.rows.iter().flat_map(|(&i, row)| {
            row.iter()
                .enumerate()
                .filter_map(move |(j, cell)| cell.as_ref().map(|c| (i, j, c)))
        })
    }

    /// Distinct colors in first-seen row-major order.
    #[must_use]
    pub fn used_colors(&self) -> Vec<HexColor> {
        let mut seen = Vec::new();
        for (_, _, cell) in self.painted_cells() {
            if !seen.contains(&cell.color) {
                seen.push(cell.color.clone());
            }
        }
        seen
    }

    /// Distinct symbol ids in first-seen row-major order.
    #[must_use]
    pub fn used_symbols(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for symbol in self.painted_cells().filter_map(|(_, _, c)| c.symbol.as_deref()) {
            if !seen.iter().any(|s| s == symbol) {
                seen.push(symbol.to_string());
            }
        }
        seen
    }

    /// Whether any cell carries a symbol.
    #[must_use]
    pub fn has_symbols(&self) -> bool {
        self.painted_cells().any(|(_, _, c)| c.has_symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red() -> HexColor {
        HexColor::parse("#FF0000").expect("red")
    }

    #[test]
    fn test_empty_shape() {
        for (rows, cols) in [(1, 1), (5, 10), (10, 5), (50, 50)] {
            let matrix = Matrix::empty(rows, cols);
            assert_eq!(matrix.row_count(), rows);
            for i in 0..rows {
                let row = matrix.row(i).expect("row present");
                assert_eq!(row.len(), cols);
                assert!(row.iter().all(Option::is_none));
            }
        }
    }

    #[test]
    fn test_get_out_of_range_is_none() {
        let matrix = Matrix::empty(2, 2).with_cell(1, 1, Some(Cell::filled(red())));
        assert!(matrix.get(1, 1).is_some());
        assert!(matrix.get(2, 0).is_none());
        assert!(matrix.get(0, 2).is_none());
        assert!(matrix.get(usize::MAX, usize::MAX).is_none());
    }

    #[test]
    fn test_with_cell_leaves_previous_revision_untouched() {
        let before = Matrix::empty(3, 3);
        let after = before.with_cell(0, 1, Some(Cell::filled(red())));

        assert!(before.get(0, 1).is_none());
        assert_eq!(after.get(0, 1), Some(&Cell::filled(red())));
        assert_eq!(after.painted_cells().count(), 1);
    }

    #[test]
    fn test_with_cell_creates_missing_row() {
        let matrix = Matrix::sparse(4).with_cell(2, 3, Some(Cell::filled(red())));
        assert_eq!(matrix.row_count(), 1);
        let row = matrix.row(2).expect("row created");
        assert_eq!(row.len(), 4);
        assert!(row[..3].iter().all(Option::is_none));
    }

    #[test]
    fn test_with_cell_ignores_column_outside_width() {
        let matrix = Matrix::empty(2, 2);
        let same = matrix.with_cell(0, 5, Some(Cell::filled(red())));
        assert_eq!(matrix, same);
    }

    #[test]
    fn test_paint_then_clear_matches_fresh() {
        let painted = Matrix::empty(3, 3).with_cell(1, 1, Some(Cell::filled(red())));
        let cleared = painted.with_cell(1, 1, None);
        assert_eq!(cleared, Matrix::empty(3, 3));
    }

    #[test]
    fn test_used_colors_and_symbols() {
        let green = HexColor::parse("#00FF00").expect("green");
        let matrix = Matrix::empty(2, 2)
            .with_cell(0, 0, Some(Cell::with_symbol(red(), "A")))
            .with_cell(0, 1, Some(Cell::with_symbol(green.clone(), "B")))
            .with_cell(1, 0, Some(Cell::with_symbol(red(), "A")))
            .with_cell(1, 1, Some(Cell::filled(green.clone())));

        assert_eq!(matrix.used_colors(), vec![red(), green]);
        assert_eq!(matrix.used_symbols(), vec!["A".to_string(), "B".to_string()]);
        assert!(matrix.has_symbols());
        assert!(!Matrix::empty(3, 3).has_symbols());
    }
}
