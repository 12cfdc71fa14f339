//! Orientation flip of the cell matrix.
//!
//! [`transpose`] is pure geometry: it swaps the grid's axes and relocates
//! every cell. It does **not** touch the `is_horizontal` flag. The owning
//! controller ([`GridState`](crate::GridState)) flips that flag in the same
//! step it calls `transpose`; calling code must not flip it a second time.

use crate::{Cell, Matrix};

/// Result of a transpose: the new matrix and its swapped dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transposed {
    /// Relocated cells.
    pub matrix: Matrix,
    /// Row count after the flip (the old column count).
    pub rows: usize,
    /// Column count after the flip (the old row count).
    pub cols: usize,
}

/// Move the content of every `(i, j)` with `i < rows, j < cols` to `(j, i)`.
///
/// Source positions past the declared bounds are never visited, and missing
/// source rows read as empty, so a sparse matrix transposes cleanly.
#[must_use]
pub fn transpose(matrix: &Matrix, rows: usize, cols: usize) -> Transposed {
    let new_rows = cols;
    let new_cols = rows;

    let relocated: Vec<Vec<Option<Cell>>> = (0..new_rows)
        .map(|i| (0..new_cols).map(|j| matrix.get(j, i).cloned()).collect())
        .collect();

    tracing::trace!(rows, cols, "Transposed matrix");

    Transposed {
        matrix: Matrix::from_rows(new_cols, relocated),
        rows: new_rows,
        cols: new_cols,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HexColor;

    fn cell(color: &str, symbol: &str) -> Option<Cell> {
        Some(Cell::with_symbol(
            HexColor::parse(color).expect("color"),
            symbol,
        ))
    }

    #[test]
    fn test_swaps_dimensions() {
        let result = transpose(&Matrix::empty(3, 5), 3, 5);
        assert_eq!((result.rows, result.cols), (5, 3));
        assert_eq!(result.matrix.row_count(), 5);
        assert_eq!(result.matrix.cols(), 3);
    }

    #[test]
    fn test_single_cell_moves_to_mirror_position() {
        let matrix = Matrix::empty(2, 3).with_cell(0, 2, cell("#00FF00", "star"));
        let result = transpose(&matrix, 2, 3);

        assert_eq!(result.matrix.get(2, 0), cell("#00FF00", "star").as_ref());
        assert_eq!(result.matrix.painted_cells().count(), 1);
    }

    #[test]
    fn test_square_matrix() {
        let matrix = Matrix::empty(3, 3)
            .with_cell(0, 1, cell("#FF0000", "A"))
            .with_cell(1, 2, cell("#00FF00", "B"));
        let result = transpose(&matrix, 3, 3);

        assert_eq!(result.matrix.get(1, 0), cell("#FF0000", "A").as_ref());
        assert_eq!(result.matrix.get(2, 1), cell("#00FF00", "B").as_ref());
    }

    #[test]
    fn test_sparse_source_reads_as_empty() {
        let matrix = Matrix::sparse(4).with_cell(1, 3, cell("#0000FF", "x"));
        let result = transpose(&matrix, 2, 4);

        assert_eq!(result.matrix.row_count(), 4);
        assert_eq!(result.matrix.get(3, 1), cell("#0000FF", "x").as_ref());
        assert_eq!(result.matrix.painted_cells().count(), 1);
    }

    #[test]
    fn test_ignores_cells_outside_declared_bounds() {
        let matrix = Matrix::empty(3, 3).with_cell(2, 2, cell("#FF0000", "A"));
        let result = transpose(&matrix, 2, 2);
        assert_eq!(result.matrix.painted_cells().count(), 0);
    }
}
