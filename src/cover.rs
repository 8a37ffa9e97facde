//! Minimum line cover over the zeros of the working matrix.
//!
//! König-style marking: unmatched rows are marked, then zeros in marked rows mark
//! their columns and matched pairs in marked columns mark their rows, until nothing
//! changes. Unmarked rows and marked columns form the cover.

use nalgebra::DMatrix;

use crate::matching::Matching;
use crate::utils::is_zero;

/// Rows and columns selected to cover every zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoveringLines {
    rows: Vec<bool>,
    cols: Vec<bool>,
}

impl CoveringLines {
    /// False for rows outside the matrix the cover was computed for.
    pub fn covers_row(&self, row: usize) -> bool {
        self.rows.get(row).copied().unwrap_or(false)
    }

    /// False for columns outside the matrix the cover was computed for.
    pub fn covers_col(&self, col: usize) -> bool {
        self.cols.get(col).copied().unwrap_or(false)
    }

    fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows.len() && col < self.cols.len()
    }

    /// True when the cell exists and neither its row nor its column is covered.
    pub fn is_uncovered(&self, row: usize, col: usize) -> bool {
        self.contains(row, col) && !self.covers_row(row) && !self.covers_col(col)
    }

    /// True when both the row and the column of the cell are covered.
    pub fn is_doubly_covered(&self, row: usize, col: usize) -> bool {
        self.covers_row(row) && self.covers_col(col)
    }

    pub fn covering_rows(&self) -> Vec<usize> {
        (0..self.rows.len()).filter(|&i| self.rows[i]).collect()
    }

    pub fn covering_cols(&self) -> Vec<usize> {
        (0..self.cols.len()).filter(|&j| self.cols[j]).collect()
    }

    /// Total number of lines.
    pub fn len(&self) -> usize {
        self.rows.iter().chain(&self.cols).filter(|&&c| c).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Compute the cover for `matrix` given the current `matching`.
///
/// Every zero is covered. When the matching is maximum the number of lines equals
/// the matching size.
pub fn minimum_cover(matrix: &DMatrix<f64>, matching: &Matching) -> CoveringLines {
    let (n_rows, n_cols) = matrix.shape();
    let mut marked_rows = vec![false; n_rows];
    let mut marked_cols = vec![false; n_cols];

    let mut pending: Vec<usize> = (0..n_rows).filter(|&r| matching.col_of(r).is_none()).collect();
    for &row in &pending {
        marked_rows[row] = true;
    }

    while let Some(row) = pending.pop() {
        for col in 0..n_cols {
            if marked_cols[col] || !is_zero(matrix[(row, col)]) {
                continue;
            }
            marked_cols[col] = true;
            if let Some(matched_row) = matching.row_of(col) {
                if !marked_rows[matched_row] {
                    marked_rows[matched_row] = true;
                    pending.push(matched_row);
                }
            }
        }
    }

    CoveringLines {
        rows: marked_rows.iter().map(|&m| !m).collect(),
        cols: marked_cols,
    }
}
