//! Zero-based matching extraction.
//!
//! A greedy pass picks zeros row by row, starting from the most constrained row.
//! The greedy result is then grown to a maximum matching over the same zero
//! pattern with augmenting paths, so the line cover computed from it is minimum.

use std::collections::VecDeque;

use nalgebra::DMatrix;

use crate::utils::is_zero;

/// A one-to-one matching between rows and columns of a square working matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matching {
    row_to_col: Vec<Option<usize>>,
    col_to_row: Vec<Option<usize>>,
}

impl Matching {
    pub fn new(n_rows: usize, n_cols: usize) -> Self {
        Self {
            row_to_col: vec![None; n_rows],
            col_to_row: vec![None; n_cols],
        }
    }

    /// Record `row -> col`. Both must be unmatched.
    fn assign(&mut self, row: usize, col: usize) {
        debug_assert!(self.row_to_col[row].is_none() && self.col_to_row[col].is_none());
        self.row_to_col[row] = Some(col);
        self.col_to_row[col] = Some(row);
    }

    pub fn col_of(&self, row: usize) -> Option<usize> {
        self.row_to_col.get(row).copied().flatten()
    }

    pub fn row_of(&self, col: usize) -> Option<usize> {
        self.col_to_row.get(col).copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.row_to_col.iter().filter(|c| c.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when every row is matched.
    pub fn is_complete(&self) -> bool {
        self.row_to_col.iter().all(Option::is_some)
    }

    /// Matched `(row, col)` pairs in ascending row order.
    pub fn pairs(&self) -> Vec<(usize, usize)> {
        self.row_to_col
            .iter()
            .enumerate()
            .filter_map(|(row, col)| col.map(|c| (row, c)))
            .collect()
    }
}

/// Columns of `row` holding a zero that are still available.
fn available_zeros<'a>(
    matrix: &'a DMatrix<f64>,
    row: usize,
    col_done: &'a [bool],
) -> impl Iterator<Item = usize> + 'a {
    (0..matrix.ncols()).filter(move |&col| !col_done[col] && is_zero(matrix[(row, col)]))
}

/// Greedy extraction of a matching from the zeros of `matrix`.
///
/// Repeatedly takes the remaining row with the fewest available zeros (lowest index
/// on ties) and matches it to its first available zero column. The chosen row and
/// column are then unavailable for the rest of the pass. The matrix is not modified.
pub fn greedy_zero_matching(matrix: &DMatrix<f64>) -> Matching {
    let (n_rows, n_cols) = matrix.shape();
    let mut matching = Matching::new(n_rows, n_cols);
    let mut row_done = vec![false; n_rows];
    let mut col_done = vec![false; n_cols];

    loop {
        let mut best: Option<(usize, usize)> = None;
        for row in (0..n_rows).filter(|&r| !row_done[r]) {
            let zeros = available_zeros(matrix, row, &col_done).count();
            if zeros > 0 && best.map_or(true, |(count, _)| zeros < count) {
                best = Some((zeros, row));
            }
        }

        let Some((_, row)) = best else { break };
        let Some(col) = available_zeros(matrix, row, &col_done).next() else { break };

        matching.assign(row, col);
        row_done[row] = true;
        col_done[col] = true;
    }

    matching
}

/// Grow `matching` to a maximum matching over the zeros of `matrix`.
///
/// Unmatched rows are tried in ascending order; each search is a breadth-first walk
/// over alternating paths that scans columns in ascending order.
pub fn augment_to_maximum(matrix: &DMatrix<f64>, matching: &mut Matching) {
    let n_rows = matrix.nrows();
    for start in 0..n_rows {
        if matching.col_of(start).is_none() {
            augment_from(matrix, matching, start);
        }
    }
}

/// Search an augmenting path from the unmatched row `start` and flip it.
///
/// Returns true if the matching grew.
fn augment_from(matrix: &DMatrix<f64>, matching: &mut Matching, start: usize) -> bool {
    let n_cols = matrix.ncols();
    let mut parent_of_col: Vec<Option<usize>> = vec![None; n_cols];
    let mut queue = VecDeque::from([start]);
    let mut free_col = None;

    'bfs: while let Some(row) = queue.pop_front() {
        for col in 0..n_cols {
            if parent_of_col[col].is_some() || !is_zero(matrix[(row, col)]) {
                continue;
            }
            parent_of_col[col] = Some(row);
            match matching.row_of(col) {
                None => {
                    free_col = Some(col);
                    break 'bfs;
                }
                Some(next_row) => queue.push_back(next_row),
            }
        }
    }

    let Some(mut col) = free_col else {
        return false;
    };

    // Flip the path back to the start row
    while let Some(row) = parent_of_col[col] {
        let previous = matching.row_to_col[row];
        matching.row_to_col[row] = Some(col);
        matching.col_to_row[col] = Some(row);
        match previous {
            Some(prev_col) => col = prev_col,
            None => break,
        }
    }
    true
}

/// Maximum matching over the current zero pattern, seeded by the greedy pass.
pub fn find_matching(matrix: &DMatrix<f64>) -> Matching {
    let mut matching = greedy_zero_matching(matrix);
    augment_to_maximum(matrix, &mut matching);
    matching
}
