//! Utility functions shared by the pipeline stages.

use nalgebra::DMatrix;

/// Exact zero test used for matching and covering.
///
/// Reductions only ever subtract a value from cells that are at least that value,
/// so a cell that should be zero is exactly `0.0` rather than a rounding residue.
#[inline]
pub fn is_zero(value: f64) -> bool {
    value == 0.0
}

/// Smallest value in an iterator, `f64::INFINITY` when empty.
pub fn min_of<I: IntoIterator<Item = f64>>(values: I) -> f64 {
    values.into_iter().fold(f64::INFINITY, f64::min)
}

/// Largest value in an iterator, `f64::NEG_INFINITY` when empty.
pub fn max_of<I: IntoIterator<Item = f64>>(values: I) -> f64 {
    values.into_iter().fold(f64::NEG_INFINITY, f64::max)
}

/// Count zero cells in a matrix.
#[cfg(test)]
pub fn count_zeros(matrix: &DMatrix<f64>) -> usize {
    matrix.iter().filter(|&&x| is_zero(x)).count()
}

/// Copy a matrix into row-major nested vectors.
pub fn to_rows(matrix: &DMatrix<f64>) -> Vec<Vec<f64>> {
    matrix
        .row_iter()
        .map(|row| row.iter().copied().collect())
        .collect()
}

/// Display label of a row ("worker"), 1-based.
pub fn worker_label(row: usize) -> String {
    format!("Worker {}", row + 1)
}

/// Display label of a column ("task"), 1-based.
pub fn task_label(col: usize) -> String {
    format!("Task {}", col + 1)
}
