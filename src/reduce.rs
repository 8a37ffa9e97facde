//! Row and column reduction.
//!
//! After both passes every row and every column of the working matrix holds at
//! least one zero and no cell is negative.

use nalgebra::DMatrix;

use crate::utils::{is_zero, min_of};

/// Subtract each row's minimum from the row. Returns the subtracted minima.
pub fn reduce_rows(matrix: &mut DMatrix<f64>) -> Vec<f64> {
    matrix
        .row_iter_mut()
        .map(|mut row| {
            let min_val = min_of(row.iter().copied());
            if !is_zero(min_val) {
                row.iter_mut().for_each(|v| *v -= min_val);
            }
            min_val
        })
        .collect()
}

/// Subtract each column's minimum from the column. Returns the subtracted minima.
pub fn reduce_columns(matrix: &mut DMatrix<f64>) -> Vec<f64> {
    matrix
        .column_iter_mut()
        .map(|mut col| {
            let min_val = min_of(col.iter().copied());
            if !is_zero(min_val) {
                col.iter_mut().for_each(|v| *v -= min_val);
            }
            min_val
        })
        .collect()
}
