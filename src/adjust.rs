//! Dual adjustment with the minimum uncovered value.

use log::warn;
use nalgebra::DMatrix;

use crate::cover::CoveringLines;
use crate::utils::min_of;
use crate::{Error, Result};

/// Smallest value among cells covered by neither a covering row nor a covering column.
pub fn min_uncovered(matrix: &DMatrix<f64>, lines: &CoveringLines) -> Result<f64> {
    let (n_rows, n_cols) = matrix.shape();
    let uncovered = (0..n_rows)
        .flat_map(|i| (0..n_cols).map(move |j| (i, j)))
        .filter(|&(i, j)| lines.is_uncovered(i, j))
        .map(|(i, j)| matrix[(i, j)]);
    let min_val = min_of(uncovered);

    if min_val == f64::INFINITY {
        warn!("No uncovered cell with {} covering lines", lines.len());
        return Err(Error::InternalInvariantViolation(
            "no uncovered cell left while the matching is incomplete".to_string(),
        ));
    }
    if min_val <= 0.0 {
        warn!("Minimum uncovered value {} is not positive", min_val);
        return Err(Error::InternalInvariantViolation(format!(
            "minimum uncovered value {} is not positive",
            min_val
        )));
    }
    Ok(min_val)
}

/// Subtract the minimum uncovered value from uncovered cells and add it to doubly
/// covered cells. Singly covered cells are left alone. Returns the value used.
pub fn adjust(matrix: &mut DMatrix<f64>, lines: &CoveringLines) -> Result<f64> {
    let min_val = min_uncovered(matrix, lines)?;
    let (n_rows, n_cols) = matrix.shape();
    for i in 0..n_rows {
        for j in 0..n_cols {
            if lines.is_uncovered(i, j) {
                matrix[(i, j)] -= min_val;
            } else if lines.is_doubly_covered(i, j) {
                matrix[(i, j)] += min_val;
            }
        }
    }
    Ok(min_val)
}
