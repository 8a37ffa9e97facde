//! Problem normalization: maximization to minimization, and balancing.

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

use crate::utils::max_of;

/// Dummy rows/columns added to make the working matrix square.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Padding {
    pub dummy_rows: usize,
    pub dummy_cols: usize,
}

impl Padding {
    pub fn is_empty(&self) -> bool {
        self.dummy_rows == 0 && self.dummy_cols == 0
    }

    /// Trace label for the balancing step, `None` when nothing was added.
    pub fn label(&self) -> Option<String> {
        fn plural(n: usize, noun: &str) -> String {
            if n == 1 {
                format!("Add 1 dummy {}", noun)
            } else {
                format!("Add {} dummy {}s", n, noun)
            }
        }

        if self.dummy_rows > 0 {
            Some(plural(self.dummy_rows, "row"))
        } else if self.dummy_cols > 0 {
            Some(plural(self.dummy_cols, "column"))
        } else {
            None
        }
    }
}

/// Replace every cell `v` with `max - v` in place and return `max`.
///
/// Minimizing the converted matrix maximizes the original one.
pub fn to_minimization(matrix: &mut DMatrix<f64>) -> f64 {
    let max_val = max_of(matrix.iter().copied());
    matrix.apply(|v| *v = max_val - *v);
    max_val
}

/// Pad the smaller dimension with zero-cost rows or columns until square.
pub fn balance(matrix: DMatrix<f64>) -> (DMatrix<f64>, Padding) {
    let (rows, cols) = matrix.shape();
    let n = rows.max(cols);
    let padding = Padding {
        dummy_rows: n - rows,
        dummy_cols: n - cols,
    };

    if padding.is_empty() {
        return (matrix, padding);
    }
    (matrix.resize(n, n, 0.0), padding)
}
