//! Validated cost matrix.

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utils::{max_of, to_rows};
use crate::validate::{check_value_range, parse_json, validate_rows};
use crate::{Error, Result};

/// An m x n grid of finite costs.
///
/// Construction always goes through validation, so a `CostMatrix` is never empty,
/// never ragged and holds no NaN or infinite values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct CostMatrix {
    data: DMatrix<f64>,
}

impl CostMatrix {
    /// Build from row-major nested vectors.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let (n_rows, n_cols) = validate_rows(rows)?;
        let flat: Vec<f64> = rows.iter().flatten().copied().collect();
        Ok(Self {
            data: DMatrix::from_row_slice(n_rows, n_cols, &flat),
        })
    }

    /// Build from untyped JSON (array of arrays of numbers or numeric strings).
    pub fn from_json(value: &Value) -> Result<Self> {
        let rows = parse_json(value)?;
        Self::from_rows(&rows)
    }

    /// Build from an existing nalgebra matrix.
    pub fn from_dmatrix(data: DMatrix<f64>) -> Result<Self> {
        if data.nrows() == 0 || data.ncols() == 0 {
            return Err(Error::EmptyMatrix);
        }
        if let Some(index) = data.iter().position(|x| !x.is_finite()) {
            // nalgebra storage is column-major
            let (row, col) = (index % data.nrows(), index / data.nrows());
            return Err(Error::NonNumericEntry {
                row,
                col,
                value: data[(row, col)].to_string(),
            });
        }
        check_value_range(data.iter().copied(), data.nrows(), data.ncols())?;
        Ok(Self { data })
    }

    pub fn nrows(&self) -> usize {
        self.data.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.data.ncols()
    }

    pub fn shape(&self) -> (usize, usize) {
        self.data.shape()
    }

    pub fn is_square(&self) -> bool {
        self.data.is_square()
    }

    /// Dimension of the balanced (square) working matrix.
    pub fn balanced_dim(&self) -> usize {
        self.nrows().max(self.ncols())
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.data.get((row, col)).copied()
    }

    pub fn max_value(&self) -> f64 {
        max_of(self.data.iter().copied())
    }

    pub fn as_dmatrix(&self) -> &DMatrix<f64> {
        &self.data
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        to_rows(&self.data)
    }
}

impl TryFrom<Vec<Vec<f64>>> for CostMatrix {
    type Error = Error;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self> {
        Self::from_rows(&rows)
    }
}

impl From<CostMatrix> for Vec<Vec<f64>> {
    fn from(matrix: CostMatrix) -> Self {
        matrix.to_rows()
    }
}
