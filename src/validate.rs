//! Input validation.
//!
//! Checks run before any numeric work, in a fixed order: emptiness, then row
//! lengths across all rows, then every cell in row-major order, then the value
//! range of the whole matrix. The first failure is reported.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Error, Result};

/// Validate a typed matrix and return its `(rows, cols)` shape.
pub fn validate_rows(rows: &[Vec<f64>]) -> Result<(usize, usize)> {
    let n_rows = rows.len();
    let n_cols = rows.first().map_or(0, Vec::len);
    if n_rows == 0 || n_cols == 0 {
        return Err(Error::EmptyMatrix);
    }

    for (i, row) in rows.iter().enumerate() {
        if row.len() != n_cols {
            return Err(Error::RaggedMatrix {
                row: i,
                expected: n_cols,
                found: row.len(),
            });
        }
    }

    for (i, row) in rows.iter().enumerate() {
        for (j, &value) in row.iter().enumerate() {
            if !value.is_finite() {
                return Err(Error::NonNumericEntry {
                    row: i,
                    col: j,
                    value: value.to_string(),
                });
            }
        }
    }

    check_value_range(rows.iter().flatten().copied(), n_rows, n_cols)?;
    Ok((n_rows, n_cols))
}

/// Reject finite values whose range would overflow during solving.
///
/// With n' = max(rows, cols), working values stay within n' times the span
/// `max - min` and the total cost is at most min(rows, cols) times the largest
/// magnitude. Both bounds must stay finite with a factor of two to spare.
pub fn check_value_range<I: IntoIterator<Item = f64>>(
    values: I,
    n_rows: usize,
    n_cols: usize,
) -> Result<()> {
    let (min_val, max_val) = values
        .into_iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    let span = max_val - min_val;
    let magnitude = span.max(min_val.abs()).max(max_val.abs());
    let dim = n_rows.max(n_cols) as f64;

    if !span.is_finite() || !(magnitude * 2.0 * (dim + 1.0)).is_finite() {
        return Err(Error::ValueRangeOverflow {
            min: min_val,
            max: max_val,
        });
    }
    Ok(())
}

/// Interpret an untyped cell as a number.
///
/// JSON numbers and numeric strings are accepted; finiteness is not checked here.
pub fn parse_cell(cell: &Value) -> Option<f64> {
    match cell {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn json_rows(value: &Value) -> Result<Vec<&Vec<Value>>> {
    let rows = value
        .as_array()
        .ok_or_else(|| Error::MalformedInput("expected an array of rows".to_string()))?;
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            row.as_array()
                .ok_or_else(|| Error::MalformedInput(format!("row {} is not an array", i)))
        })
        .collect()
}

/// Validate untyped JSON input (an array of arrays) and convert it to numbers.
pub fn parse_json(value: &Value) -> Result<Vec<Vec<f64>>> {
    let rows = json_rows(value)?;
    let n_cols = rows.first().map_or(0, |r| r.len());
    if rows.is_empty() || n_cols == 0 {
        return Err(Error::EmptyMatrix);
    }

    for (i, row) in rows.iter().enumerate() {
        if row.len() != n_cols {
            return Err(Error::RaggedMatrix {
                row: i,
                expected: n_cols,
                found: row.len(),
            });
        }
    }

    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            row.iter()
                .enumerate()
                .map(|(j, cell)| match parse_cell(cell) {
                    Some(v) if v.is_finite() => Ok(v),
                    _ => Err(Error::NonNumericEntry {
                        row: i,
                        col: j,
                        value: cell.to_string(),
                    }),
                })
                .collect::<Result<Vec<f64>>>()
        })
        .collect()
}

/// Non-short-circuiting validation report for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub rows: usize,
    pub cols: usize,
    pub is_square: bool,
}

/// Inspect untyped input and collect every problem instead of stopping at the first.
///
/// Positions in messages are 1-based.
pub fn inspect(value: &Value) -> MatrixReport {
    let mut report = MatrixReport {
        is_valid: true,
        errors: Vec::new(),
        warnings: Vec::new(),
        rows: 0,
        cols: 0,
        is_square: false,
    };

    let rows = match json_rows(value) {
        Ok(rows) => rows,
        Err(e) => {
            report.is_valid = false;
            report.errors.push(e.to_string());
            return report;
        }
    };

    let n_cols = rows.first().map_or(0, |r| r.len());
    if rows.is_empty() || n_cols == 0 {
        report.is_valid = false;
        report.errors.push("Matrix is empty".to_string());
        return report;
    }

    report.rows = rows.len();
    report.cols = n_cols;
    report.is_square = report.rows == report.cols;

    for (i, row) in rows.iter().enumerate() {
        if row.len() != n_cols {
            report.is_valid = false;
            report.errors.push(format!(
                "Row {} has {} columns, expected {}",
                i + 1,
                row.len(),
                n_cols
            ));
        }
    }

    for (i, row) in rows.iter().enumerate() {
        for (j, cell) in row.iter().enumerate() {
            if !parse_cell(cell).is_some_and(f64::is_finite) {
                report.is_valid = false;
                report.errors.push(format!(
                    "Value at row {}, column {} is not a finite number: {}",
                    i + 1,
                    j + 1,
                    cell
                ));
            }
        }
    }

    if report.is_valid {
        let values = rows.iter().flat_map(|row| row.iter().filter_map(parse_cell));
        if let Err(e) = check_value_range(values, report.rows, report.cols) {
            report.is_valid = false;
            report.errors.push(e.to_string());
        }
    }

    if !report.is_square {
        report.warnings.push(format!(
            "Matrix is unbalanced ({}x{}); dummy {} will be added",
            report.rows,
            report.cols,
            if report.rows < report.cols { "rows" } else { "columns" }
        ));
    }

    report
}
