//! # Hungarian - Assignment Problem Solver
//!
//! Kuhn-Munkres (Hungarian method) solver for the linear assignment problem in its
//! matrix-reduction form: row/column reduction, zero matching, minimum line cover
//! and dual adjustment, repeated until a complete matching of zeros exists.
//!
//! ## Features
//!
//! - Minimization and maximization objectives
//! - Unbalanced (rectangular) matrices via zero-cost dummy rows/columns
//! - Full trace of intermediate matrix states for display
//! - Typed validation errors for empty, ragged and non-finite input
//!
//! ## Example
//!
//! ```rust
//! use hungarian_rs::solve;
//!
//! let cost = vec![
//!     vec![3.0, 1.0, 4.0],
//!     vec![2.0, 0.0, 5.0],
//!     vec![1.0, 3.0, 2.0],
//! ];
//! let result = solve(&cost, false).unwrap();
//! assert_eq!(result.total_cost, 5.0);
//! assert_eq!(result.assignment.len(), 3);
//! ```

// Pipeline stages
pub mod validate;
pub mod normalize;
pub mod reduce;
pub mod matching;
pub mod cover;
pub mod adjust;

// Public modules
pub mod matrix;
pub mod trace;
pub mod solver;
pub mod utils;

// Re-exports for convenience
pub use matrix::CostMatrix;
pub use solver::{solve, solve_json, Objective, Pair, SolveResult, Solver, SolverConfig};
pub use trace::{StepRecord, Trace};
pub use validate::{inspect, MatrixReport};

// Error types
pub use crate::error::{Error, Result};

mod error {
    use thiserror::Error;

    /// Errors that can occur while validating input or solving.
    #[derive(Error, Debug)]
    pub enum Error {
        #[error("Empty matrix: at least one row and one column are required")]
        EmptyMatrix,

        #[error("Ragged matrix: row {row} has {found} columns, expected {expected}")]
        RaggedMatrix {
            row: usize,
            expected: usize,
            found: usize,
        },

        #[error("Non-numeric entry at row {row}, column {col}: {value}")]
        NonNumericEntry {
            row: usize,
            col: usize,
            value: String,
        },

        #[error("Value range overflow: values from {min} to {max} cannot be reduced without overflow")]
        ValueRangeOverflow { min: f64, max: f64 },

        #[error("Malformed input: {0}")]
        MalformedInput(String),

        #[error("Matrix too large: dimension {dimension} exceeds limit {limit}")]
        MatrixTooLarge { dimension: usize, limit: usize },

        #[error("Invalid configuration: {0}")]
        InvalidConfig(String),

        #[error("Internal invariant violated: {0}")]
        InternalInvariantViolation(String),

        #[error("JSON error: {0}")]
        Json(#[from] serde_json::Error),
    }

    impl Error {
        /// True when the error is caused by the caller's input rather than a solver defect.
        pub fn is_input_error(&self) -> bool {
            !matches!(self, Error::InternalInvariantViolation(_))
        }
    }

    /// Result type for solver operations
    pub type Result<T> = std::result::Result<T, Error>;
}
