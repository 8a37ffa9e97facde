//! Assignment solver: configuration, pipeline and result.
//!
//! Validation -> normalization -> row/column reduction -> loop of
//! (matching -> cover -> adjustment) until the zero matching is complete ->
//! finalization against the original matrix.

use std::fmt;
use std::str::FromStr;

use log::{debug, trace};
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::adjust::adjust;
use crate::cover::minimum_cover;
use crate::matching::{find_matching, Matching};
use crate::matrix::CostMatrix;
use crate::normalize::{balance, to_minimization, Padding};
use crate::reduce::{reduce_columns, reduce_rows};
use crate::trace::Trace;
use crate::utils::{task_label, worker_label};
use crate::{Error, Result};

/// Optimization direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Objective {
    #[default]
    #[serde(alias = "min")]
    Minimize,
    #[serde(alias = "max")]
    Maximize,
}

impl Objective {
    pub fn from_maximize(maximize: bool) -> Self {
        if maximize {
            Objective::Maximize
        } else {
            Objective::Minimize
        }
    }

    pub fn is_maximize(self) -> bool {
        self == Objective::Maximize
    }
}

impl FromStr for Objective {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "min" | "minimize" | "minimise" => Ok(Objective::Minimize),
            "max" | "maximize" | "maximise" => Ok(Objective::Maximize),
            other => Err(Error::InvalidConfig(format!("unknown objective: {}", other))),
        }
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Objective::Minimize => write!(f, "minimize"),
            Objective::Maximize => write!(f, "maximize"),
        }
    }
}

/// Solver configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Minimize or maximize the total cost
    pub objective: Objective,
    /// Reject inputs whose balanced dimension max(rows, cols) exceeds this
    pub max_dimension: Option<usize>,
    /// Record matrix snapshots after each stage. When off only the input is kept.
    pub record_trace: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            objective: Objective::Minimize,
            max_dimension: None,
            record_trace: true,
        }
    }
}

impl SolverConfig {
    pub fn new(maximize: bool) -> Self {
        Self {
            objective: Objective::from_maximize(maximize),
            ..Self::default()
        }
    }

    pub fn with_max_dimension(mut self, limit: usize) -> Self {
        self.max_dimension = Some(limit);
        self
    }

    pub fn with_record_trace(mut self, record_trace: bool) -> Self {
        self.record_trace = record_trace;
        self
    }

    /// Parse a configuration from JSON, filling missing fields with defaults.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_dimension == Some(0) {
            return Err(Error::InvalidConfig(
                "max_dimension must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// A matched (row, column) pair in the original matrix's index space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pair {
    pub row: usize,
    pub col: usize,
}

impl Pair {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for Pair {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", worker_label(self.row), task_label(self.col))
    }
}

/// Outcome of a solve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveResult {
    /// The matrix as supplied, before any conversion or padding
    pub original_matrix: CostMatrix,
    /// Real pairs only, ascending by row; length is min(rows, cols)
    pub assignment: Vec<Pair>,
    /// Sum of original-matrix values over `assignment`
    pub total_cost: f64,
    pub maximize: bool,
    pub trace: Trace,
    pub padding: Padding,
    /// Number of dual adjustments performed
    pub iterations: usize,
}

impl SolveResult {
    /// m x n indicator grid with 1 at assigned cells.
    pub fn assignment_matrix(&self) -> Vec<Vec<u8>> {
        let (rows, cols) = self.original_matrix.shape();
        let mut grid = vec![vec![0u8; cols]; rows];
        for pair in &self.assignment {
            grid[pair.row][pair.col] = 1;
        }
        grid
    }

    /// Column assigned to `row`, if any.
    pub fn col_for_row(&self, row: usize) -> Option<usize> {
        self.assignment.iter().find(|p| p.row == row).map(|p| p.col)
    }

    /// One line per pair, e.g. `Worker 1 -> Task 2 (cost 1)`.
    pub fn describe(&self) -> Vec<String> {
        self.assignment
            .iter()
            .map(|pair| {
                let cost = self.original_matrix.get(pair.row, pair.col).unwrap_or_default();
                format!("{} (cost {})", pair, cost)
            })
            .collect()
    }

    /// JSON payload in the shape report and UI collaborators consume.
    pub fn to_json(&self) -> Value {
        let assignment: Vec<[usize; 2]> = self.assignment.iter().map(|p| [p.row, p.col]).collect();
        json!({
            "assignment": assignment,
            "total_cost": self.total_cost,
            "optimal_value": self.total_cost,
            "steps": self.trace,
            "original_matrix": self.original_matrix,
            "is_maximization": self.maximize,
        })
    }

    /// Pretty-printed form of [`SolveResult::to_json`].
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_json())?)
    }
}

/// Reusable solver. Holds only its configuration, so one instance can serve any
/// number of unrelated solves, including from several threads.
#[derive(Debug, Clone, Default)]
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solve a typed row-major matrix.
    pub fn solve(&self, matrix: &[Vec<f64>]) -> Result<SolveResult> {
        self.solve_matrix(CostMatrix::from_rows(matrix)?)
    }

    /// Solve untyped JSON input (cells may be numbers or numeric strings).
    pub fn solve_json(&self, value: &Value) -> Result<SolveResult> {
        self.solve_matrix(CostMatrix::from_json(value)?)
    }

    /// Solve an already validated matrix.
    pub fn solve_matrix(&self, original: CostMatrix) -> Result<SolveResult> {
        let (rows, cols) = original.shape();
        if let Some(limit) = self.config.max_dimension {
            let dimension = original.balanced_dim();
            if dimension > limit {
                return Err(Error::MatrixTooLarge { dimension, limit });
            }
        }

        let maximize = self.config.objective.is_maximize();
        debug!("Solving {}x{} assignment ({})", rows, cols, self.config.objective);

        let mut steps = Trace::new();
        let mut working = original.as_dmatrix().clone();
        steps.record("Input matrix", &working);

        if maximize {
            let max_val = to_minimization(&mut working);
            debug!("Converted to minimization against max {}", max_val);
            self.checkpoint(&mut steps, "Convert maximization to minimization", &working);
        }

        let (mut working, padding) = balance(working);
        if let Some(label) = padding.label() {
            debug!("{} to reach {}x{}", label, working.nrows(), working.ncols());
            self.checkpoint(&mut steps, label, &working);
        }

        reduce_rows(&mut working);
        self.checkpoint(&mut steps, "Row reduction", &working);
        reduce_columns(&mut working);
        self.checkpoint(&mut steps, "Column reduction", &working);

        let (matching, iterations) = self.solve_reduced(&mut working, &mut steps)?;
        Ok(finalize(original, &matching, padding, maximize, steps, iterations))
    }

    /// Run the matching / cover / adjustment loop on a reduced square matrix.
    fn solve_reduced(
        &self,
        working: &mut DMatrix<f64>,
        steps: &mut Trace,
    ) -> Result<(Matching, usize)> {
        let n = working.nrows();
        // Each adjustment grows the set of rows reachable from unmatched rows or
        // grows the matching, so n^2 adjustments always suffice
        let max_iterations = (n + 1) * (n + 1);
        let mut iterations = 0;

        loop {
            let matching = find_matching(working);
            debug!("Iteration {}: matched {}/{}", iterations, matching.len(), n);
            if matching.is_complete() {
                return Ok((matching, iterations));
            }

            let lines = minimum_cover(working, &matching);
            trace!(
                "Covering rows {:?}, columns {:?}",
                lines.covering_rows(),
                lines.covering_cols()
            );
            if lines.len() != matching.len() {
                return Err(Error::InternalInvariantViolation(format!(
                    "cover has {} lines for a matching of size {}",
                    lines.len(),
                    matching.len()
                )));
            }

            let min_val = adjust(working, &lines)?;
            iterations += 1;
            self.checkpoint(
                steps,
                format!("Adjust matrix (min uncovered: {})", min_val),
                working,
            );

            if iterations > max_iterations {
                return Err(Error::InternalInvariantViolation(format!(
                    "no complete matching after {} adjustments",
                    iterations
                )));
            }
        }
    }

    fn checkpoint(&self, steps: &mut Trace, label: impl Into<String>, working: &DMatrix<f64>) {
        if self.config.record_trace {
            steps.record(label, working);
        }
    }
}

/// Drop padding pairs and total the cost on the original matrix.
fn finalize(
    original: CostMatrix,
    matching: &Matching,
    padding: Padding,
    maximize: bool,
    trace: Trace,
    iterations: usize,
) -> SolveResult {
    let (rows, cols) = original.shape();
    let assignment: Vec<Pair> = matching
        .pairs()
        .into_iter()
        .filter(|&(r, c)| r < rows && c < cols)
        .map(Pair::from)
        .collect();
    let total_cost: f64 = assignment
        .iter()
        .filter_map(|p| original.get(p.row, p.col))
        .sum();

    debug!(
        "Solved after {} adjustments: {} pairs, total cost {}",
        iterations,
        assignment.len(),
        total_cost
    );

    SolveResult {
        original_matrix: original,
        assignment,
        total_cost,
        maximize,
        trace,
        padding,
        iterations,
    }
}

/// Solve `matrix` with default settings.
pub fn solve(matrix: &[Vec<f64>], maximize: bool) -> Result<SolveResult> {
    Solver::new(SolverConfig::new(maximize))?.solve(matrix)
}

/// Solve untyped JSON input with default settings.
pub fn solve_json(value: &Value, maximize: bool) -> Result<SolveResult> {
    Solver::new(SolverConfig::new(maximize))?.solve_json(value)
}
