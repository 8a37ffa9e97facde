//! Step trace: an append-only log of labelled working-matrix snapshots.
//!
//! The trace is filled at fixed checkpoints by the solver and has no influence on
//! the result. Identical input always yields an identical trace.

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

use crate::utils::to_rows;

/// One labelled snapshot of the working matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    #[serde(rename = "description")]
    pub label: String,
    /// Row-major copy of the working matrix at this checkpoint
    pub matrix: Vec<Vec<f64>>,
}

impl StepRecord {
    pub fn new(label: impl Into<String>, matrix: &DMatrix<f64>) -> Self {
        Self {
            label: label.into(),
            matrix: to_rows(matrix),
        }
    }
}

/// Ordered sequence of steps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Trace {
    steps: Vec<StepRecord>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a snapshot of `matrix` under `label`.
    pub fn record(&mut self, label: impl Into<String>, matrix: &DMatrix<f64>) {
        self.steps.push(StepRecord::new(label, matrix));
    }

    pub fn get(&self, index: usize) -> Option<&StepRecord> {
        self.steps.get(index)
    }

    pub fn first(&self) -> Option<&StepRecord> {
        self.steps.first()
    }

    pub fn last(&self) -> Option<&StepRecord> {
        self.steps.last()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StepRecord> {
        self.steps.iter()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.label.as_str()).collect()
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a StepRecord;
    type IntoIter = std::slice::Iter<'a, StepRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}
