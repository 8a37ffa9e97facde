//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::collections::HashSet;

use hungarian_rs::SolveResult;

/// Best total over every one-to-one matching of size min(rows, cols).
pub fn brute_force(matrix: &[Vec<f64>], maximize: bool) -> f64 {
    let rows = matrix.len();
    let cols = matrix[0].len();
    if rows > cols {
        let transposed: Vec<Vec<f64>> = (0..cols)
            .map(|j| (0..rows).map(|i| matrix[i][j]).collect())
            .collect();
        return brute_force(&transposed, maximize);
    }

    let mut best = if maximize { f64::NEG_INFINITY } else { f64::INFINITY };
    let mut used = vec![false; cols];
    search(matrix, 0, 0.0, &mut used, maximize, &mut best);
    best
}

fn search(
    matrix: &[Vec<f64>],
    row: usize,
    acc: f64,
    used: &mut [bool],
    maximize: bool,
    best: &mut f64,
) {
    if row == matrix.len() {
        if (maximize && acc > *best) || (!maximize && acc < *best) {
            *best = acc;
        }
        return;
    }
    for col in 0..used.len() {
        if !used[col] {
            used[col] = true;
            search(matrix, row + 1, acc + matrix[row][col], used, maximize, best);
            used[col] = false;
        }
    }
}

/// Assert the assignment is a valid matching of size min(rows, cols) whose
/// reported total equals the sum over the original matrix.
pub fn assert_feasible(matrix: &[Vec<f64>], result: &SolveResult) {
    let rows = matrix.len();
    let cols = matrix[0].len();
    assert_eq!(result.assignment.len(), rows.min(cols));

    let unique_rows: HashSet<_> = result.assignment.iter().map(|p| p.row).collect();
    let unique_cols: HashSet<_> = result.assignment.iter().map(|p| p.col).collect();
    assert_eq!(unique_rows.len(), result.assignment.len(), "duplicate row");
    assert_eq!(unique_cols.len(), result.assignment.len(), "duplicate column");

    for p in &result.assignment {
        assert!(p.row < rows && p.col < cols, "pair {:?} outside original matrix", p);
    }

    let sum: f64 = result.assignment.iter().map(|p| matrix[p.row][p.col]).sum();
    assert_eq!(result.total_cost, sum);
}

/// Deterministic pseudo-random matrix with integer-valued costs in [0, 100).
pub fn lcg_matrix(rows: usize, cols: usize, seed: u64) -> Vec<Vec<f64>> {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    (0..rows)
        .map(|_| {
            (0..cols)
                .map(|_| {
                    state = state
                        .wrapping_mul(6364136223846793005)
                        .wrapping_add(1442695040888963407);
                    ((state >> 33) % 100) as f64
                })
                .collect()
        })
        .collect()
}
