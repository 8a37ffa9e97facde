//! Integration tests for the assignment solver.
//!
//! These tests exercise complete solves through the public API.

mod common;

use approx::assert_relative_eq;
use serde_json::json;

use common::{assert_feasible, brute_force, lcg_matrix};
use hungarian_rs::{solve, solve_json, Error, Pair, Solver, SolverConfig};

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_scenario_three_by_three() {
    let cost = vec![
        vec![3.0, 1.0, 4.0],
        vec![2.0, 0.0, 5.0],
        vec![1.0, 3.0, 2.0],
    ];
    let result = solve(&cost, false).unwrap();

    assert_feasible(&cost, &result);
    // Every permutation of this matrix sums to at least 5
    assert_eq!(result.total_cost, 5.0);
    assert_eq!(result.total_cost, brute_force(&cost, false));
}

#[test]
fn test_scenario_more_rows_than_columns() {
    let cost = vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]];
    let result = solve(&cost, false).unwrap();

    assert_feasible(&cost, &result);
    assert_eq!(result.assignment.len(), 2);
    assert_eq!(result.total_cost, 5.0);
    assert_eq!(result.padding.dummy_cols, 1);
}

#[test]
fn test_scenario_more_columns_than_rows() {
    let cost = vec![vec![9.0, 2.0, 7.0, 8.0], vec![6.0, 4.0, 3.0, 7.0]];
    let result = solve(&cost, false).unwrap();

    assert_feasible(&cost, &result);
    assert_eq!(result.assignment, vec![Pair::new(0, 1), Pair::new(1, 2)]);
    assert_eq!(result.total_cost, 5.0);
    assert_eq!(result.padding.dummy_rows, 2);
}

#[test]
fn test_scenario_single_cell() {
    let result = solve(&[vec![5.0]], false).unwrap();
    assert_eq!(result.assignment, vec![Pair::new(0, 0)]);
    assert_eq!(result.total_cost, 5.0);
}

#[test]
fn test_scenario_uniform_matrix() {
    let cost = vec![vec![3.0; 3]; 3];
    let result = solve(&cost, false).unwrap();
    assert_feasible(&cost, &result);
    assert_eq!(result.total_cost, 9.0);
}

#[test]
fn test_zero_and_negative_costs() {
    let zeros = vec![vec![0.0; 4]; 4];
    let result = solve(&zeros, false).unwrap();
    assert_feasible(&zeros, &result);
    assert_eq!(result.total_cost, 0.0);

    let negative = vec![
        vec![-1.0, -5.0, 2.0],
        vec![3.0, -2.0, -4.0],
        vec![-6.0, 1.0, 0.0],
    ];
    let result = solve(&negative, false).unwrap();
    assert_feasible(&negative, &result);
    assert_eq!(result.total_cost, brute_force(&negative, false));
    assert_eq!(result.total_cost, -15.0);
}

#[test]
fn test_fractional_costs() {
    let cost = vec![
        vec![0.1, 0.7, 0.35],
        vec![0.25, 0.05, 0.9],
        vec![0.6, 0.45, 0.15],
    ];
    let result = solve(&cost, false).unwrap();
    assert_feasible(&cost, &result);
    assert_relative_eq!(result.total_cost, 0.3, epsilon = 1e-12);
}

#[test]
fn test_profit_maximization() {
    let profit = vec![
        vec![20.0, 15.0, 18.0, 22.0],
        vec![16.0, 21.0, 17.0, 19.0],
        vec![23.0, 18.0, 20.0, 16.0],
        vec![17.0, 22.0, 24.0, 21.0],
    ];
    let result = solve(&profit, true).unwrap();
    assert_feasible(&profit, &result);
    assert!(result.maximize);
    assert_eq!(result.total_cost, brute_force(&profit, true));
    assert_eq!(result.total_cost, 90.0);
}

// =============================================================================
// Rejection
// =============================================================================

#[test]
fn test_rejects_empty_matrix() {
    let empty: Vec<Vec<f64>> = Vec::new();
    assert!(matches!(solve(&empty, false), Err(Error::EmptyMatrix)));
    assert!(matches!(solve(&[Vec::new()], false), Err(Error::EmptyMatrix)));
}

#[test]
fn test_rejects_ragged_matrix() {
    let ragged = vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0]];
    assert!(matches!(solve(&ragged, false), Err(Error::RaggedMatrix { row: 1, .. })));
}

#[test]
fn test_rejects_non_finite_cells() {
    for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let cost = vec![vec![1.0, bad], vec![3.0, 4.0]];
        let err = solve(&cost, true).unwrap_err();
        assert!(matches!(err, Error::NonNumericEntry { row: 0, col: 1, .. }));
        assert!(err.is_input_error());
    }
}

#[test]
fn test_rejects_values_that_overflow_when_reduced() {
    let wide = vec![vec![1e308, -1e308], vec![1e308, -1e308]];
    let err = solve(&wide, false).unwrap_err();
    assert!(matches!(err, Error::ValueRangeOverflow { .. }));
    assert!(err.is_input_error());

    // max - v overflows on conversion
    let wide = vec![vec![-1e308, -1e308], vec![1e308, 0.0]];
    assert!(matches!(solve(&wide, true), Err(Error::ValueRangeOverflow { .. })));

    // Large but representable magnitudes still solve
    let large = vec![vec![1e300, 3e300], vec![2e300, 1e300]];
    let result = solve(&large, false).unwrap();
    assert_feasible(&large, &result);
    assert_eq!(result.total_cost, 2e300);
}

#[test]
fn test_rejects_non_numeric_json() {
    let err = solve_json(&json!([[1, 2], [3, "four"]]), false).unwrap_err();
    assert!(matches!(err, Error::NonNumericEntry { row: 1, col: 1, .. }));
    assert!(err.is_input_error());
}

#[test]
fn test_accepts_numeric_json_strings() {
    let result = solve_json(&json!([["4", 1], [2, "8.0"]]), false).unwrap();
    assert_eq!(result.total_cost, 3.0);
}

// =============================================================================
// Properties over generated matrices
// =============================================================================

#[test]
fn test_optimal_against_brute_force() {
    let mut seed = 0;
    for rows in 1..=5 {
        for cols in 1..=5 {
            for _ in 0..4 {
                seed += 1;
                let cost = lcg_matrix(rows, cols, seed);
                for maximize in [false, true] {
                    let result = solve(&cost, maximize).unwrap();
                    assert_feasible(&cost, &result);
                    assert_eq!(
                        result.total_cost,
                        brute_force(&cost, maximize),
                        "{}x{} seed {} maximize {}",
                        rows,
                        cols,
                        seed,
                        maximize
                    );
                }
            }
        }
    }
}

#[test]
fn test_maximize_matches_minimize_of_complement() {
    for seed in 0..20 {
        let cost = lcg_matrix(4, 4, 100 + seed);
        let max_val = cost.iter().flatten().copied().fold(f64::NEG_INFINITY, f64::max);
        let complement: Vec<Vec<f64>> = cost
            .iter()
            .map(|row| row.iter().map(|v| max_val - v).collect())
            .collect();

        let maximized = solve(&cost, true).unwrap();
        let minimized = solve(&complement, false).unwrap();

        // Same deterministic pipeline after conversion, so the same pairs
        assert_eq!(maximized.assignment, minimized.assignment);
        let via_complement: f64 = minimized.assignment.iter().map(|p| cost[p.row][p.col]).sum();
        assert_eq!(maximized.total_cost, via_complement);
    }
}

#[test]
fn test_repeated_solves_are_identical() {
    let cost = lcg_matrix(5, 3, 42);
    let first = solve(&cost, false).unwrap();
    let second = solve(&cost, false).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.to_json().to_string(), second.to_json().to_string());
}

#[test]
fn test_trace_bounds() {
    for seed in 0..10 {
        let cost = lcg_matrix(4, 5, 300 + seed);
        let result = solve(&cost, false).unwrap();
        let first = result.trace.first().unwrap();
        assert_eq!(first.label, "Input matrix");
        assert_eq!(first.matrix, cost);

        let last = &result.trace.last().unwrap().label;
        if result.iterations == 0 {
            assert_eq!(last, "Column reduction");
        } else {
            assert!(last.starts_with("Adjust matrix (min uncovered: "), "{}", last);
        }
        // Input, padding, two reductions, one entry per adjustment
        assert_eq!(result.trace.len(), 4 + result.iterations);
    }
}

#[test]
fn test_shared_solver_across_threads() {
    let solver = Solver::new(SolverConfig::new(false)).unwrap();
    let matrices: Vec<Vec<Vec<f64>>> = (0..8).map(|s| lcg_matrix(5, 5, 500 + s)).collect();

    std::thread::scope(|scope| {
        let handles: Vec<_> = matrices
            .iter()
            .map(|cost| {
                let solver = &solver;
                scope.spawn(move || solver.solve(cost).map(|r| r.total_cost))
            })
            .collect();

        for (handle, cost) in handles.into_iter().zip(&matrices) {
            let total = handle.join().unwrap().unwrap();
            assert_eq!(total, brute_force(cost, false));
        }
    });
}

#[test]
fn test_larger_matrix_is_feasible() {
    let cost = lcg_matrix(30, 25, 7);
    let result = solve(&cost, false).unwrap();
    assert_feasible(&cost, &result);

    // Totals agree when the instance is solved from the transposed side
    let transposed: Vec<Vec<f64>> = (0..25)
        .map(|j| (0..30).map(|i| cost[i][j]).collect())
        .collect();
    assert_eq!(solve(&transposed, false).unwrap().total_cost, result.total_cost);
}
