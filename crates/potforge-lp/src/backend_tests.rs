use super::*;

fn nonneg(lp: &mut LpProblem) {
    for v in 0..lp.num_vars() {
        lp.set_bounds(v, 0.0, f64::INFINITY);
    }
}

fn assert_close(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-7, "{} != {}", a, b);
}

#[test]
fn test_textbook_maximization() {
    // max 3x + 5y  s.t. x <= 4, 2y <= 12, 3x + 2y <= 18
    let mut lp = LpProblem::new(2, Direction::Maximize);
    nonneg(&mut lp);
    lp.set_objective(0, 3.0);
    lp.set_objective(1, 5.0);
    lp.add_constraint(vec![(0, 1.0)], Sense::Le, 4.0);
    lp.add_constraint(vec![(1, 2.0)], Sense::Le, 12.0);
    lp.add_constraint(vec![(0, 3.0), (1, 2.0)], Sense::Le, 18.0);

    let sol = MicroLpSolver::new().solve(&lp).unwrap();
    assert_close(sol.objective, 36.0);
    assert_close(sol.values[0], 2.0);
    assert_close(sol.values[1], 6.0);
}

#[test]
fn test_minimization_with_ge_rows() {
    // min 2x + 3y  s.t. x + y >= 4, x >= 1
    let mut lp = LpProblem::new(2, Direction::Minimize);
    nonneg(&mut lp);
    lp.set_objective(0, 2.0);
    lp.set_objective(1, 3.0);
    lp.add_constraint(vec![(0, 1.0), (1, 1.0)], Sense::Ge, 4.0);
    lp.add_constraint(vec![(0, 1.0)], Sense::Ge, 1.0);

    let sol = MicroLpSolver::new().solve(&lp).unwrap();
    assert_close(sol.objective, 8.0);
    assert_close(sol.values[0], 4.0);
}

#[test]
fn test_equality_rows() {
    let mut lp = LpProblem::new(2, Direction::Maximize);
    nonneg(&mut lp);
    lp.set_objective(0, 1.0);
    lp.add_constraint(vec![(0, 1.0), (1, 1.0)], Sense::Eq, 5.0);
    lp.add_constraint(vec![(1, 1.0)], Sense::Ge, 2.0);

    let sol = MicroLpSolver::new().solve(&lp).unwrap();
    assert_close(sol.values[0], 3.0);
    assert_close(sol.values[1], 2.0);
}

#[test]
fn test_free_variables_with_upper_bound() {
    // max x0 s.t. x0 - x1 <= 1, x1 <= 0, x in (-inf, 1e9]
    let mut lp = LpProblem::new(2, Direction::Maximize);
    for v in 0..2 {
        lp.set_bounds(v, -1e20, 1e9);
    }
    lp.set_objective(0, 1.0);
    lp.add_constraint(vec![(0, 1.0), (1, -1.0)], Sense::Le, 1.0);
    lp.add_constraint(vec![(1, 1.0)], Sense::Le, 0.0);

    let sol = MicroLpSolver::new().solve(&lp).unwrap();
    assert_close(sol.objective, 1.0);
    assert_close(sol.values[0] - sol.values[1], 1.0);
}

#[test]
fn test_upper_bound_caps_unconstrained_direction() {
    let mut lp = LpProblem::new(1, Direction::Maximize);
    lp.set_bounds(0, f64::NEG_INFINITY, 1e9);
    lp.set_objective(0, 1.0);

    let sol = MicroLpSolver::new().solve(&lp).unwrap();
    assert_close(sol.values[0], 1e9);
}

#[test]
fn test_negative_rhs_rows() {
    // max -x s.t. -x <= -3  (x >= 3)
    let mut lp = LpProblem::new(1, Direction::Maximize);
    lp.set_objective(0, -1.0);
    lp.add_constraint(vec![(0, -1.0)], Sense::Le, -3.0);

    let sol = MicroLpSolver::new().solve(&lp).unwrap();
    assert_close(sol.values[0], 3.0);
}

#[test]
fn test_repeated_terms_are_summed() {
    // x + x <= 3 is 2x <= 3
    let mut lp = LpProblem::new(1, Direction::Maximize);
    nonneg(&mut lp);
    lp.set_objective(0, 1.0);
    lp.add_constraint(vec![(0, 1.0), (0, 1.0)], Sense::Le, 3.0);

    let sol = MicroLpSolver::new().solve(&lp).unwrap();
    assert_close(sol.values[0], 1.5);
    assert_eq!(merge_terms(&[(2, 1.0), (0, 1.0), (2, -1.0)]), vec![(0, 1.0)]);
}

#[test]
fn test_infeasible() {
    let mut lp = LpProblem::new(1, Direction::Maximize);
    nonneg(&mut lp);
    lp.add_constraint(vec![(0, 1.0)], Sense::Le, 1.0);
    lp.add_constraint(vec![(0, 1.0)], Sense::Ge, 2.0);

    assert_eq!(MicroLpSolver::new().solve(&lp), Err(LpError::Infeasible));
}

#[test]
fn test_unbounded() {
    let mut lp = LpProblem::new(2, Direction::Maximize);
    nonneg(&mut lp);
    lp.set_objective(0, 1.0);
    lp.add_constraint(vec![(0, 1.0), (1, -1.0)], Sense::Le, 1.0);

    assert_eq!(MicroLpSolver::new().solve(&lp), Err(LpError::Unbounded));
}

#[test]
fn test_invalid_term_is_rejected() {
    let mut lp = LpProblem::new(1, Direction::Maximize);
    lp.add_constraint(vec![(3, 1.0)], Sense::Le, 1.0);
    assert!(matches!(
        MicroLpSolver::new().solve(&lp),
        Err(LpError::InvalidProblem(_))
    ));
}

#[test]
fn test_integer_variables() {
    // max x + y  s.t. 2x + 2y <= 3, integer  => 1
    let mut lp = LpProblem::new(2, Direction::Maximize);
    nonneg(&mut lp);
    for v in 0..2 {
        lp.set_objective(v, 1.0);
        lp.set_integer(v, true);
    }
    lp.add_constraint(vec![(0, 2.0), (1, 2.0)], Sense::Le, 3.0);

    let sol = MicroLpSolver::new().solve(&lp).unwrap();
    assert_close(sol.objective, 1.0);
    assert_eq!(sol.values[0].fract(), 0.0);
    assert_eq!(sol.values[1].fract(), 0.0);
}

#[test]
fn test_integer_knapsack() {
    // max 5a + 4b + 3c  s.t. 2a + 3b + c <= 5, 4a + b + 2c <= 11, 3a + 4b + 2c <= 8
    let mut lp = LpProblem::new(3, Direction::Maximize);
    nonneg(&mut lp);
    for (v, c) in [5.0, 4.0, 3.0].into_iter().enumerate() {
        lp.set_objective(v, c);
        lp.set_integer(v, true);
    }
    lp.add_constraint(vec![(0, 2.0), (1, 3.0), (2, 1.0)], Sense::Le, 5.0);
    lp.add_constraint(vec![(0, 4.0), (1, 1.0), (2, 2.0)], Sense::Le, 11.0);
    lp.add_constraint(vec![(0, 3.0), (1, 4.0), (2, 2.0)], Sense::Le, 8.0);

    let sol = MicroLpSolver::new().solve(&lp).unwrap();
    assert_close(sol.objective, 13.0);
}

#[test]
fn test_integer_infeasible() {
    // 2x = 1 has no integer solution
    let mut lp = LpProblem::new(1, Direction::Maximize);
    nonneg(&mut lp);
    lp.set_integer(0, true);
    lp.add_constraint(vec![(0, 2.0)], Sense::Eq, 1.0);

    assert_eq!(MicroLpSolver::new().solve(&lp), Err(LpError::Infeasible));
}
