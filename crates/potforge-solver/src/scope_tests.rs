//! Tests for the generation scope.

use super::*;
use potforge_core::FdrOperator;
use potforge_lp::{LpError, LpProblem, LpSolution, MicroLpSolver};
use potforge_test::{switch_task, unsolvable_task};

/// Solver for which every LP is infeasible.
struct InfeasibleSolver;

impl LpSolver for InfeasibleSolver {
    fn solve(&self, _problem: &LpProblem) -> std::result::Result<LpSolution, LpError> {
        Err(LpError::Infeasible)
    }
}

fn scope<'a>(
    task: &'a FdrTask,
    config: &'a HeuristicConfig,
    solver: &'a MicroLpSolver,
) -> GenerationScope<'a, MicroLpSolver> {
    let model = PotentialModel::from_fdr(task).unwrap();
    GenerationScope::new(task, config, solver, model)
}

#[test]
fn test_init_estimate() {
    let task = switch_task();
    let config = HeuristicConfig::default();
    let solver = MicroLpSolver::new();
    let mut scope = scope(&task, &config, &solver);

    assert_eq!(scope.init_estimate(), Some(1));
    assert_eq!(scope.solve_count(), 1);
    assert!(scope.heuristic().is_empty());
}

#[test]
fn test_random_walk_max_steps() {
    let task = switch_task();
    let config = HeuristicConfig::default();
    let solver = MicroLpSolver::new();
    let mut scope = scope(&task, &config, &solver);

    // (ceil(1 / 1) + 0.5) * 4
    assert_eq!(scope.random_walk_max_steps(), 6);
}

#[test]
fn test_random_walk_max_steps_zero_cost() {
    let task = FdrTask::builder()
        .var("on", ["false", "true"])
        .init([0])
        .goal(0, 1)
        .operator(FdrOperator::new("free-switch", 0).with_pre(0, 0).with_eff(0, 1))
        .build()
        .unwrap();
    let config = HeuristicConfig::default();
    let solver = MicroLpSolver::new();
    let mut scope = scope(&task, &config, &solver);

    assert_eq!(scope.random_walk_max_steps(), 10);
}

#[test]
fn test_dead_end_init() {
    let task = unsolvable_task();
    let config = HeuristicConfig::default();
    let solver = MicroLpSolver::new();
    let mut scope = scope(&task, &config, &solver);

    assert_eq!(scope.init_estimate(), Some(DEAD_END));
    assert_eq!(scope.random_walk_max_steps(), 0);
    assert!(!scope.add_init_constraint(1.0).unwrap());
    assert!(scope.model().lower_bound().is_none());
}

#[test]
fn test_init_constraint_without_solution_aborts() {
    let task = switch_task();
    let config = HeuristicConfig::default();
    let model = PotentialModel::from_fdr(&task).unwrap();
    let mut scope = GenerationScope::new(&task, &config, &InfeasibleSolver, model);

    assert!(matches!(
        scope.add_init_constraint(1.0),
        Err(PotForgeError::NoSolution(_))
    ));
    assert!(scope.model().lower_bound().is_none());
    assert_eq!(scope.failed_solve_count(), 1);
}

#[test]
fn test_init_constraint_rhs() {
    let task = switch_task();
    let config = HeuristicConfig::default();
    let solver = MicroLpSolver::new();
    let mut scope = scope(&task, &config, &solver);

    assert!(scope.add_init_constraint(0.5).unwrap());
    let lb = scope.model().lower_bound().unwrap();
    assert_eq!(lb.vars, vec![0]);
    // floor((1 - 0.001) * 100) / 100 * 0.5
    assert!((lb.rhs - 0.495).abs() < 1e-9);
}

#[test]
fn test_failed_solve_is_counted() {
    let task = switch_task();
    let config = HeuristicConfig::default();
    let solver = MicroLpSolver::new();
    let mut scope = scope(&task, &config, &solver);

    scope.model_mut().set_lower_bound([1], 3.0);
    assert!(scope.solve().is_none());
    assert_eq!(scope.failed_solve_count(), 1);
    assert_eq!(scope.init_estimate(), None);
}

#[test]
fn test_add_function_grows_ensemble() {
    let task = switch_task();
    let config = HeuristicConfig::default();
    let solver = MicroLpSolver::new();
    let mut scope = scope(&task, &config, &solver);

    let function = scope.solve_init().unwrap();
    scope.add_function(function);
    let heuristic = scope.into_heuristic();
    assert_eq!(heuristic.len(), 1);
    assert_eq!(heuristic.estimate_facts(&[0]), Some(1));
}

#[test]
fn test_require_mutex() {
    let task = switch_task();
    let config = HeuristicConfig::default();
    let solver = MicroLpSolver::new();
    let scope = scope(&task, &config, &solver);
    assert!(matches!(
        scope.require_mutex(),
        Err(PotForgeError::Config(_))
    ));
}
