use super::*;
use potforge_test::{line_task, switch_task, LINE_OPTIMAL_COST};

use crate::heuristic::PotentialFunction;

const LINE_PLAN: [&str; 6] = [
    "(drive-l1-l0)",
    "(load-l0)",
    "(drive-l0-l1)",
    "(drive-l1-l2)",
    "(drive-l2-l3)",
    "(unload-l3)",
];

fn heuristic_with(weights: Vec<f64>) -> PotentialHeuristic {
    let mut heur = PotentialHeuristic::new();
    heur.add(PotentialFunction::new(weights));
    heur
}

#[test]
fn test_operator_name() {
    assert_eq!(operator_name("(switch-on)"), "switch-on");
    assert_eq!(operator_name("  switch-on \n"), "switch-on");
    assert_eq!(operator_name("( switch-on )"), "switch-on");
}

#[test]
fn test_switch_plan() {
    let task = switch_task();
    let heur = heuristic_with(vec![1.0, 0.0]);
    let eval = evaluate_plan(&task, &heur, &["(switch-on)", "; cost = 1 (unit cost)"]).unwrap();

    assert_eq!(eval.initial_estimate, 1);
    assert_eq!(eval.steps.len(), 1);
    let step = &eval.steps[0];
    assert_eq!(step.op, 0);
    assert_eq!(step.estimate, 0);
    assert_eq!(step.state, vec![1]);
    assert!(!step.consistency_violation);
    assert!(eval.reaches_goal);
    assert_eq!(eval.cost(), 1);
    assert!(eval.is_admissible_along());
}

#[test]
fn test_violation_flagged() {
    let task = switch_task();
    let heur = heuristic_with(vec![5.0, 0.0]);
    let eval = evaluate_plan(&task, &heur, &["switch-on"]).unwrap();
    assert_eq!(eval.violations(), 1);
    assert!(!eval.is_admissible_along());
}

#[test]
fn test_violation_uses_first_function() {
    let task = switch_task();
    let mut heur = heuristic_with(vec![1.0, 0.0]);
    heur.add(PotentialFunction::new(vec![0.0, -3.0]));
    let eval = evaluate_plan(&task, &heur, &["switch-on"]).unwrap();
    assert_eq!(eval.violations(), 0);
    assert_eq!(eval.steps[0].potential, 0.0);
}

#[test]
fn test_generated_heuristic_along_optimal_plan() {
    let task = line_task();
    let heur = crate::generate_heuristic(&task, &Default::default()).unwrap();
    let eval = evaluate_plan(&task, &heur, &LINE_PLAN).unwrap();

    assert!(eval.reaches_goal);
    assert_eq!(eval.cost(), u64::from(LINE_OPTIMAL_COST));
    assert_eq!(eval.violations(), 0);
    assert!(eval.is_admissible_along());
    assert_eq!(eval.steps.last().map(|s| s.estimate), Some(0));
}

#[test]
fn test_partial_plan() {
    let task = line_task();
    let heur = heuristic_with(vec![0.0; task.fact_count()]);
    let eval = evaluate_plan(&task, &heur, &LINE_PLAN[..2]).unwrap();
    assert_eq!(eval.steps.len(), 2);
    assert!(!eval.reaches_goal);
}

#[test]
fn test_invalid_plans() {
    let task = line_task();
    let heur = heuristic_with(vec![0.0; task.fact_count()]);

    let unknown = evaluate_plan(&task, &heur, &["(fly-l0-l3)"]);
    assert!(matches!(unknown, Err(PotForgeError::InvalidInput(_))));

    let inapplicable = evaluate_plan(&task, &heur, &["(load-l0)"]);
    assert!(matches!(inapplicable, Err(PotForgeError::InvalidInput(_))));

    let empty = evaluate_plan(&task, &PotentialHeuristic::new(), &LINE_PLAN);
    assert!(matches!(empty, Err(PotForgeError::InvalidInput(_))));
}
