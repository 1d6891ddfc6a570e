//! Replays a plan and reports the heuristic value along it.

use potforge_core::{FdrTask, PotForgeError, Result};
use tracing::debug;

use crate::heuristic::{PotentialHeuristic, DEAD_END};

/// One applied operator and the state it led to.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanStep {
    pub op: usize,
    pub name: String,
    pub cost: u32,
    /// Ensemble estimate of the resulting state.
    pub estimate: i32,
    /// Raw sum of the first function on the resulting state.
    pub potential: f64,
    /// The first function dropped by more than `cost` on this step.
    pub consistency_violation: bool,
    pub state: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlanEvaluation {
    pub initial_estimate: i32,
    pub initial_potential: f64,
    pub steps: Vec<PlanStep>,
    /// The last state satisfies the goal.
    pub reaches_goal: bool,
}

impl PlanEvaluation {
    pub fn cost(&self) -> u64 {
        self.steps.iter().map(|s| u64::from(s.cost)).sum()
    }

    pub fn violations(&self) -> usize {
        self.steps.iter().filter(|s| s.consistency_violation).count()
    }

    /// True if no estimate along the plan exceeds the remaining plan cost.
    ///
    /// Only meaningful for plans that reach the goal.
    pub fn is_admissible_along(&self) -> bool {
        let mut remaining = self.cost();
        if self.initial_estimate != DEAD_END
            && i64::from(self.initial_estimate) > remaining as i64
        {
            return false;
        }
        for step in &self.steps {
            remaining -= u64::from(step.cost);
            if step.estimate == DEAD_END || i64::from(step.estimate) > remaining as i64 {
                return false;
            }
        }
        true
    }
}

/// Strips an optional pair of surrounding parentheses from a plan line.
fn operator_name(line: &str) -> &str {
    let line = line.trim();
    line.strip_prefix('(')
        .and_then(|l| l.strip_suffix(')'))
        .map(str::trim)
        .unwrap_or(line)
}

/// Applies `plan` from the initial state of `task`.
///
/// Plan entries are operator names, optionally in parentheses. Empty
/// entries and `;` comments are skipped. A step is flagged when the first
/// function's potential drops by more than the step cost plus the rounding
/// tolerance.
///
/// # Errors
///
/// - [`PotForgeError::InvalidInput`] for an empty heuristic, an unknown or
///   ambiguous operator name, or an operator inapplicable in the current
///   state
pub fn evaluate_plan<P: AsRef<str>>(
    task: &FdrTask,
    heuristic: &PotentialHeuristic,
    plan: &[P],
) -> Result<PlanEvaluation> {
    let Some(first) = heuristic.functions().first() else {
        return Err(PotForgeError::InvalidInput(
            "cannot evaluate a plan with an empty heuristic".to_string(),
        ));
    };
    let tolerance = heuristic.evaluator().round_eps;
    let evaluate = |state: &[usize]| -> (i32, f64) {
        let facts: Vec<_> = task.state_facts(state).collect();
        let estimate = heuristic.estimate_facts(&facts).unwrap_or(DEAD_END);
        (estimate, first.sum(&facts))
    };

    let mut state = task.init.clone();
    let (initial_estimate, initial_potential) = evaluate(&state);
    let mut last_potential = initial_potential;
    let mut steps = Vec::new();

    for entry in plan {
        let entry = entry.as_ref().trim();
        if entry.is_empty() || entry.starts_with(';') {
            continue;
        }
        let name = operator_name(entry);
        let mut matches = task.ops.iter().enumerate().filter(|(_, op)| op.name == name);
        let Some((op_id, op)) = matches.next() else {
            return Err(PotForgeError::InvalidInput(format!(
                "unknown operator '{}'",
                name
            )));
        };
        if matches.next().is_some() {
            return Err(PotForgeError::InvalidInput(format!(
                "ambiguous operator name '{}'",
                name
            )));
        }
        if !op.is_applicable(&state) {
            return Err(PotForgeError::InvalidInput(format!(
                "operator '{}' is not applicable at step {}",
                name,
                steps.len() + 1
            )));
        }

        state = op.apply_on_state(&state);
        let (estimate, potential) = evaluate(&state);
        let consistency_violation = last_potential > potential + f64::from(op.cost) + tolerance;
        debug!(
            event = "plan_step",
            step = steps.len() + 1,
            op = %op.name,
            estimate = estimate,
            potential = potential,
            violation = consistency_violation
        );
        last_potential = potential;
        steps.push(PlanStep {
            op: op_id,
            name: op.name.clone(),
            cost: op.cost,
            estimate,
            potential,
            consistency_violation,
            state: state.clone(),
        });
    }

    Ok(PlanEvaluation {
        initial_estimate,
        initial_potential,
        reaches_goal: task.is_goal(&state),
        steps,
    })
}

#[cfg(test)]
#[path = "plan_tests.rs"]
mod tests;
