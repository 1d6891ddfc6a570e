//! Heuristic generation entry point.
//!
//! Logging levels:
//! - **INFO**: generation start/end, model size, strategy summaries
//! - **DEBUG**: individual LP solves and added functions
//! - **TRACE**: operators dropped as unreachable

use potforge_config::HeuristicConfig;
use potforge_core::{Disambiguation, FdrTask, MgStripsTask, MutexPairs, PotForgeError, Result};
use potforge_lp::{LpSolver, MicroLpSolver};
use tracing::info;

use crate::heuristic::PotentialHeuristic;
use crate::model::PotentialModel;
use crate::scope::GenerationScope;
use crate::strategy::strategy_for;

/// Mutex information shared by the model and the objectives.
struct MutexData {
    strips: MgStripsTask,
    mutex: MutexPairs,
}

impl MutexData {
    fn compute(task: &FdrTask, h2: bool) -> Result<Self> {
        let strips = MgStripsTask::from_fdr(task)?;
        let mut mutex = MutexPairs::from_mgroups(strips.fact_count, &strips.mgroups);
        if h2 {
            mutex.union_with(&MutexPairs::h2(task)?);
        }
        info!(
            event = "mutexes_computed",
            mgroups = strips.mgroups.len(),
            pairs = mutex.num_pairs(),
            h2 = h2
        );
        Ok(Self { strips, mutex })
    }
}

/// Synthesizes a potential heuristic for `task` with [`MicroLpSolver`].
///
/// # Example
///
/// ```
/// use potforge_config::{HeuristicConfig, ObjectiveConfig};
/// use potforge_core::{FdrOperator, FdrTask};
/// use potforge_solver::generate_heuristic;
///
/// let task = FdrTask::builder()
///     .var("on", ["false", "true"])
///     .init([0])
///     .goal(0, 1)
///     .operator(FdrOperator::new("switch-on", 1).with_pre(0, 0).with_eff(0, 1))
///     .build()
///     .unwrap();
/// let config = HeuristicConfig::default().with_objective(ObjectiveConfig::Init);
///
/// let heuristic = generate_heuristic(&task, &config).unwrap();
/// assert_eq!(heuristic.estimate_fdr_state(&task.vars, &task.init), Some(1));
/// ```
pub fn generate_heuristic(task: &FdrTask, config: &HeuristicConfig) -> Result<PotentialHeuristic> {
    generate(task, config, &MicroLpSolver::new())
}

/// Synthesizes a potential heuristic for `task` using `solver`.
///
/// Succeeds if the selected strategy added at least one function.
///
/// # Errors
///
/// - [`PotForgeError::Unsupported`] for tasks with conditional effects
/// - [`PotForgeError::Config`] / [`PotForgeError::UnsupportedMutexSize`]
///   for invalid configurations, before any LP is built
/// - [`PotForgeError::Unreachable`] if disambiguation proves the goal
///   unreachable
/// - [`PotForgeError::NoSolution`] if the initial-state pre-pass has no
///   optimal solution, or if no function could be computed
pub fn generate<S: LpSolver + ?Sized>(
    task: &FdrTask,
    config: &HeuristicConfig,
    solver: &S,
) -> Result<PotentialHeuristic> {
    task.validate()?;
    config.validate()?;
    if task.has_cond_eff() {
        return Err(PotForgeError::Unsupported(
            "conditional effects".to_string(),
        ));
    }

    info!(
        event = "generate_start",
        vars = task.vars.len(),
        facts = task.fact_count(),
        ops = task.ops.len(),
        objective = ?config.objective,
        disambiguation = ?config.disambiguation
    );

    let mutex_data = if config.needs_mutexes() {
        Some(MutexData::compute(task, config.h2)?)
    } else {
        None
    };

    let model = match (config.disambiguation.strength(), &mutex_data) {
        (Some(strength), Some(data)) => {
            let oracle = Disambiguation::new(&data.strips.mgroups, &data.mutex);
            PotentialModel::from_mg_strips(&data.strips, &oracle, strength)?
        }
        _ => PotentialModel::from_fdr(task)?,
    };
    let stats = model.stats();
    info!(
        event = "model_built",
        lp_vars = stats.lp_var_count,
        op_constraints = stats.op_constraints,
        goal_constraints = stats.goal_constraints,
        maxpots = stats.maxpots,
        skipped_ops = stats.skipped_ops
    );

    let mut scope = GenerationScope::new(task, config, solver, model);
    if let Some(data) = &mutex_data {
        scope = scope.with_mutexes(&data.strips.mgroups, &data.mutex);
    }
    if config.add_init_constr {
        scope.add_init_constraint(config.init_constr_coef)?;
    }

    let mut strategy = strategy_for::<S>(config);
    strategy.run(&mut scope)?;

    let duration = scope.elapsed();
    let solves = scope.solve_count();
    let failed_solves = scope.failed_solve_count();
    let heuristic = scope.into_heuristic();
    info!(
        event = "generate_end",
        strategy = strategy.strategy_type_name(),
        functions = heuristic.len(),
        solves = solves,
        failed_solves = failed_solves,
        duration_ms = duration.as_millis() as u64
    );

    if heuristic.is_empty() {
        return Err(PotForgeError::NoSolution(
            "no potential function could be computed".to_string(),
        ));
    }
    Ok(heuristic)
}

#[cfg(test)]
#[path = "generator_tests.rs"]
mod tests;
