//! Generation-level scope.

use std::time::{Duration, Instant};

use potforge_config::HeuristicConfig;
use potforge_core::{FactId, FdrTask, MutexGroup, MutexPairs, PotForgeError, Result};
use potforge_lp::LpSolver;
use tracing::{debug, info, warn};

use crate::heuristic::{Evaluator, PotentialFunction, PotentialHeuristic, DEAD_END};
use crate::model::PotentialModel;

const MIN_AVG_OP_COST: f64 = 1e-2;
const TINY_COST_WALK_STEPS: usize = 10;

/// State shared by the strategies of one heuristic-generation request.
///
/// Owns the potential model and the growing ensemble; borrows the task,
/// configuration, LP solver and mutex information for its lifetime.
pub struct GenerationScope<'a, S: LpSolver + ?Sized> {
    task: &'a FdrTask,
    config: &'a HeuristicConfig,
    solver: &'a S,
    model: PotentialModel,
    mgroups: &'a [MutexGroup],
    mutex: Option<&'a MutexPairs>,
    heuristic: PotentialHeuristic,
    evaluator: Evaluator,
    init_facts: Vec<FactId>,
    start_time: Instant,
    solve_count: u64,
    failed_solve_count: u64,
}

impl<'a, S: LpSolver + ?Sized> GenerationScope<'a, S> {
    pub fn new(
        task: &'a FdrTask,
        config: &'a HeuristicConfig,
        solver: &'a S,
        model: PotentialModel,
    ) -> Self {
        let evaluator = Evaluator::from(&config.evaluator);
        Self {
            task,
            config,
            solver,
            model,
            mgroups: &[],
            mutex: None,
            heuristic: PotentialHeuristic::new().with_evaluator(evaluator),
            evaluator,
            init_facts: task.state_facts(&task.init).collect(),
            start_time: Instant::now(),
            solve_count: 0,
            failed_solve_count: 0,
        }
    }

    /// Attaches mutex groups and pairs for mutex-based objectives.
    pub fn with_mutexes(mut self, mgroups: &'a [MutexGroup], mutex: &'a MutexPairs) -> Self {
        self.mgroups = mgroups;
        self.mutex = Some(mutex);
        self
    }

    pub fn task(&self) -> &'a FdrTask {
        self.task
    }

    pub fn config(&self) -> &'a HeuristicConfig {
        self.config
    }

    pub fn model(&self) -> &PotentialModel {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut PotentialModel {
        &mut self.model
    }

    pub fn mgroups(&self) -> &'a [MutexGroup] {
        self.mgroups
    }

    pub fn mutex(&self) -> Option<&'a MutexPairs> {
        self.mutex
    }

    /// Mutex pairs, or a configuration error if none were computed.
    pub fn require_mutex(&self) -> Result<&'a MutexPairs> {
        self.mutex.ok_or_else(|| {
            PotForgeError::Config("objective requires mutexes".to_string())
        })
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    pub fn heuristic(&self) -> &PotentialHeuristic {
        &self.heuristic
    }

    pub fn init_facts(&self) -> &[FactId] {
        &self.init_facts
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn solve_count(&self) -> u64 {
        self.solve_count
    }

    pub fn failed_solve_count(&self) -> u64 {
        self.failed_solve_count
    }

    /// Solves the model for its current objective.
    ///
    /// Returns `None` if the LP has no optimal solution.
    pub fn solve(&mut self) -> Option<PotentialFunction> {
        let mut weights = vec![0.0; self.model.fact_count()];
        self.solve_count += 1;
        match self
            .model
            .solve(self.solver, self.config.use_ilp, &mut weights)
        {
            Ok(objective) => {
                debug!(event = "lp_solved", objective = objective);
                Some(PotentialFunction::new(weights))
            }
            Err(e) => {
                self.failed_solve_count += 1;
                debug!(event = "lp_failed", error = %e);
                None
            }
        }
    }

    /// Appends a function to the ensemble.
    pub fn add_function(&mut self, function: PotentialFunction) {
        self.heuristic.add(function);
        debug!(event = "function_added", functions = self.heuristic.len());
    }

    /// Solves for the initial state without touching the ensemble.
    pub fn solve_init(&mut self) -> Option<PotentialFunction> {
        self.model
            .set_obj_fdr_state(&self.task.vars, &self.task.init);
        self.solve()
    }

    /// Rounded value of the initial-state function, `None` if the LP
    /// fails.
    pub fn init_estimate(&mut self) -> Option<i32> {
        let function = self.solve_init()?;
        Some(self.evaluator.function_estimate(&function, &self.init_facts))
    }

    /// Walk length bound for random-walk sampling: four times the number
    /// of average-cost steps the initial estimate allows.
    ///
    /// Zero if the initial state has no finite estimate.
    pub fn random_walk_max_steps(&mut self) -> usize {
        let h_init = match self.init_estimate() {
            Some(h) if h != DEAD_END => h,
            _ => {
                warn!(event = "init_estimate_missing");
                return 0;
            }
        };
        let avg_cost = self.task.average_op_cost();
        if avg_cost < MIN_AVG_OP_COST {
            return TINY_COST_WALK_STEPS;
        }
        let steps = (f64::from(h_init) / avg_cost).ceil();
        ((steps + 0.5) * 4.0) as usize
    }

    /// Installs `Σ init potentials >= coef · h`, where `h` is the initial
    /// state value minus the rounding epsilon, floored to two decimals.
    ///
    /// Returns `false` and leaves the model without a lower bound if the
    /// initial state is a dead end.
    ///
    /// # Errors
    ///
    /// - [`PotForgeError::NoSolution`] if the initial-state LP has no
    ///   optimal solution
    pub fn add_init_constraint(&mut self, coef: f64) -> Result<bool> {
        self.model.reset_lower_bound();
        let Some(function) = self.solve_init() else {
            return Err(PotForgeError::NoSolution(
                "no optimal solution for the initial state".to_string(),
            ));
        };

        let value = function.sum(&self.init_facts);
        if value > self.evaluator.dead_end_threshold {
            warn!(event = "init_constraint_skipped", reason = "dead end");
            return Ok(false);
        }
        let value = self.evaluator.clamp(value);
        let rhs = ((value - self.evaluator.round_eps) * 100.0).floor() / 100.0 * coef;
        self.model
            .set_lower_bound(self.init_facts.iter().copied(), rhs);
        info!(event = "init_constraint", value = value, rhs = rhs);
        Ok(true)
    }

    pub fn into_heuristic(self) -> PotentialHeuristic {
        self.heuristic
    }
}

#[cfg(test)]
#[path = "scope_tests.rs"]
mod tests;
