//! Objectives from mutex-consistent state counts.

use potforge_core::{FactSet, MutexOracle, Result};
use potforge_lp::LpSolver;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;

use super::{Strategy, CONDITIONED_LOG_INTERVAL};
use crate::objective::all_states_mutex;
use crate::scope::GenerationScope;

/// Facts the objective is conditioned on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conditioning {
    /// A single unconditioned objective.
    None,
    /// One objective per fact of the task.
    EachFact,
    /// One objective per distinct fact among this many random draws.
    RandomFacts(usize),
    /// One objective per random non-mutex fact pair, this many draws.
    RandomPairs(usize),
}

#[derive(Debug, Clone)]
pub struct MutexStrategy {
    mutex_size: usize,
    conditioning: Conditioning,
}

impl MutexStrategy {
    pub fn new(mutex_size: usize, conditioning: Conditioning) -> Self {
        Self {
            mutex_size,
            conditioning,
        }
    }

    /// Solves for one (conditioned) objective. Returns whether a function
    /// was added.
    fn solve_conditioned<S: LpSolver + ?Sized>(
        &self,
        scope: &mut GenerationScope<'_, S>,
        cond: Option<&FactSet>,
    ) -> Result<bool> {
        let mutex = scope.require_mutex()?;
        let Some(coef) = all_states_mutex(scope.mgroups(), mutex, self.mutex_size, cond)? else {
            return Ok(false);
        };
        scope.model_mut().set_obj(&coef)?;
        Ok(match scope.solve() {
            Some(function) => {
                scope.add_function(function);
                true
            }
            None => false,
        })
    }

    fn run_conditions<S: LpSolver + ?Sized>(
        &self,
        scope: &mut GenerationScope<'_, S>,
        conditions: impl IntoIterator<Item = FactSet>,
        total: usize,
    ) -> Result<()> {
        let mut count = 0usize;
        for cond in conditions {
            self.solve_conditioned(scope, Some(&cond))?;
            count += 1;
            if count % CONDITIONED_LOG_INTERVAL == 0 {
                info!(
                    event = "conditioned_progress",
                    computed = count,
                    total = total,
                    functions = scope.heuristic().len()
                );
            }
        }
        info!(
            event = "conditioned_progress",
            computed = count,
            total = total,
            functions = scope.heuristic().len()
        );
        Ok(())
    }
}

impl<S: LpSolver + ?Sized> Strategy<S> for MutexStrategy {
    fn run(&mut self, scope: &mut GenerationScope<'_, S>) -> Result<()> {
        let fact_count = scope.task().fact_count();
        let seed = scope.config().sampler_seed;
        if fact_count == 0 && self.conditioning != Conditioning::None {
            return Ok(());
        }
        match self.conditioning {
            Conditioning::None => {
                let solved = self.solve_conditioned(scope, None)?;
                info!(
                    event = "objective_solved",
                    objective = "all_states_mutex",
                    solved = solved
                );
                Ok(())
            }
            Conditioning::EachFact => {
                self.run_conditions(scope, (0..fact_count).map(FactSet::singleton), fact_count)
            }
            Conditioning::RandomFacts(num_samples) => {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                let facts: FactSet = (0..num_samples)
                    .map(|_| rng.random_range(0..fact_count))
                    .collect();
                let total = facts.len();
                self.run_conditions(scope, facts.iter().map(FactSet::singleton), total)
            }
            Conditioning::RandomPairs(num_samples) => {
                let mutex = scope.require_mutex()?;
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                let pairs: Vec<FactSet> = (0..num_samples)
                    .filter_map(|_| {
                        let f1 = rng.random_range(0..fact_count);
                        let f2 = rng.random_range(0..fact_count);
                        (!mutex.is_mutex(f1, f2)).then(|| [f1, f2].into_iter().collect())
                    })
                    .collect();
                let total = pairs.len();
                self.run_conditions(scope, pairs, total)
            }
        }
    }

    fn strategy_type_name(&self) -> &'static str {
        "MutexStrategy"
    }
}
