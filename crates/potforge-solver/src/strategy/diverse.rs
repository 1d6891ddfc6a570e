//! Greedy ensemble covering sampled states.
//!
//! Every sampled state first gets its own optimal function and the
//! estimate that function gives it. The builder then repeatedly adds a
//! function and retires every state whose estimate under it reaches the
//! recorded one, until no state is left:
//!
//! 1. Solve for the summed indicators of the remaining states. If that
//!    function already reaches the recorded estimate of some remaining
//!    state, take it.
//! 2. Otherwise take the stored function of a uniformly chosen remaining
//!    state.
//!
//! Each round retires at least one state, so at most one function is
//! added per distinct sampled state.

use std::collections::HashSet;

use potforge_config::SamplerType;
use potforge_core::{FactId, FactSet, Result};
use potforge_lp::LpSolver;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use super::{Strategy, SAMPLE_LOG_INTERVAL};
use crate::heuristic::{PotentialFunction, DEAD_END};
use crate::sampler::StateSampler;
use crate::scope::GenerationScope;

/// Counters of one diverse run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiverseStats {
    /// Distinct states with a finite optimal estimate.
    pub states: usize,
    pub dead_ends: usize,
    pub duplicates: usize,
    pub functions: usize,
}

struct SampledState {
    facts: Vec<FactId>,
    function: PotentialFunction,
    estimate: i32,
    active: bool,
}

#[derive(Debug, Clone)]
pub struct DiverseStrategy {
    num_samples: usize,
    rng: ChaCha8Rng,
    stats: DiverseStats,
}

impl DiverseStrategy {
    pub fn new(num_samples: usize, seed: u64) -> Self {
        Self {
            num_samples,
            rng: ChaCha8Rng::seed_from_u64(seed),
            stats: DiverseStats::default(),
        }
    }

    pub fn stats(&self) -> DiverseStats {
        self.stats
    }

    /// Covers the given full states instead of sampling them.
    pub fn cover_states<S: LpSolver + ?Sized>(
        &mut self,
        scope: &mut GenerationScope<'_, S>,
        states: impl IntoIterator<Item = Vec<usize>>,
    ) -> Result<()> {
        let states = self.evaluate_states(scope, states);
        self.cover(scope, states);
        Ok(())
    }

    /// Solves each state for itself, skipping repeats of states already
    /// accepted. Dead-end states are not remembered.
    fn evaluate_states<S: LpSolver + ?Sized>(
        &mut self,
        scope: &mut GenerationScope<'_, S>,
        states: impl IntoIterator<Item = Vec<usize>>,
    ) -> Vec<SampledState> {
        let task = scope.task();
        let mut seen: HashSet<FactSet> = HashSet::new();
        let mut sampled = Vec::new();
        for (si, state) in states.into_iter().enumerate() {
            let facts: FactSet = task.state_facts(&state).collect();
            if seen.contains(&facts) {
                self.stats.duplicates += 1;
                continue;
            }

            scope.model_mut().set_obj_strips_state(&facts);
            let Some(function) = scope.solve() else {
                self.stats.dead_ends += 1;
                continue;
            };
            let facts = facts.as_slice().to_vec();
            let estimate = scope.evaluator().function_estimate(&function, &facts);
            if estimate == DEAD_END {
                self.stats.dead_ends += 1;
                continue;
            }
            seen.insert(facts.iter().copied().collect());
            sampled.push(SampledState {
                facts,
                function,
                estimate,
                active: true,
            });

            if (si + 1) % SAMPLE_LOG_INTERVAL == 0 {
                info!(
                    event = "diverse_progress",
                    states = sampled.len(),
                    dead_ends = self.stats.dead_ends
                );
            }
        }

        self.stats.states = sampled.len();
        info!(
            event = "diverse_sampled",
            states = self.stats.states,
            dead_ends = self.stats.dead_ends,
            duplicates = self.stats.duplicates
        );
        sampled
    }

    fn cover<S: LpSolver + ?Sized>(
        &mut self,
        scope: &mut GenerationScope<'_, S>,
        mut states: Vec<SampledState>,
    ) {
        let fact_count = scope.model().fact_count();
        let mut active = states.len();
        while active > 0 {
            let mut coef = vec![0.0; fact_count];
            for state in states.iter().filter(|s| s.active) {
                for &f in &state.facts {
                    coef[f] += 1.0;
                }
            }
            if let Err(e) = scope.model_mut().set_obj(&coef) {
                warn!(event = "diverse_stopped", error = %e);
                break;
            }
            let Some(avg) = scope.solve() else {
                warn!(
                    event = "diverse_stopped",
                    reason = "no optimal solution",
                    active = active
                );
                break;
            };

            let evaluator = *scope.evaluator();
            let avg_hits = states
                .iter()
                .filter(|s| s.active)
                .any(|s| evaluator.function_estimate(&avg, &s.facts) == s.estimate);
            let chosen = if avg_hits {
                debug!(event = "diverse_select", source = "average");
                avg
            } else {
                let pick = self.rng.random_range(0..active);
                let Some(state) = states.iter().filter(|s| s.active).nth(pick) else {
                    break;
                };
                debug!(event = "diverse_select", source = "state", index = pick);
                state.function.clone()
            };

            for state in states.iter_mut().filter(|s| s.active) {
                if evaluator.function_estimate(&chosen, &state.facts) >= state.estimate {
                    state.active = false;
                    active -= 1;
                }
            }
            scope.add_function(chosen);
            self.stats.functions += 1;
        }

        info!(event = "diverse_done", functions = self.stats.functions);
    }
}

impl<S: LpSolver + ?Sized> Strategy<S> for DiverseStrategy {
    fn run(&mut self, scope: &mut GenerationScope<'_, S>) -> Result<()> {
        info!(event = "diverse_start", samples = self.num_samples);
        let config = scope.config();
        let max_steps = scope.random_walk_max_steps();
        let mut sampler = StateSampler::new(
            scope.task(),
            SamplerType::RandomWalk,
            config.sampler_seed,
            None,
        )?
        .with_max_steps(max_steps);
        let states = (0..self.num_samples)
            .map(|_| sampler.next_state())
            .collect::<Result<Vec<_>>>()?;
        self.cover_states(scope, states)
    }

    fn strategy_type_name(&self) -> &'static str {
        "DiverseStrategy"
    }
}
