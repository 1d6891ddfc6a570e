//! Objectives over sampled states.

use potforge_config::{SamplerType, SamplesConfig};
use potforge_core::{FactId, Result};
use potforge_lp::LpSolver;
use tracing::info;

use super::{Strategy, SAMPLE_LOG_INTERVAL};
use crate::heuristic::DEAD_END;
use crate::sampler::StateSampler;
use crate::scope::GenerationScope;

/// How sampled states turn into functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleAggregate {
    /// One solve over the summed state indicators.
    Sum,
    /// One solve per state; dead ends are skipped.
    Max,
}

#[derive(Debug, Clone)]
pub struct SamplesStrategy {
    config: SamplesConfig,
    aggregate: SampleAggregate,
}

impl SamplesStrategy {
    pub fn new(config: SamplesConfig, aggregate: SampleAggregate) -> Self {
        Self { config, aggregate }
    }

    fn sampler<'a, S: LpSolver + ?Sized>(
        &self,
        scope: &mut GenerationScope<'a, S>,
    ) -> Result<StateSampler<'a>> {
        let config = scope.config();
        let mutex = match self.config.sampler {
            SamplerType::SyntacticMutex => Some(scope.require_mutex()?),
            _ => None,
        };
        let sampler = StateSampler::new(
            scope.task(),
            self.config.sampler,
            config.sampler_seed,
            mutex,
        )?
        .with_max_attempts(config.max_sample_attempts);
        Ok(match self.config.sampler {
            SamplerType::RandomWalk => sampler.with_max_steps(scope.random_walk_max_steps()),
            _ => sampler,
        })
    }
}

impl<S: LpSolver + ?Sized> Strategy<S> for SamplesStrategy {
    fn run(&mut self, scope: &mut GenerationScope<'_, S>) -> Result<()> {
        let num_samples = self.config.num_samples;
        info!(
            event = "sampling_start",
            samples = num_samples,
            sampler = ?self.config.sampler
        );

        let task = scope.task();
        let mut sampler = self.sampler(scope)?;
        let mut coef = vec![0.0; task.fact_count()];
        let mut solved_states = 0usize;
        for si in 0..num_samples {
            let state = sampler.next_state()?;
            let facts: Vec<FactId> = task.state_facts(&state).collect();
            match self.aggregate {
                SampleAggregate::Sum => {
                    for &f in &facts {
                        coef[f] += 1.0;
                    }
                }
                SampleAggregate::Max => {
                    scope.model_mut().set_obj_fdr_state(&task.vars, &state);
                    let Some(function) = scope.solve() else {
                        continue;
                    };
                    if scope.evaluator().function_estimate(&function, &facts) == DEAD_END {
                        continue;
                    }
                    scope.add_function(function);
                    solved_states += 1;
                    if (si + 1) % SAMPLE_LOG_INTERVAL == 0 {
                        info!(
                            event = "sampling_progress",
                            solved = solved_states,
                            samples = num_samples
                        );
                    }
                }
            }
        }

        if self.aggregate == SampleAggregate::Sum {
            scope.model_mut().set_obj(&coef)?;
            let solved = scope.solve().map(|f| scope.add_function(f)).is_some();
            info!(event = "objective_solved", objective = "samples_sum", solved = solved);
        } else {
            info!(
                event = "objective_solved",
                objective = "samples_max",
                functions = solved_states
            );
        }
        Ok(())
    }

    fn strategy_type_name(&self) -> &'static str {
        "SamplesStrategy"
    }
}
