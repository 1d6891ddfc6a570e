//! Objective strategies.
//!
//! A strategy sets objectives on the potential model of a
//! [`GenerationScope`], solves it and appends the resulting functions to
//! the ensemble:
//! - [`StateStrategy`]: initial state, all syntactic states, or both
//! - [`SamplesStrategy`]: sampled states, summed or one function each
//! - [`MutexStrategy`]: mutex-consistent state counts, optionally
//!   conditioned on facts
//! - [`DiverseStrategy`]: greedy ensemble covering sampled states

mod basic;
mod diverse;
mod mutex;
mod samples;

#[cfg(test)]
mod tests;

pub use basic::{StateObjective, StateStrategy};
pub use diverse::{DiverseStats, DiverseStrategy};
pub use mutex::{Conditioning, MutexStrategy};
pub use samples::{SampleAggregate, SamplesStrategy};

use std::fmt::Debug;

use potforge_config::{HeuristicConfig, ObjectiveConfig};
use potforge_core::Result;
use potforge_lp::LpSolver;

use crate::scope::GenerationScope;

/// Progress is logged after this many conditioned functions.
pub(crate) const CONDITIONED_LOG_INTERVAL: usize = 10;

/// Progress is logged after this many samples.
pub(crate) const SAMPLE_LOG_INTERVAL: usize = 100;

/// A way of choosing objectives for the potential model.
///
/// Failed LP solves are not errors: a strategy keeps whatever functions
/// it managed to add. Errors are reserved for invalid configurations and
/// sampling failures.
pub trait Strategy<S: LpSolver + ?Sized>: Debug {
    /// Adds functions to the ensemble held by `scope`.
    fn run(&mut self, scope: &mut GenerationScope<'_, S>) -> Result<()>;

    /// Returns the name of this strategy type.
    fn strategy_type_name(&self) -> &'static str;
}

/// Builds the strategy selected by `config.objective`.
pub fn strategy_for<S: LpSolver + ?Sized>(config: &HeuristicConfig) -> Box<dyn Strategy<S>> {
    match &config.objective {
        ObjectiveConfig::Init => Box::new(StateStrategy::new(StateObjective::Init)),
        ObjectiveConfig::AllStates => Box::new(StateStrategy::new(StateObjective::AllStates)),
        ObjectiveConfig::MaxInitAllStates => {
            Box::new(StateStrategy::new(StateObjective::MaxInitAllStates))
        }
        ObjectiveConfig::SamplesSum(c) => {
            Box::new(SamplesStrategy::new(c.clone(), SampleAggregate::Sum))
        }
        ObjectiveConfig::SamplesMax(c) => {
            Box::new(SamplesStrategy::new(c.clone(), SampleAggregate::Max))
        }
        ObjectiveConfig::AllStatesMutex(c) => {
            Box::new(MutexStrategy::new(c.mutex_size, Conditioning::None))
        }
        ObjectiveConfig::AllStatesMutexConditioned(c) => {
            Box::new(MutexStrategy::new(c.mutex_size, Conditioning::EachFact))
        }
        ObjectiveConfig::AllStatesMutexConditionedRand(c) => Box::new(MutexStrategy::new(
            c.mutex_size,
            Conditioning::RandomFacts(c.num_samples),
        )),
        ObjectiveConfig::AllStatesMutexConditionedRand2(c) => Box::new(MutexStrategy::new(
            c.mutex_size,
            Conditioning::RandomPairs(c.num_samples),
        )),
        ObjectiveConfig::Diverse(c) => {
            Box::new(DiverseStrategy::new(c.num_samples, config.diverse_seed))
        }
    }
}
