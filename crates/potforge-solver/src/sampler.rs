//! State sampling for sample-based objectives.

use potforge_config::SamplerType;
use potforge_core::{FactSet, FdrTask, MutexOracle, MutexPairs, PotForgeError, RandomWalk, Result};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

const DEFAULT_MAX_ATTEMPTS: usize = 1_000_000;
const ATTEMPT_LOG_INTERVAL: usize = 100_000;

enum Source<'a> {
    Syntactic(ChaCha8Rng),
    SyntacticMutex(ChaCha8Rng, &'a MutexPairs),
    RandomWalk(RandomWalk<'a>),
}

/// Draws full FDR states from a task.
///
/// Syntactic samplers pick a uniform value per variable, optionally
/// redrawing until the state contains no mutex pair. The random-walk
/// sampler walks from the initial state for a binomially distributed
/// number of steps bounded by [`StateSampler::with_max_steps`].
pub struct StateSampler<'a> {
    task: &'a FdrTask,
    source: Source<'a>,
    max_steps: usize,
    max_attempts: usize,
}

impl<'a> StateSampler<'a> {
    /// # Errors
    ///
    /// Returns [`PotForgeError::Config`] for the mutex sampler without
    /// mutexes.
    pub fn new(
        task: &'a FdrTask,
        sampler: SamplerType,
        seed: u64,
        mutex: Option<&'a MutexPairs>,
    ) -> Result<Self> {
        let source = match sampler {
            SamplerType::Syntactic => Source::Syntactic(ChaCha8Rng::seed_from_u64(seed)),
            SamplerType::SyntacticMutex => {
                let mutex = mutex.ok_or_else(|| {
                    PotForgeError::Config("mutex sampler requires mutexes".to_string())
                })?;
                Source::SyntacticMutex(ChaCha8Rng::seed_from_u64(seed), mutex)
            }
            SamplerType::RandomWalk => Source::RandomWalk(RandomWalk::new(task, seed)),
        };
        Ok(Self {
            task,
            source,
            max_steps: 0,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        })
    }

    /// Walk length bound for the random-walk sampler.
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Redraw bound for the mutex sampler.
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    /// Draws the next state.
    ///
    /// # Errors
    ///
    /// Returns [`PotForgeError::SampleLimit`] if the mutex sampler finds
    /// no mutex-free state within the attempt limit.
    pub fn next_state(&mut self) -> Result<Vec<usize>> {
        let task = self.task;
        match &mut self.source {
            Source::Syntactic(rng) => Ok(syntactic_state(task, rng)),
            Source::SyntacticMutex(rng, mutex) => {
                for attempt in 1..=self.max_attempts {
                    let state = syntactic_state(task, rng);
                    let facts: FactSet = task.state_facts(&state).collect();
                    if !mutex.is_mutex_set(&facts) {
                        return Ok(state);
                    }
                    if attempt % ATTEMPT_LOG_INTERVAL == 0 {
                        debug!(event = "sample_attempts", attempts = attempt);
                    }
                }
                Err(PotForgeError::SampleLimit {
                    attempts: self.max_attempts,
                })
            }
            Source::RandomWalk(walk) => Ok(walk.sample(&task.init, self.max_steps)),
        }
    }
}

fn syntactic_state(task: &FdrTask, rng: &mut ChaCha8Rng) -> Vec<usize> {
    task.vars
        .iter()
        .map(|var| rng.random_range(0..var.domain_size()))
        .collect()
}

#[cfg(test)]
#[path = "sampler_tests.rs"]
mod tests;
