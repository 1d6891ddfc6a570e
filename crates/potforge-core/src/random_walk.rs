//! Bounded random walks from a state.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::app_op::ApplicableOps;
use crate::task::FdrTask;

/// Random walk sampler owning its generator.
///
/// The walk length is drawn as the number of successes among
/// `max_steps` fair coin flips; each step applies a uniformly chosen
/// applicable operator and the walk stops early in a state without
/// applicable operators.
///
/// # Example
///
/// ```
/// use potforge_core::{FdrOperator, FdrTask, RandomWalk};
///
/// let task = FdrTask::builder()
///     .var("x", ["0", "1"])
///     .init([0])
///     .operator(FdrOperator::new("set", 1).with_pre(0, 0).with_eff(0, 1))
///     .build()
///     .unwrap();
///
/// let mut walk = RandomWalk::new(&task, 42);
/// let state = walk.sample(&task.init, 10);
/// assert!(state == vec![0] || state == vec![1]);
/// ```
pub struct RandomWalk<'a> {
    task: &'a FdrTask,
    app_ops: ApplicableOps,
    rng: ChaCha8Rng,
}

impl<'a> RandomWalk<'a> {
    pub fn new(task: &'a FdrTask, seed: u64) -> Self {
        Self {
            task,
            app_ops: ApplicableOps::new(task),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Walks from `start` for a binomially distributed number of steps.
    pub fn sample(&mut self, start: &[usize], max_steps: usize) -> Vec<usize> {
        let steps = (0..max_steps).filter(|_| self.rng.random_bool(0.5)).count();
        self.walk(start, steps)
    }

    /// Walks exactly `steps` steps unless a state without applicable
    /// operators is reached first.
    pub fn walk(&mut self, start: &[usize], steps: usize) -> Vec<usize> {
        let mut state = start.to_vec();
        for _ in 0..steps {
            let ops = self.app_ops.find(self.task, &state);
            if ops.is_empty() {
                break;
            }
            let op_id = ops[self.rng.random_range(0..ops.len())];
            state = self.task.ops[op_id].apply_on_state(&state);
        }
        state
    }
}

#[cfg(test)]
#[path = "random_walk_tests.rs"]
mod tests;
