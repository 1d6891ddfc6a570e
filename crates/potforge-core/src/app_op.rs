//! Applicable-operator lookup.

use crate::fact::FactId;
use crate::task::FdrTask;

/// Index from facts to the operators they enable.
///
/// # Example
///
/// ```
/// use potforge_core::{ApplicableOps, FdrOperator, FdrTask};
///
/// let task = FdrTask::builder()
///     .var("x", ["0", "1"])
///     .init([0])
///     .operator(FdrOperator::new("set", 1).with_pre(0, 0).with_eff(0, 1))
///     .operator(FdrOperator::new("reset", 1).with_pre(0, 1).with_eff(0, 0))
///     .operator(FdrOperator::new("noop", 1))
///     .build()
///     .unwrap();
///
/// let app = ApplicableOps::new(&task);
/// assert_eq!(app.find(&task, &[0]), vec![0, 2]);
/// assert_eq!(app.find(&task, &[1]), vec![1, 2]);
/// ```
#[derive(Debug, Clone)]
pub struct ApplicableOps {
    by_fact: Vec<Vec<usize>>,
    pre_size: Vec<usize>,
    always: Vec<usize>,
}

impl ApplicableOps {
    pub fn new(task: &FdrTask) -> Self {
        let mut by_fact = vec![Vec::new(); task.fact_count()];
        let mut pre_size = Vec::with_capacity(task.ops.len());
        let mut always = Vec::new();
        for (op_id, op) in task.ops.iter().enumerate() {
            pre_size.push(op.pre.len());
            if op.pre.is_empty() {
                always.push(op_id);
            }
            for f in op.pre.iter() {
                by_fact[task.vars.fact_id(f.var, f.val)].push(op_id);
            }
        }
        Self {
            by_fact,
            pre_size,
            always,
        }
    }

    /// Sorted ids of operators applicable in the full state `state`.
    pub fn find(&self, task: &FdrTask, state: &[usize]) -> Vec<usize> {
        self.find_in_facts(task.state_facts(state))
    }

    /// Sorted ids of operators whose precondition is a subset of `facts`.
    pub fn find_in_facts(&self, facts: impl IntoIterator<Item = FactId>) -> Vec<usize> {
        let mut counter = vec![0usize; self.pre_size.len()];
        let mut out = self.always.clone();
        for fact in facts {
            for &op_id in &self.by_fact[fact] {
                counter[op_id] += 1;
                if counter[op_id] == self.pre_size[op_id] {
                    out.push(op_id);
                }
            }
        }
        out.sort_unstable();
        out
    }
}
