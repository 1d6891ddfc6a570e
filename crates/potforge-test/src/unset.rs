//! Operators that change a variable without requiring its old value.

use potforge_core::{FdrOperator, FdrTask};

/// Two operators set `pos` without a precondition on `pos`; both need a
/// maxpot over the whole `pos` domain.
///
/// Variables: `pos` in {a, b, c} (facts 0..3), `key` in {no, yes}
/// (facts 3..5). Optimal cost 3: `grab-key` then `teleport-c`.
///
/// # Example
///
/// ```
/// use potforge_test::unset::unset_pre_task;
///
/// let task = unset_pre_task();
/// assert!(!task.ops[1].pre.is_set(0));
/// assert!(task.ops[1].eff.is_set(0));
/// ```
pub fn unset_pre_task() -> FdrTask {
    FdrTask::builder()
        .var("pos", ["a", "b", "c"])
        .var("key", ["no", "yes"])
        .init([0, 0])
        .goal(0, 2)
        .operator(FdrOperator::new("grab-key", 1).with_pre(1, 0).with_eff(1, 1))
        .operator(FdrOperator::new("teleport-c", 2).with_pre(1, 1).with_eff(0, 2))
        .operator(FdrOperator::new("reset", 1).with_eff(0, 0))
        .build()
        .expect("unset fixture is valid")
}
