//! Task with exactly two reachable states.

use potforge_core::{FdrOperator, FdrTask};

/// `door` goes from closed to open and never back. Reachable states are
/// `[0]` (estimate 1) and `[1]` (goal, estimate 0).
pub fn two_states_task() -> FdrTask {
    FdrTask::builder()
        .var("door", ["closed", "open"])
        .init([0])
        .goal(0, 1)
        .operator(FdrOperator::new("open", 1).with_pre(0, 0).with_eff(0, 1))
        .build()
        .expect("two-states fixture is valid")
}
