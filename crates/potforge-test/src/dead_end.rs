//! Tasks the synthesis engine must refuse or flag.

use potforge_core::{CondEff, FdrOperator, FdrTask, PartialState};

/// The goal value of `x` is never produced by any operator.
pub fn unsolvable_task() -> FdrTask {
    FdrTask::builder()
        .var("x", ["0", "1"])
        .var("y", ["0", "1"])
        .init([0, 0])
        .goal(0, 1)
        .operator(FdrOperator::new("set-y", 1).with_pre(1, 0).with_eff(1, 1))
        .build()
        .expect("unsolvable fixture is valid")
}

/// [`crate::switch::switch_task`] with a conditional effect added.
pub fn cond_eff_task() -> FdrTask {
    let mut task = crate::switch::switch_task();
    task.ops[0] = task.ops[0].clone().with_cond_eff(CondEff {
        pre: PartialState::from_pairs([(0, 0)]),
        eff: PartialState::from_pairs([(0, 1)]),
    });
    task
}
