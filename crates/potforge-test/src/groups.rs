//! Two variables with domains of size 2 and 3.

use potforge_core::{FdrOperator, FdrTask};

/// Both variables can be set freely, so every syntactic state is
/// reachable. Facts: `a` = 0..2, `b` = 2..5. Optimal cost 1.
pub fn groups_task() -> FdrTask {
    let mut builder = FdrTask::builder()
        .var("a", ["a0", "a1"])
        .var("b", ["b0", "b1", "b2"])
        .init([0, 0])
        .goal(0, 1)
        .goal(1, 2);
    for val in 0..2 {
        builder = builder.operator(FdrOperator::new(format!("set-a{}", val), 1).with_eff(0, val));
    }
    builder = builder.operator(
        FdrOperator::new("set-a1-b2", 1)
            .with_pre(0, 0)
            .with_eff(0, 1)
            .with_eff(1, 2),
    );
    for val in 0..3 {
        builder = builder.operator(FdrOperator::new(format!("set-b{}", val), 1).with_eff(1, val));
    }
    builder.build().expect("groups fixture is valid")
}
