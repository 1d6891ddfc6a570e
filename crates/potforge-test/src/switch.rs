//! Single boolean fact switched on by one unit-cost operator.
//!
//! # Example
//!
//! ```
//! use potforge_test::switch::switch_task;
//!
//! let task = switch_task();
//! assert_eq!(task.fact_count(), 2);
//! assert_eq!(task.ops.len(), 1);
//! ```

use potforge_core::{FdrOperator, FdrTask};

/// `on` is false initially and must become true; optimal cost 1.
pub fn switch_task() -> FdrTask {
    FdrTask::builder()
        .var("on", ["false", "true"])
        .init([0])
        .goal(0, 1)
        .operator(FdrOperator::new("switch-on", 1).with_pre(0, 0).with_eff(0, 1))
        .build()
        .expect("switch fixture is valid")
}
