//! A truck moves a package along a line of locations.
//!
//! # Example
//!
//! ```
//! use potforge_test::line::{line_task, LINE_OPTIMAL_COST};
//!
//! let task = line_task();
//! assert_eq!(task.vars.len(), 2);
//! assert_eq!(LINE_OPTIMAL_COST, 6);
//! ```

use potforge_core::{FdrOperator, FdrTask};

/// Number of locations on the line.
pub const LINE_LENGTH: usize = 4;

/// Cost of an optimal plan for [`line_task`]:
/// drive l1-l0, load, drive to l3 in three steps, unload.
pub const LINE_OPTIMAL_COST: u32 = 6;

/// Truck starts at `l1`, package at `l0`, goal is the package at `l3`.
///
/// Variables: `truck` in {l0..l3}; `pkg` in {l0..l3, in-truck}.
/// All operators cost 1.
pub fn line_task() -> FdrTask {
    let locations: Vec<String> = (0..LINE_LENGTH).map(|i| format!("l{}", i)).collect();
    let mut pkg_values = locations.clone();
    pkg_values.push("in-truck".to_string());
    let in_truck = LINE_LENGTH;

    let mut builder = FdrTask::builder()
        .var("truck", locations.iter().cloned())
        .var("pkg", pkg_values)
        .init([1, 0])
        .goal(1, LINE_LENGTH - 1);

    for from in 0..LINE_LENGTH {
        for to in [from.wrapping_sub(1), from + 1] {
            if to >= LINE_LENGTH {
                continue;
            }
            builder = builder.operator(
                FdrOperator::new(format!("drive-l{}-l{}", from, to), 1)
                    .with_pre(0, from)
                    .with_eff(0, to),
            );
        }
    }
    for loc in 0..LINE_LENGTH {
        builder = builder
            .operator(
                FdrOperator::new(format!("load-l{}", loc), 1)
                    .with_pre(0, loc)
                    .with_pre(1, loc)
                    .with_eff(1, in_truck),
            )
            .operator(
                FdrOperator::new(format!("unload-l{}", loc), 1)
                    .with_pre(0, loc)
                    .with_pre(1, in_truck)
                    .with_eff(1, loc),
            );
    }
    builder.build().expect("line fixture is valid")
}
