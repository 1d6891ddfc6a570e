//! Shared planning task fixtures for PotForge crates.
//!
//! Every fixture is a small grounded FDR task whose optimal plan cost is
//! known, so heuristic values can be checked against it.
//!
//! - [`switch`] - one boolean fact and one operator
//! - [`unset`] - operators whose effects touch variables their
//!   preconditions leave open
//! - [`groups`] - two free variables forming mutex groups of sizes 2 and 3
//! - [`two_states`] - exactly two reachable states
//! - [`line`] - a truck carrying a package along a line of locations
//! - [`dead_end`] - an unsolvable task and a task with conditional effects
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! potforge-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use potforge_test::line::{line_task, LINE_OPTIMAL_COST};
//! use potforge_test::switch::switch_task;
//! ```

pub mod dead_end;
pub mod groups;
pub mod line;
pub mod switch;
pub mod two_states;
pub mod unset;

pub use dead_end::{cond_eff_task, unsolvable_task};
pub use groups::groups_task;
pub use line::{line_task, LINE_OPTIMAL_COST};
pub use switch::switch_task;
pub use two_states::two_states_task;
pub use unset::unset_pre_task;
