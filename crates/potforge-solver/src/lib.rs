//! PotForge Solver - potential heuristic synthesis
//!
//! This crate turns a planning task into an admissible potential heuristic:
//! - The potential LP model with maxpot auxiliaries ([`model`])
//! - Objective strategies: single states, state aggregates, samples,
//!   mutex-consistent state counts and diverse ensembles ([`strategy`])
//! - State sampling ([`sampler`])
//! - Ensemble evaluation with clamping and dead-end detection ([`heuristic`])
//! - The potentials text artifact ([`io`]) and plan replay ([`plan`])
//!
//! # Example
//!
//! ```
//! use potforge_config::HeuristicConfig;
//! use potforge_solver::{generate_heuristic, potentials_to_string};
//! # use potforge_core::{FdrOperator, FdrTask};
//! # let task = FdrTask::builder()
//! #     .var("on", ["false", "true"])
//! #     .init([0])
//! #     .goal(0, 1)
//! #     .operator(FdrOperator::new("switch-on", 1).with_pre(0, 0).with_eff(0, 1))
//! #     .build()
//! #     .unwrap();
//!
//! let heuristic = generate_heuristic(&task, &HeuristicConfig::default()).unwrap();
//! let artifact = potentials_to_string(&task.vars, &heuristic).unwrap();
//! assert!(artifact.starts_with("1\nbegin_potentials\n"));
//! ```

pub mod generator;
pub mod heuristic;
pub mod io;
pub mod model;
pub mod objective;
pub mod plan;
pub mod sampler;
pub mod scope;
pub mod strategy;

pub use generator::{generate, generate_heuristic};
pub use heuristic::{Evaluator, PotentialFunction, PotentialHeuristic, DEAD_END};
pub use io::{potentials_to_string, read_potentials, write_potentials};
pub use model::{Maxpot, MaxpotTable, ModelStats, PotentialModel};
pub use objective::{all_states_mutex, count_states_mutex};
pub use plan::{evaluate_plan, PlanEvaluation, PlanStep};
pub use sampler::StateSampler;
pub use scope::GenerationScope;
pub use strategy::{
    strategy_for, Conditioning, DiverseStats, DiverseStrategy, MutexStrategy, SampleAggregate,
    SamplesStrategy, StateObjective, StateStrategy, Strategy,
};
