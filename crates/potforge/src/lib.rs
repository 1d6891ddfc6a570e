//! PotForge - Potential Heuristics for Classical Planning
//!
//! Build a task, pick an objective, get an admissible heuristic.
//!
//! # Example
//!
//! ```rust
//! use potforge::prelude::*;
//!
//! let task = FdrTask::builder()
//!     .var("on", ["false", "true"])
//!     .init([0])
//!     .goal(0, 1)
//!     .operator(FdrOperator::new("switch-on", 1).with_pre(0, 0).with_eff(0, 1))
//!     .build()
//!     .unwrap();
//!
//! let config = HeuristicConfig::default().with_objective(ObjectiveConfig::Init);
//! let heuristic = synthesize_with_config(&task, &config).unwrap();
//! assert_eq!(heuristic.estimate_fdr_state(&task.vars, &task.init), Some(1));
//! ```

// Task model
pub use potforge_core::{
    FactId, FactSet, FdrOperator, FdrTask, FdrTaskBuilder, FdrVars, MgStripsTask, MutexPairs,
    PartialState, PotForgeError, Result, VarId,
};

// Configuration
pub use potforge_config::{
    DisambiguationMode, DiverseConfig, EvaluatorConfig, HeuristicConfig, MutexObjectiveConfig,
    MutexSamplesConfig, ObjectiveConfig, SamplerType, SamplesConfig,
};

// LP backend
pub use potforge_lp::{LpSolver, MicroLpSolver};

// Synthesis and evaluation
pub use potforge_solver::{
    evaluate_plan, generate, generate_heuristic, potentials_to_string, read_potentials,
    write_potentials, PlanEvaluation, PlanStep, PotentialFunction, PotentialHeuristic, DEAD_END,
};

/// Lower-level building blocks: the LP model, strategies and samplers.
pub mod engine {
    pub use potforge_solver::{
        model, objective, sampler, scope, strategy, GenerationScope, PotentialModel, StateSampler,
        Strategy,
    };
}

mod synthesize;
pub use synthesize::{synthesize, synthesize_to_file, synthesize_with_config, CONFIG_FILE};

pub mod prelude {
    pub use super::{
        synthesize, synthesize_with_config, DisambiguationMode, FdrOperator, FdrTask, FdrVars,
        HeuristicConfig, ObjectiveConfig, PartialState, PotentialHeuristic, SamplerType, DEAD_END,
    };
}
