//! PotForge Core - planning task model and mutex reasoning
//!
//! This crate provides the inputs of potential heuristic synthesis:
//! - Finite-domain (FDR) tasks and their fact numbering
//! - The mutex-group annotated STRIPS view of a task
//! - Mutex pairs (from groups or h² reachability) and disambiguation
//! - Applicable-operator lookup and random walks

pub mod app_op;
pub mod error;
pub mod fact;
pub mod mutex;
pub mod random_walk;
pub mod task;

pub use app_op::ApplicableOps;
pub use error::{PotForgeError, Result};
pub use fact::{FactId, FactSet, VarId};
pub use mutex::{
    Disambiguation, DisambiguationOracle, DisambiguationStrength, MutexOracle, MutexPairs,
};
pub use random_walk::RandomWalk;
pub use task::{
    CondEff, FdrFact, FdrOperator, FdrTask, FdrTaskBuilder, FdrVar, FdrVars, MgStripsTask,
    MutexGroup, PartialState, StripsOp,
};
