//! PotForge LP - linear programming backend
//!
//! [`LpProblem`] describes a (mixed-integer) linear program, [`LpSolver`]
//! is the seam potential models solve through, and [`MicroLpSolver`]
//! solves problems with the `microlp` crate.

pub mod backend;
pub mod problem;

use thiserror::Error;

pub use backend::MicroLpSolver;
pub use problem::{Direction, LpConstraint, LpProblem, LpSolution, Sense, INFINITY_BOUND};

/// Outcome of a solve that produced no optimal solution.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LpError {
    #[error("LP is infeasible")]
    Infeasible,

    #[error("LP is unbounded")]
    Unbounded,

    #[error("invalid LP: {0}")]
    InvalidProblem(String),

    #[error("LP backend failure: {0}")]
    Backend(String),
}

/// Solves linear programs.
pub trait LpSolver {
    /// Returns an optimal solution or the reason none was found.
    fn solve(&self, problem: &LpProblem) -> Result<LpSolution, LpError>;
}

impl<S: LpSolver + ?Sized> LpSolver for &S {
    fn solve(&self, problem: &LpProblem) -> Result<LpSolution, LpError> {
        (**self).solve(problem)
    }
}
