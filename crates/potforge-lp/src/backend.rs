//! [`LpSolver`] backed by the `microlp` sparse simplex.

use microlp::{ComparisonOp, OptimizationDirection, Problem, Variable};
use tracing::{debug, trace};

use crate::problem::{Direction, LpProblem, LpSolution, Sense};
use crate::{LpError, LpSolver};

/// Sparse simplex with branch and bound for integer variables.
///
/// # Example
///
/// ```
/// use potforge_lp::{Direction, LpProblem, LpSolver, MicroLpSolver, Sense};
///
/// // max x + y  s.t.  x + 2y <= 4,  3x + y <= 6,  x, y >= 0
/// let mut lp = LpProblem::new(2, Direction::Maximize);
/// for v in 0..2 {
///     lp.set_bounds(v, 0.0, f64::INFINITY);
///     lp.set_objective(v, 1.0);
/// }
/// lp.add_constraint(vec![(0, 1.0), (1, 2.0)], Sense::Le, 4.0);
/// lp.add_constraint(vec![(0, 3.0), (1, 1.0)], Sense::Le, 6.0);
///
/// let sol = MicroLpSolver::new().solve(&lp).unwrap();
/// assert!((sol.objective - 2.8).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MicroLpSolver;

impl MicroLpSolver {
    pub fn new() -> Self {
        Self
    }
}

fn build(problem: &LpProblem) -> (Problem, Vec<Variable>) {
    let direction = match problem.direction() {
        Direction::Maximize => OptimizationDirection::Maximize,
        Direction::Minimize => OptimizationDirection::Minimize,
    };
    let mut lp = Problem::new(direction);
    let vars = (0..problem.num_vars())
        .map(|var| {
            let obj = problem.objective()[var];
            let (lower, upper) = problem.bounds(var);
            if problem.is_integer(var) {
                // saturating casts map infinite bounds to the i32 range
                lp.add_integer_var(obj, (lower.ceil() as i32, upper.floor() as i32))
            } else {
                lp.add_var(obj, (lower, upper))
            }
        })
        .collect::<Vec<_>>();

    for c in problem.constraints() {
        let op = match c.sense {
            Sense::Le => ComparisonOp::Le,
            Sense::Ge => ComparisonOp::Ge,
            Sense::Eq => ComparisonOp::Eq,
        };
        let terms = merge_terms(&c.coefs);
        lp.add_constraint(
            terms.into_iter().map(|(var, coef)| (vars[var], coef)),
            op,
            c.rhs,
        );
    }
    (lp, vars)
}

impl LpSolver for MicroLpSolver {
    fn solve(&self, problem: &LpProblem) -> Result<LpSolution, LpError> {
        problem.validate()?;
        trace!(event = "lp_problem", lp = %problem);

        let (lp, vars) = build(problem);
        let solution = lp.solve().map_err(|e| match e {
            microlp::Error::Infeasible => LpError::Infeasible,
            microlp::Error::Unbounded => LpError::Unbounded,
            microlp::Error::InternalError(msg) => LpError::Backend(msg),
        })?;

        let values = vars
            .iter()
            .enumerate()
            .map(|(var, &v)| {
                let value = *solution.var_value(v);
                if problem.is_integer(var) {
                    value.round()
                } else {
                    value
                }
            })
            .collect();
        debug!(
            event = "lp_optimal",
            vars = problem.num_vars(),
            rows = problem.num_constraints(),
            objective = solution.objective()
        );
        Ok(LpSolution {
            objective: solution.objective(),
            values,
        })
    }
}

/// Sums the coefficients of repeated variables, dropping zeros.
fn merge_terms(coefs: &[(usize, f64)]) -> Vec<(usize, f64)> {
    let mut terms = coefs.to_vec();
    terms.sort_unstable_by_key(|&(var, _)| var);
    let mut merged: Vec<(usize, f64)> = Vec::with_capacity(terms.len());
    for (var, coef) in terms {
        match merged.last_mut() {
            Some(last) if last.0 == var => last.1 += coef,
            _ => merged.push((var, coef)),
        }
    }
    merged.retain(|&(_, coef)| coef != 0.0);
    merged
}

#[cfg(test)]
#[path = "backend_tests.rs"]
mod tests;
