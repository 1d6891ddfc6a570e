//! LP problem description.

use std::fmt;

use crate::LpError;

/// Bounds at or beyond this magnitude are treated as infinite.
pub const INFINITY_BOUND: f64 = 1e20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    Le,
    Ge,
    Eq,
}

impl fmt::Display for Sense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sense::Le => write!(f, "<="),
            Sense::Ge => write!(f, ">="),
            Sense::Eq => write!(f, "="),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Maximize,
    Minimize,
}

/// A linear row: `Σ coef·x  sense  rhs`.
#[derive(Debug, Clone, PartialEq)]
pub struct LpConstraint {
    pub coefs: Vec<(usize, f64)>,
    pub sense: Sense,
    pub rhs: f64,
}

/// Variables with bounds, an objective and linear constraints.
///
/// New variables are free (unbounded both ways) and continuous.
///
/// # Example
///
/// ```
/// use potforge_lp::{Direction, LpProblem, Sense};
///
/// let mut lp = LpProblem::new(2, Direction::Maximize);
/// lp.set_objective(0, 1.0);
/// lp.set_objective(1, 1.0);
/// lp.set_bounds(0, 0.0, f64::INFINITY);
/// lp.set_bounds(1, 0.0, f64::INFINITY);
/// lp.add_constraint(vec![(0, 1.0), (1, 2.0)], Sense::Le, 4.0);
///
/// assert_eq!(lp.num_vars(), 2);
/// assert_eq!(lp.num_constraints(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LpProblem {
    direction: Direction,
    lower: Vec<f64>,
    upper: Vec<f64>,
    integer: Vec<bool>,
    objective: Vec<f64>,
    constraints: Vec<LpConstraint>,
}

impl LpProblem {
    pub fn new(num_vars: usize, direction: Direction) -> Self {
        Self {
            direction,
            lower: vec![f64::NEG_INFINITY; num_vars],
            upper: vec![f64::INFINITY; num_vars],
            integer: vec![false; num_vars],
            objective: vec![0.0; num_vars],
            constraints: Vec::new(),
        }
    }

    pub fn num_vars(&self) -> usize {
        self.objective.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn set_bounds(&mut self, var: usize, lower: f64, upper: f64) {
        self.lower[var] = normalize_lower(lower);
        self.upper[var] = normalize_upper(upper);
    }

    pub fn bounds(&self, var: usize) -> (f64, f64) {
        (self.lower[var], self.upper[var])
    }

    pub fn set_integer(&mut self, var: usize, integer: bool) {
        self.integer[var] = integer;
    }

    pub fn is_integer(&self, var: usize) -> bool {
        self.integer[var]
    }

    pub fn has_integers(&self) -> bool {
        self.integer.iter().any(|&i| i)
    }

    pub fn set_objective(&mut self, var: usize, coef: f64) {
        self.objective[var] = coef;
    }

    pub fn objective(&self) -> &[f64] {
        &self.objective
    }

    pub fn add_constraint(&mut self, coefs: Vec<(usize, f64)>, sense: Sense, rhs: f64) {
        self.constraints.push(LpConstraint { coefs, sense, rhs });
    }

    pub fn constraints(&self) -> &[LpConstraint] {
        &self.constraints
    }

    /// Checks indices, bounds and coefficients.
    pub fn validate(&self) -> Result<(), LpError> {
        let n = self.num_vars();
        for var in 0..n {
            if self.lower[var] > self.upper[var] {
                return Err(LpError::InvalidProblem(format!(
                    "variable {} has empty bounds [{}, {}]",
                    var, self.lower[var], self.upper[var]
                )));
            }
            if !self.objective[var].is_finite() {
                return Err(LpError::InvalidProblem(format!(
                    "objective coefficient of variable {} is not finite",
                    var
                )));
            }
        }
        for (row, c) in self.constraints.iter().enumerate() {
            if !c.rhs.is_finite() {
                return Err(LpError::InvalidProblem(format!(
                    "constraint {} has a non-finite right-hand side",
                    row
                )));
            }
            for &(var, coef) in &c.coefs {
                if var >= n || !coef.is_finite() {
                    return Err(LpError::InvalidProblem(format!(
                        "constraint {} has an invalid term ({}, {})",
                        row, var, coef
                    )));
                }
            }
        }
        Ok(())
    }
}

/// CPLEX LP text format with variables named `x<index>`.
impl fmt::Display for LpProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            Direction::Maximize => writeln!(f, "Maximize")?,
            Direction::Minimize => writeln!(f, "Minimize")?,
        }
        write!(f, " obj:")?;
        write_terms(
            f,
            self.objective
                .iter()
                .enumerate()
                .filter(|(_, c)| **c != 0.0)
                .map(|(v, &c)| (v, c)),
        )?;
        writeln!(f)?;

        writeln!(f, "Subject To")?;
        for (row, c) in self.constraints.iter().enumerate() {
            write!(f, " c{}:", row)?;
            write_terms(f, c.coefs.iter().copied())?;
            writeln!(f, " {} {}", c.sense, c.rhs)?;
        }

        writeln!(f, "Bounds")?;
        for var in 0..self.num_vars() {
            let (lo, hi) = (self.lower[var], self.upper[var]);
            match (lo.is_finite(), hi.is_finite()) {
                (true, true) => writeln!(f, " {} <= x{} <= {}", lo, var, hi)?,
                (true, false) => writeln!(f, " x{} >= {}", var, lo)?,
                (false, true) => writeln!(f, " -inf <= x{} <= {}", var, hi)?,
                (false, false) => writeln!(f, " x{} free", var)?,
            }
        }

        if self.has_integers() {
            writeln!(f, "Generals")?;
            for var in (0..self.num_vars()).filter(|&v| self.integer[v]) {
                writeln!(f, " x{}", var)?;
            }
        }
        writeln!(f, "End")
    }
}

fn write_terms(
    f: &mut fmt::Formatter<'_>,
    terms: impl Iterator<Item = (usize, f64)>,
) -> fmt::Result {
    let mut empty = true;
    for (var, coef) in terms {
        let sign = if coef < 0.0 { '-' } else { '+' };
        if empty && sign == '+' {
            write!(f, " {} x{}", coef.abs(), var)?;
        } else {
            write!(f, " {} {} x{}", sign, coef.abs(), var)?;
        }
        empty = false;
    }
    if empty {
        write!(f, " 0 x0")?;
    }
    Ok(())
}

fn normalize_lower(v: f64) -> f64 {
    if v <= -INFINITY_BOUND {
        f64::NEG_INFINITY
    } else {
        v
    }
}

fn normalize_upper(v: f64) -> f64 {
    if v >= INFINITY_BOUND {
        f64::INFINITY
    } else {
        v
    }
}

/// Optimal primal solution.
#[derive(Debug, Clone, PartialEq)]
pub struct LpSolution {
    pub objective: f64,
    pub values: Vec<f64>,
}

#[cfg(test)]
#[path = "problem_tests.rs"]
mod tests;
