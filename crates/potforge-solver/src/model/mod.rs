//! Potential LP models.
//!
//! A [`PotentialModel`] holds the constraints every admissible and
//! consistent potential function satisfies, plus a mutable objective.
//! LP columns `0..fact_count` are the fact potentials; maxpot variables
//! follow.
//!
//! Two encodings are available:
//! - [`PotentialModel::from_fdr`] works directly on variables: an effect
//!   on a variable the precondition leaves open is bounded by a maxpot
//!   over the whole domain.
//! - [`PotentialModel::from_mg_strips`] asks a disambiguation oracle
//!   which facts can hold, which tightens those maxpots and drops
//!   provably unreachable operators.

mod maxpot;


pub use maxpot::{Maxpot, MaxpotKey, MaxpotTable};

use std::collections::HashMap;

use potforge_core::{
    DisambiguationOracle, DisambiguationStrength, FactId, FactSet, FdrTask, FdrVars,
    MgStripsTask, PotForgeError, Result, VarId,
};
use potforge_lp::{Direction, LpError, LpProblem, LpSolver, Sense};
use tracing::trace;

/// Upper bound of every potential LP variable.
pub const POT_VAR_UPPER: f64 = 1e9;

/// `Σ plus − Σ minus <= rhs` over LP variables.
#[derive(Debug, Clone, PartialEq)]
pub struct PotConstraint {
    pub plus: Vec<usize>,
    pub minus: Vec<usize>,
    pub rhs: f64,
}

/// `Σ vars >= rhs`.
#[derive(Debug, Clone, PartialEq)]
pub struct LowerBound {
    pub vars: Vec<usize>,
    pub rhs: f64,
}

/// Model size summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModelStats {
    pub fact_count: usize,
    pub lp_var_count: usize,
    pub op_constraints: usize,
    pub goal_constraints: usize,
    pub maxpots: usize,
    pub skipped_ops: usize,
}

/// LP variables, constraints and objective of a potential heuristic.
#[derive(Debug, Clone)]
pub struct PotentialModel {
    fact_count: usize,
    ops: Vec<PotConstraint>,
    goal: Option<PotConstraint>,
    maxpots: MaxpotTable,
    lower_bound: Option<LowerBound>,
    objective: Vec<f64>,
    skipped_ops: usize,
}

impl PotentialModel {
    fn empty(fact_count: usize) -> Self {
        Self {
            fact_count,
            ops: Vec::new(),
            goal: None,
            maxpots: MaxpotTable::new(fact_count),
            lower_bound: None,
            objective: vec![0.0; fact_count],
            skipped_ops: 0,
        }
    }

    /// Builds the fact-indexed model of an FDR task.
    ///
    /// # Errors
    ///
    /// Returns [`PotForgeError::Unsupported`] for conditional effects.
    pub fn from_fdr(task: &FdrTask) -> Result<Self> {
        if task.has_cond_eff() {
            return Err(PotForgeError::Unsupported(
                "conditional effects".to_string(),
            ));
        }

        let vars = &task.vars;
        let mut model = Self::empty(vars.fact_count());
        for op in &task.ops {
            let mut plus = Vec::with_capacity(op.eff.len());
            let mut minus = Vec::with_capacity(op.eff.len());
            for eff in op.eff.iter() {
                minus.push(vars.fact_id(eff.var, eff.val));
                let term = match op.pre.get(eff.var) {
                    Some(val) => vars.fact_id(eff.var, val),
                    None => model.var_maxpot(vars, eff.var),
                };
                plus.push(term);
            }
            model.add_op_constraint(plus, minus, f64::from(op.cost));
        }

        let goal: Vec<usize> = (0..vars.len())
            .map(|var| match task.goal.get(var) {
                Some(val) => vars.fact_id(var, val),
                None => model.var_maxpot(vars, var),
            })
            .collect();
        model.set_goal_constraint(goal);
        Ok(model)
    }

    /// Builds the model of an mg-strips task using disambiguation.
    ///
    /// Operators whose precondition is proven unreachable get no
    /// constraint.
    ///
    /// # Errors
    ///
    /// Returns [`PotForgeError::Unreachable`] if the goal is unreachable.
    pub fn from_mg_strips<D: DisambiguationOracle + ?Sized>(
        task: &MgStripsTask,
        oracle: &D,
        strength: DisambiguationStrength,
    ) -> Result<Self> {
        let mut model = Self::empty(task.fact_count);
        for op in &task.ops {
            let sets = match oracle.disambiguate(&op.pre, Some(&op.add_eff), strength) {
                Ok(sets) => sets,
                Err(PotForgeError::Unreachable) => {
                    trace!(event = "op_unreachable", op = %op.name);
                    model.skipped_ops += 1;
                    continue;
                }
                Err(e) => return Err(e),
            };
            let plus = model.disambiguated_terms(&sets);
            let minus = op.add_eff.iter().collect();
            model.add_op_constraint(plus, minus, f64::from(op.cost));
        }

        let sets = oracle.disambiguate(&task.goal, None, strength)?;
        let goal = model.disambiguated_terms(&sets);
        model.set_goal_constraint(goal);
        Ok(model)
    }

    fn var_maxpot(&mut self, vars: &FdrVars, var: VarId) -> usize {
        let key = vars.var(var).fact_ids.iter().map(|&f| (f, 0)).collect();
        self.maxpots.register(key)
    }

    /// One LP term per set: the fact of a singleton, a maxpot otherwise.
    fn disambiguated_terms(&mut self, sets: &[FactSet]) -> Vec<usize> {
        let mut multiplicity: HashMap<FactId, u32> = HashMap::new();
        for set in sets {
            for fact in set.iter() {
                *multiplicity.entry(fact).or_insert(0) += 1;
            }
        }

        sets.iter()
            .map(|set| {
                if set.len() == 1 {
                    set.as_slice()[0]
                } else {
                    let key = set.iter().map(|f| (f, multiplicity[&f])).collect();
                    self.maxpots.register(key)
                }
            })
            .collect()
    }

    /// Adds `Σ plus − Σ minus <= cost` after cancelling terms on both
    /// sides. Returns `false` if nothing was left to constrain.
    fn add_op_constraint(
        &mut self,
        mut plus: Vec<usize>,
        mut minus: Vec<usize>,
        cost: f64,
    ) -> bool {
        cancel_common(&mut plus, &mut minus);
        if plus.is_empty() && minus.is_empty() {
            return false;
        }
        self.ops.push(PotConstraint { plus, minus, rhs: cost });
        true
    }

    fn set_goal_constraint(&mut self, plus: Vec<usize>) {
        self.goal = if plus.is_empty() {
            None
        } else {
            Some(PotConstraint {
                plus,
                minus: Vec::new(),
                rhs: 0.0,
            })
        };
    }

    pub fn fact_count(&self) -> usize {
        self.fact_count
    }

    /// Facts plus maxpots.
    pub fn lp_var_count(&self) -> usize {
        self.fact_count + self.maxpots.len()
    }

    pub fn op_constraints(&self) -> &[PotConstraint] {
        &self.ops
    }

    pub fn goal_constraint(&self) -> Option<&PotConstraint> {
        self.goal.as_ref()
    }

    pub fn maxpots(&self) -> &MaxpotTable {
        &self.maxpots
    }

    pub fn stats(&self) -> ModelStats {
        ModelStats {
            fact_count: self.fact_count,
            lp_var_count: self.lp_var_count(),
            op_constraints: self.ops.len(),
            goal_constraints: usize::from(self.goal.is_some()),
            maxpots: self.maxpots.len(),
            skipped_ops: self.skipped_ops,
        }
    }

    pub fn objective(&self) -> &[f64] {
        &self.objective
    }

    /// Weight 1 on each fact of the full FDR state `state`.
    pub fn set_obj_fdr_state(&mut self, vars: &FdrVars, state: &[usize]) {
        self.objective.iter_mut().for_each(|c| *c = 0.0);
        for fact in vars.state_facts(state) {
            self.objective[fact] = 1.0;
        }
    }

    /// Average over all syntactic states: `1 / |domain|` on every value.
    pub fn set_obj_all_syntactic_states(&mut self, vars: &FdrVars) {
        self.objective.iter_mut().for_each(|c| *c = 0.0);
        for var in vars.iter() {
            let coef = 1.0 / var.domain_size() as f64;
            for &fact in &var.fact_ids {
                self.objective[fact] = coef;
            }
        }
    }

    /// Weight 1 on each fact of `facts`.
    pub fn set_obj_strips_state(&mut self, facts: &FactSet) {
        self.objective.iter_mut().for_each(|c| *c = 0.0);
        for fact in facts.iter() {
            self.objective[fact] = 1.0;
        }
    }

    /// Replaces the objective with externally computed coefficients.
    ///
    /// # Errors
    ///
    /// Returns [`PotForgeError::InvalidInput`] unless there is exactly
    /// one coefficient per fact.
    pub fn set_obj(&mut self, coefs: &[f64]) -> Result<()> {
        if coefs.len() != self.fact_count {
            return Err(PotForgeError::InvalidInput(format!(
                "expected {} objective coefficients, got {}",
                self.fact_count,
                coefs.len()
            )));
        }
        self.objective.copy_from_slice(coefs);
        Ok(())
    }

    /// Installs `Σ vars >= rhs`, replacing any previous lower bound.
    pub fn set_lower_bound(&mut self, vars: impl IntoIterator<Item = usize>, rhs: f64) {
        self.lower_bound = Some(LowerBound {
            vars: vars.into_iter().collect(),
            rhs,
        });
    }

    pub fn reset_lower_bound(&mut self) {
        self.lower_bound = None;
    }

    pub fn lower_bound(&self) -> Option<&LowerBound> {
        self.lower_bound.as_ref()
    }

    /// Assembles the LP for the current objective.
    pub fn build_lp(&self, use_ilp: bool) -> LpProblem {
        let n = self.lp_var_count();
        let mut lp = LpProblem::new(n, Direction::Maximize);
        for var in 0..n {
            lp.set_bounds(var, f64::NEG_INFINITY, POT_VAR_UPPER);
            lp.set_integer(var, use_ilp);
        }
        for (fact, &coef) in self.objective.iter().enumerate() {
            if coef != 0.0 {
                lp.set_objective(fact, coef);
            }
        }

        for c in self.ops.iter().chain(self.goal.as_ref()) {
            let coefs = c
                .plus
                .iter()
                .map(|&v| (v, 1.0))
                .chain(c.minus.iter().map(|&v| (v, -1.0)))
                .collect();
            lp.add_constraint(coefs, Sense::Le, c.rhs);
        }

        for maxpot in self.maxpots.iter() {
            for &(fact, multiplicity) in &maxpot.facts {
                lp.add_constraint(
                    vec![(fact, Maxpot::coef(multiplicity)), (maxpot.lp_var, -1.0)],
                    Sense::Le,
                    0.0,
                );
            }
        }

        if let Some(lb) = &self.lower_bound {
            let coefs = lb.vars.iter().map(|&v| (v, 1.0)).collect();
            lp.add_constraint(coefs, Sense::Ge, lb.rhs);
        }
        lp
    }

    /// Solves the current LP and writes the fact potentials to `weights`.
    ///
    /// Returns the optimal objective value. On failure `weights` is
    /// zeroed. The model itself is never modified.
    pub fn solve<S: LpSolver + ?Sized>(
        &self,
        solver: &S,
        use_ilp: bool,
        weights: &mut [f64],
    ) -> std::result::Result<f64, LpError> {
        if weights.len() != self.fact_count {
            return Err(LpError::InvalidProblem(format!(
                "weight buffer holds {} entries, model has {} facts",
                weights.len(),
                self.fact_count
            )));
        }
        match solver.solve(&self.build_lp(use_ilp)) {
            Ok(sol) => {
                weights.copy_from_slice(&sol.values[..self.fact_count]);
                Ok(sol.objective)
            }
            Err(e) => {
                weights.iter_mut().for_each(|w| *w = 0.0);
                Err(e)
            }
        }
    }

    /// CPLEX LP text of the current model.
    pub fn to_lp_string(&self, use_ilp: bool) -> String {
        self.build_lp(use_ilp).to_string()
    }
}

fn cancel_common(plus: &mut Vec<usize>, minus: &mut Vec<usize>) {
    let mut i = 0;
    while i < plus.len() {
        if let Some(j) = minus.iter().position(|&m| m == plus[i]) {
            minus.remove(j);
            plus.remove(i);
        } else {
            i += 1;
        }
    }
}
