//! Grounded finite-domain (FDR) planning tasks.
//!
//! A task is a set of multi-valued variables, an initial full assignment,
//! a partial goal assignment, and operators with preconditions and effects.
//! [`MgStripsTask`] gives the same task a fact-set view annotated with
//! mutex groups.

mod mg_strips;
mod operator;
mod partial_state;
mod vars;


pub use mg_strips::{MgStripsTask, MutexGroup, StripsOp};
pub use operator::{CondEff, FdrOperator};
pub use partial_state::{FdrFact, PartialState};
pub use vars::{FdrVar, FdrVars};

use crate::error::{PotForgeError, Result};
use crate::fact::{FactId, FactSet, VarId};

/// A grounded FDR planning task.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FdrTask {
    pub vars: FdrVars,
    pub ops: Vec<FdrOperator>,
    /// Initial value of every variable.
    pub init: Vec<usize>,
    pub goal: PartialState,
}

impl FdrTask {
    pub fn builder() -> FdrTaskBuilder {
        FdrTaskBuilder::default()
    }

    /// Returns true if any operator carries a conditional effect.
    pub fn has_cond_eff(&self) -> bool {
        self.ops.iter().any(FdrOperator::has_cond_eff)
    }

    pub fn fact_count(&self) -> usize {
        self.vars.fact_count()
    }

    /// Facts of a full state.
    pub fn state_facts<'a>(&'a self, state: &'a [usize]) -> impl Iterator<Item = FactId> + 'a {
        self.vars.state_facts(state)
    }

    pub fn state_fact_set(&self, state: &[usize]) -> FactSet {
        self.state_facts(state).collect()
    }

    pub fn init_facts(&self) -> FactSet {
        self.state_fact_set(&self.init)
    }

    pub fn is_goal(&self, state: &[usize]) -> bool {
        self.goal.is_consistent_with(state)
    }

    /// Looks up an operator by name.
    pub fn op_by_name(&self, name: &str) -> Option<(usize, &FdrOperator)> {
        self.ops.iter().enumerate().find(|(_, op)| op.name == name)
    }

    /// Mean operator cost, 0 for a task without operators.
    pub fn average_op_cost(&self) -> f64 {
        if self.ops.is_empty() {
            return 0.0;
        }
        let total: f64 = self.ops.iter().map(|op| f64::from(op.cost)).sum();
        total / self.ops.len() as f64
    }

    /// Checks that every assignment refers to an existing variable and value.
    pub fn validate(&self) -> Result<()> {
        if self.init.len() != self.vars.len() {
            return Err(PotForgeError::InvalidTask(format!(
                "initial state assigns {} variables, task has {}",
                self.init.len(),
                self.vars.len()
            )));
        }
        for (var, &val) in self.init.iter().enumerate() {
            self.check_value(var, val, "initial state")?;
        }
        self.check_partial(&self.goal, "goal")?;
        for op in &self.ops {
            self.check_partial(&op.pre, &op.name)?;
            self.check_partial(&op.eff, &op.name)?;
            for ce in &op.cond_eff {
                self.check_partial(&ce.pre, &op.name)?;
                self.check_partial(&ce.eff, &op.name)?;
            }
        }
        Ok(())
    }

    fn check_partial(&self, ps: &PartialState, ctx: &str) -> Result<()> {
        for f in ps.iter() {
            self.check_value(f.var, f.val, ctx)?;
        }
        Ok(())
    }

    fn check_value(&self, var: VarId, val: usize, ctx: &str) -> Result<()> {
        if var >= self.vars.len() {
            return Err(PotForgeError::InvalidTask(format!(
                "{}: unknown variable {}",
                ctx, var
            )));
        }
        if val >= self.vars.domain_size(var) {
            return Err(PotForgeError::InvalidTask(format!(
                "{}: value {} out of range for variable {} (domain size {})",
                ctx,
                val,
                var,
                self.vars.domain_size(var)
            )));
        }
        Ok(())
    }
}

/// Builder for [`FdrTask`].
///
/// # Example
///
/// ```
/// use potforge_core::{FdrOperator, FdrTask};
///
/// let task = FdrTask::builder()
///     .var("light", ["off", "on"])
///     .init([0])
///     .goal(0, 1)
///     .operator(FdrOperator::new("switch-on", 1).with_pre(0, 0).with_eff(0, 1))
///     .build()
///     .unwrap();
///
/// assert_eq!(task.fact_count(), 2);
/// assert!(!task.has_cond_eff());
/// ```
#[derive(Debug, Default)]
pub struct FdrTaskBuilder {
    vars: FdrVars,
    ops: Vec<FdrOperator>,
    init: Vec<usize>,
    goal: PartialState,
}

impl FdrTaskBuilder {
    pub fn var<I, S>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.vars.add_var(name, values);
        self
    }

    pub fn var_with_none_of_those<I, S>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.vars.add_var_with_none_of_those(name, values);
        self
    }

    pub fn init(mut self, state: impl IntoIterator<Item = usize>) -> Self {
        self.init = state.into_iter().collect();
        self
    }

    pub fn goal(mut self, var: VarId, val: usize) -> Self {
        self.goal.set(var, val);
        self
    }

    pub fn operator(mut self, op: FdrOperator) -> Self {
        self.ops.push(op);
        self
    }

    /// Validates and returns the task.
    pub fn build(self) -> Result<FdrTask> {
        let task = FdrTask {
            vars: self.vars,
            ops: self.ops,
            init: self.init,
            goal: self.goal,
        };
        task.validate()?;
        Ok(task)
    }
}
