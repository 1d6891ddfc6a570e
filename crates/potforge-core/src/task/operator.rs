//! Grounded finite-domain operators.

use crate::fact::VarId;
use crate::task::PartialState;

/// Conditional effect branch: `eff` applies when `pre` holds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CondEff {
    pub pre: PartialState,
    pub eff: PartialState,
}

/// A grounded operator.
///
/// # Example
///
/// ```
/// use potforge_core::FdrOperator;
///
/// let op = FdrOperator::new("move-a-b", 2)
///     .with_pre(0, 0)
///     .with_eff(0, 1);
///
/// assert!(op.is_applicable(&[0, 3]));
/// assert_eq!(op.apply_on_state(&[0, 3]), vec![1, 3]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FdrOperator {
    pub name: String,
    pub cost: u32,
    pub pre: PartialState,
    pub eff: PartialState,
    pub cond_eff: Vec<CondEff>,
}

impl FdrOperator {
    pub fn new(name: impl Into<String>, cost: u32) -> Self {
        Self {
            name: name.into(),
            cost,
            ..Self::default()
        }
    }

    pub fn with_pre(mut self, var: VarId, val: usize) -> Self {
        self.pre.set(var, val);
        self
    }

    pub fn with_eff(mut self, var: VarId, val: usize) -> Self {
        self.eff.set(var, val);
        self
    }

    pub fn with_cond_eff(mut self, cond_eff: CondEff) -> Self {
        self.cond_eff.push(cond_eff);
        self
    }

    pub fn has_cond_eff(&self) -> bool {
        !self.cond_eff.is_empty()
    }

    pub fn is_applicable(&self, state: &[usize]) -> bool {
        self.pre.is_consistent_with(state)
    }

    /// Successor of `state`. Conditional effects fire on the source state.
    pub fn apply_on_state(&self, state: &[usize]) -> Vec<usize> {
        let mut next = state.to_vec();
        self.eff.apply_on(&mut next);
        for ce in &self.cond_eff {
            if ce.pre.is_consistent_with(state) {
                ce.eff.apply_on(&mut next);
            }
        }
        next
    }
}
