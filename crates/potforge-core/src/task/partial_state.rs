//! Sparse variable assignments.

use std::cmp::Ordering;

use smallvec::SmallVec;

use crate::fact::{FactSet, VarId};
use crate::task::FdrVars;

/// A single `var = val` assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FdrFact {
    pub var: VarId,
    pub val: usize,
}

/// Partial assignment kept sorted by variable, at most one value per variable.
///
/// Used for preconditions, effects and goals.
///
/// # Example
///
/// ```
/// use potforge_core::PartialState;
///
/// let mut ps = PartialState::new();
/// ps.set(3, 1);
/// ps.set(0, 2);
/// ps.set(3, 0);
///
/// assert_eq!(ps.len(), 2);
/// assert_eq!(ps.get(3), Some(0));
/// assert!(!ps.is_set(1));
/// assert!(ps.is_consistent_with(&[2, 5, 5, 0]));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PartialState {
    facts: SmallVec<[FdrFact; 4]>,
}

impl PartialState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a partial state from `(var, val)` pairs. Later pairs win.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (VarId, usize)>) -> Self {
        let mut ps = Self::new();
        for (var, val) in pairs {
            ps.set(var, val);
        }
        ps
    }

    /// Assigns `var = val`, replacing any previous value of `var`.
    pub fn set(&mut self, var: VarId, val: usize) {
        match self.facts.binary_search_by_key(&var, |f| f.var) {
            Ok(pos) => self.facts[pos].val = val,
            Err(pos) => self.facts.insert(pos, FdrFact { var, val }),
        }
    }

    pub fn unset(&mut self, var: VarId) {
        if let Ok(pos) = self.facts.binary_search_by_key(&var, |f| f.var) {
            self.facts.remove(pos);
        }
    }

    pub fn get(&self, var: VarId) -> Option<usize> {
        self.facts
            .binary_search_by_key(&var, |f| f.var)
            .ok()
            .map(|pos| self.facts[pos].val)
    }

    pub fn is_set(&self, var: VarId) -> bool {
        self.get(var).is_some()
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = FdrFact> + '_ {
        self.facts.iter().copied()
    }

    /// Every assignment holds in the full state `state`.
    pub fn is_consistent_with(&self, state: &[usize]) -> bool {
        self.facts.iter().all(|f| state.get(f.var) == Some(&f.val))
    }

    /// Overwrites the assigned variables of `state`.
    pub fn apply_on(&self, state: &mut [usize]) {
        for f in &self.facts {
            state[f.var] = f.val;
        }
    }

    /// Global fact ids of the assignments.
    pub fn fact_set(&self, vars: &FdrVars) -> FactSet {
        self.facts
            .iter()
            .map(|f| vars.fact_id(f.var, f.val))
            .collect()
    }

    /// Compares the shape of two partial states: size first, then the
    /// sorted variable ids. Values are ignored.
    pub fn cmp_by_vars(&self, other: &PartialState) -> Ordering {
        match self.len().cmp(&other.len()) {
            Ordering::Equal => {
                let mine = self.facts.iter().map(|f| f.var);
                mine.cmp(other.facts.iter().map(|f| f.var))
            }
            ord => ord,
        }
    }
}
