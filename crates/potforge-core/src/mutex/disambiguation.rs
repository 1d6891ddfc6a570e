//! Disambiguation of partial fact sets with exactly-one mutex groups.
//!
//! A partial state such as an operator precondition leaves some groups
//! unconstrained. Disambiguation returns, for each group of interest,
//! the facts of that group that can still hold together with the input
//! set. A singleton result pins the group; an empty one proves the input
//! unreachable.

use std::collections::HashSet;

use crate::error::{PotForgeError, Result};
use crate::fact::FactSet;
use crate::mutex::MutexOracle;
use crate::task::MutexGroup;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DisambiguationStrength {
    /// Filter each group against the input set once.
    SingleFact,
    /// Extend the input with facts forced by singleton groups until fixpoint.
    #[default]
    Full,
}

/// Source of disambiguated fact sets.
pub trait DisambiguationOracle {
    /// Disambiguates `set`.
    ///
    /// Only groups intersecting `cover` are reported; all groups when
    /// `cover` is `None`. The result holds no duplicates and keeps the
    /// order in which sets were first produced.
    ///
    /// # Errors
    ///
    /// Returns [`PotForgeError::Unreachable`] if `set` cannot hold in any
    /// reachable state.
    fn disambiguate(
        &self,
        set: &FactSet,
        cover: Option<&FactSet>,
        strength: DisambiguationStrength,
    ) -> Result<Vec<FactSet>>;
}

/// Disambiguation over exactly-one groups and a mutex oracle.
pub struct Disambiguation<'a, M: MutexOracle> {
    mgroups: Vec<&'a MutexGroup>,
    mutex: &'a M,
}

impl<'a, M: MutexOracle> Disambiguation<'a, M> {
    /// Groups that are not exactly-one carry no disambiguation power and
    /// are ignored.
    pub fn new(mgroups: &'a [MutexGroup], mutex: &'a M) -> Self {
        Self {
            mgroups: mgroups.iter().filter(|g| g.exactly_one).collect(),
            mutex,
        }
    }

    /// Reachable members of `group` compatible with `set`.
    fn candidates(&self, group: &MutexGroup, set: &FactSet) -> FactSet {
        group
            .facts
            .iter()
            .filter(|&f| !self.mutex.is_mutex(f, f) && !self.mutex.is_mutex_with_set(f, set))
            .collect()
    }

    fn extend_to_fixpoint(&self, set: &mut FactSet) -> Result<()> {
        let mut changed = true;
        while changed {
            changed = false;
            for group in &self.mgroups {
                let cands = self.candidates(group, set);
                if cands.is_empty() {
                    return Err(PotForgeError::Unreachable);
                }
                if cands.len() == 1 && set.insert(cands.as_slice()[0]) {
                    if self.mutex.is_mutex_set(set) {
                        return Err(PotForgeError::Unreachable);
                    }
                    changed = true;
                }
            }
        }
        Ok(())
    }
}

impl<M: MutexOracle> DisambiguationOracle for Disambiguation<'_, M> {
    fn disambiguate(
        &self,
        set: &FactSet,
        cover: Option<&FactSet>,
        strength: DisambiguationStrength,
    ) -> Result<Vec<FactSet>> {
        if self.mutex.is_mutex_set(set) {
            return Err(PotForgeError::Unreachable);
        }

        let mut set = set.clone();
        if strength == DisambiguationStrength::Full {
            self.extend_to_fixpoint(&mut set)?;
        }

        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for group in &self.mgroups {
            if let Some(cover) = cover {
                if group.facts.is_disjoint(cover) {
                    continue;
                }
            }

            let fixed = group.facts.intersection(&set);
            let result = if fixed.is_empty() {
                let cands = self.candidates(group, &set);
                if cands.is_empty() {
                    return Err(PotForgeError::Unreachable);
                }
                cands
            } else {
                fixed
            };

            if seen.insert(result.clone()) {
                out.push(result);
            }
        }
        Ok(out)
    }
}
