//! Mutex reasoning over facts.
//!
//! [`MutexOracle`] is the query interface the potential models use.
//! [`MutexPairs`] is a dense pair table that can be seeded from mutex
//! groups or computed with an h²-style reachability analysis.

mod disambiguation;
mod h2;

#[cfg(test)]
mod tests;

pub use disambiguation::{Disambiguation, DisambiguationOracle, DisambiguationStrength};

use crate::fact::{FactId, FactSet};
use crate::task::MutexGroup;

/// Answers whether facts can hold together in a reachable state.
///
/// A fact that is mutex with itself is unreachable.
pub trait MutexOracle {
    /// Number of facts the oracle knows about.
    fn fact_count(&self) -> usize;

    fn is_mutex(&self, a: FactId, b: FactId) -> bool;

    /// `fact` is mutex with at least one member of `set`.
    fn is_mutex_with_set(&self, fact: FactId, set: &FactSet) -> bool {
        set.iter().any(|g| self.is_mutex(fact, g))
    }

    /// Some pair of (not necessarily distinct) members of `set` is mutex.
    fn is_mutex_set(&self, set: &FactSet) -> bool {
        let facts = set.as_slice();
        for (i, &a) in facts.iter().enumerate() {
            for &b in &facts[i..] {
                if self.is_mutex(a, b) {
                    return true;
                }
            }
        }
        false
    }
}

/// Symmetric table of mutex fact pairs.
///
/// # Example
///
/// ```
/// use potforge_core::{FactSet, MutexOracle, MutexPairs};
///
/// let mut mutex = MutexPairs::new(4);
/// mutex.add(0, 1);
///
/// assert!(mutex.is_mutex(1, 0));
/// assert!(!mutex.is_mutex(0, 2));
/// assert!(mutex.is_mutex_set(&[0, 1, 3].into_iter().collect::<FactSet>()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutexPairs {
    fact_count: usize,
    table: Vec<bool>,
}

impl MutexPairs {
    /// Creates a table with no mutexes.
    pub fn new(fact_count: usize) -> Self {
        Self {
            fact_count,
            table: vec![false; fact_count * fact_count],
        }
    }

    /// All distinct members of each group are pairwise mutex.
    pub fn from_mgroups(fact_count: usize, mgroups: &[MutexGroup]) -> Self {
        let mut mutex = Self::new(fact_count);
        for group in mgroups {
            let facts = group.facts.as_slice();
            for (i, &a) in facts.iter().enumerate() {
                for &b in &facts[i + 1..] {
                    mutex.add(a, b);
                }
            }
        }
        mutex
    }

    /// Marks `a` and `b` as mutex. `add(f, f)` marks `f` unreachable.
    pub fn add(&mut self, a: FactId, b: FactId) {
        self.table[a * self.fact_count + b] = true;
        self.table[b * self.fact_count + a] = true;
    }

    /// Merges the mutexes of `other` into `self`.
    pub fn union_with(&mut self, other: &MutexPairs) {
        debug_assert_eq!(self.fact_count, other.fact_count);
        for (mine, &theirs) in self.table.iter_mut().zip(&other.table) {
            *mine |= theirs;
        }
    }

    /// Number of unordered mutex pairs, self-mutexes included.
    pub fn num_pairs(&self) -> usize {
        let mut count = 0;
        for a in 0..self.fact_count {
            for b in a..self.fact_count {
                if self.table[a * self.fact_count + b] {
                    count += 1;
                }
            }
        }
        count
    }
}

impl MutexOracle for MutexPairs {
    fn fact_count(&self) -> usize {
        self.fact_count
    }

    fn is_mutex(&self, a: FactId, b: FactId) -> bool {
        self.table[a * self.fact_count + b]
    }
}
