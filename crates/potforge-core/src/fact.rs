//! Fact identifiers and sorted fact sets.

use std::fmt;

/// Global fact identifier. Doubles as an LP column in fact-indexed models.
pub type FactId = usize;

/// Multi-valued variable identifier.
pub type VarId = usize;

/// Sorted, duplicate-free set of facts.
///
/// Ordering and hashing are structural, so a `FactSet` can key a map
/// (state deduplication, maxpot keys).
///
/// # Example
///
/// ```
/// use potforge_core::FactSet;
///
/// let a: FactSet = [4, 1, 4, 2].into_iter().collect();
/// assert_eq!(a.as_slice(), &[1, 2, 4]);
///
/// let b = FactSet::from_sorted(vec![2, 3]);
/// assert_eq!(a.union(&b).as_slice(), &[1, 2, 3, 4]);
/// assert_eq!(a.intersection(&b).as_slice(), &[2]);
/// assert_eq!(a.difference(&b).as_slice(), &[1, 4]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FactSet(Vec<FactId>);

impl FactSet {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn singleton(fact: FactId) -> Self {
        Self(vec![fact])
    }

    /// Wraps an already sorted vector, normalizing it if the caller lied.
    pub fn from_sorted(mut facts: Vec<FactId>) -> Self {
        if !facts.windows(2).all(|w| w[0] < w[1]) {
            facts.sort_unstable();
            facts.dedup();
        }
        Self(facts)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, fact: FactId) -> bool {
        self.0.binary_search(&fact).is_ok()
    }

    /// Inserts `fact`, returning `true` if it was not present.
    pub fn insert(&mut self, fact: FactId) -> bool {
        match self.0.binary_search(&fact) {
            Ok(_) => false,
            Err(pos) => {
                self.0.insert(pos, fact);
                true
            }
        }
    }

    /// Removes `fact`, returning `true` if it was present.
    pub fn remove(&mut self, fact: FactId) -> bool {
        match self.0.binary_search(&fact) {
            Ok(pos) => {
                self.0.remove(pos);
                true
            }
            Err(_) => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = FactId> + '_ {
        self.0.iter().copied()
    }

    pub fn as_slice(&self) -> &[FactId] {
        &self.0
    }

    pub fn union(&self, other: &FactSet) -> FactSet {
        let mut out = Vec::with_capacity(self.len() + other.len());
        let (mut i, mut j) = (0, 0);
        while i < self.0.len() && j < other.0.len() {
            let (a, b) = (self.0[i], other.0[j]);
            if a < b {
                out.push(a);
                i += 1;
            } else if b < a {
                out.push(b);
                j += 1;
            } else {
                out.push(a);
                i += 1;
                j += 1;
            }
        }
        out.extend_from_slice(&self.0[i..]);
        out.extend_from_slice(&other.0[j..]);
        FactSet(out)
    }

    pub fn intersection(&self, other: &FactSet) -> FactSet {
        FactSet(self.iter().filter(|&f| other.contains(f)).collect())
    }

    pub fn difference(&self, other: &FactSet) -> FactSet {
        FactSet(self.iter().filter(|&f| !other.contains(f)).collect())
    }

    pub fn is_disjoint(&self, other: &FactSet) -> bool {
        !self.iter().any(|f| other.contains(f))
    }

    pub fn is_subset(&self, other: &FactSet) -> bool {
        self.iter().all(|f| other.contains(f))
    }
}

impl FromIterator<FactId> for FactSet {
    fn from_iter<I: IntoIterator<Item = FactId>>(iter: I) -> Self {
        let mut facts: Vec<FactId> = iter.into_iter().collect();
        facts.sort_unstable();
        facts.dedup();
        FactSet(facts)
    }
}

impl Extend<FactId> for FactSet {
    fn extend<I: IntoIterator<Item = FactId>>(&mut self, iter: I) {
        self.0.extend(iter);
        self.0.sort_unstable();
        self.0.dedup();
    }
}

impl<'a> IntoIterator for &'a FactSet {
    type Item = FactId;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, FactId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().copied()
    }
}

impl fmt::Display for FactSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, fact) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", fact)?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
#[path = "fact_tests.rs"]
mod tests;
