//! Deduplicated auxiliary variables bounding disjunctions of facts.

use std::collections::HashMap;

use potforge_core::FactId;

/// Canonical maxpot key: facts sorted by id, each with its multiplicity.
pub type MaxpotKey = Vec<(FactId, u32)>;

/// An auxiliary LP variable `m` with `coef(f)·x_f <= m` for every member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maxpot {
    pub lp_var: usize,
    pub facts: MaxpotKey,
}

impl Maxpot {
    /// Coefficient of a member with the given multiplicity.
    pub fn coef(multiplicity: u32) -> f64 {
        if multiplicity <= 1 {
            1.0
        } else {
            1.0 / f64::from(multiplicity)
        }
    }
}

/// Maxpot registry. Identical keys share one LP variable; variables are
/// numbered after the facts in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct MaxpotTable {
    first_var: usize,
    index: HashMap<MaxpotKey, usize>,
    entries: Vec<Maxpot>,
}

impl MaxpotTable {
    /// Creates an empty table whose first variable is `first_var`.
    pub fn new(first_var: usize) -> Self {
        Self {
            first_var,
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    /// Returns the LP variable of `key`, allocating one on first sight.
    ///
    /// The key is canonicalized (sorted by fact id) before lookup.
    pub fn register(&mut self, mut key: MaxpotKey) -> usize {
        key.sort_unstable();
        if let Some(&entry) = self.index.get(&key) {
            return self.entries[entry].lp_var;
        }
        let lp_var = self.first_var + self.entries.len();
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push(Maxpot { lp_var, facts: key });
        lp_var
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Maxpot> {
        self.entries.iter()
    }
}
