//! Multi-valued variables and the (variable, value) to fact numbering.

use crate::fact::{FactId, VarId};

/// One multi-valued variable.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FdrVar {
    pub name: String,
    pub values: Vec<String>,
    /// Global fact id of each value, indexed by value.
    pub fact_ids: Vec<FactId>,
    /// Index of the synthetic "none of those" value, if the variable has one.
    pub none_of_those: Option<usize>,
}

impl FdrVar {
    pub fn domain_size(&self) -> usize {
        self.values.len()
    }
}

/// Ordered variables with a dense global fact numbering.
///
/// Facts are numbered variable by variable, value by value, so fact ids
/// form the contiguous range `0..fact_count()`.
///
/// # Example
///
/// ```
/// use potforge_core::FdrVars;
///
/// let mut vars = FdrVars::new();
/// let at = vars.add_var("at", ["a", "b", "c"]);
/// let holding = vars.add_var_with_none_of_those("holding", ["box"]);
///
/// assert_eq!(vars.fact_count(), 5);
/// assert_eq!(vars.fact_id(at, 2), 2);
/// assert_eq!(vars.fact_id(holding, 1), 4);
/// assert_eq!(vars.var_val(4), (holding, 1));
/// assert_eq!(vars.var(holding).none_of_those, Some(1));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FdrVars {
    vars: Vec<FdrVar>,
    fact_to_var_val: Vec<(VarId, usize)>,
}

impl FdrVars {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates anonymous variables with the given domain sizes.
    pub fn from_domain_sizes(sizes: &[usize]) -> Self {
        let mut vars = Self::new();
        for (i, &size) in sizes.iter().enumerate() {
            vars.add_var(format!("var{}", i), (0..size).map(|v| format!("val{}", v)));
        }
        vars
    }

    /// Appends a variable and returns its id.
    pub fn add_var<I, S>(&mut self, name: impl Into<String>, values: I) -> VarId
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let var = self.vars.len();
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        let first = self.fact_to_var_val.len();
        let fact_ids = (first..first + values.len()).collect();
        for val in 0..values.len() {
            self.fact_to_var_val.push((var, val));
        }
        self.vars.push(FdrVar {
            name: name.into(),
            values,
            fact_ids,
            none_of_those: None,
        });
        var
    }

    /// Appends a variable whose last value is a synthetic "none of those".
    pub fn add_var_with_none_of_those<I, S>(&mut self, name: impl Into<String>, values: I) -> VarId
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let mut values: Vec<String> = values.into_iter().map(Into::into).collect();
        values.push(format!("<none of {}>", name));
        let none = values.len() - 1;
        let var = self.add_var(name, values);
        self.vars[var].none_of_those = Some(none);
        var
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn fact_count(&self) -> usize {
        self.fact_to_var_val.len()
    }

    pub fn var(&self, var: VarId) -> &FdrVar {
        &self.vars[var]
    }

    pub fn iter(&self) -> impl Iterator<Item = &FdrVar> {
        self.vars.iter()
    }

    pub fn domain_size(&self, var: VarId) -> usize {
        self.vars[var].domain_size()
    }

    /// Global fact id of `var = val`.
    pub fn fact_id(&self, var: VarId, val: usize) -> FactId {
        self.vars[var].fact_ids[val]
    }

    /// Checked version of [`fact_id`](Self::fact_id).
    pub fn try_fact_id(&self, var: VarId, val: usize) -> Option<FactId> {
        self.vars
            .get(var)
            .and_then(|v| v.fact_ids.get(val))
            .copied()
    }

    /// Inverse of [`fact_id`](Self::fact_id).
    pub fn var_val(&self, fact: FactId) -> (VarId, usize) {
        self.fact_to_var_val[fact]
    }

    /// Facts of a full-value assignment, in variable order.
    pub fn state_facts<'a>(&'a self, state: &'a [usize]) -> impl Iterator<Item = FactId> + 'a {
        state
            .iter()
            .enumerate()
            .map(move |(var, &val)| self.fact_id(var, val))
    }
}
