//! Fact-set view of an FDR task annotated with mutex groups.

use crate::error::{PotForgeError, Result};
use crate::fact::FactSet;
use crate::task::FdrTask;

/// A set of facts of which at most one holds in any reachable state.
/// With `exactly_one`, exactly one holds.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MutexGroup {
    pub facts: FactSet,
    pub exactly_one: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StripsOp {
    pub name: String,
    pub cost: u32,
    pub pre: FactSet,
    pub add_eff: FactSet,
}

/// STRIPS task over the FDR fact numbering.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MgStripsTask {
    pub fact_count: usize,
    pub ops: Vec<StripsOp>,
    pub init: FactSet,
    pub goal: FactSet,
    pub mgroups: Vec<MutexGroup>,
}

impl MgStripsTask {
    /// Converts an FDR task; every variable becomes an exactly-one group.
    ///
    /// # Errors
    ///
    /// Conditional effects have no counterpart here and are rejected.
    pub fn from_fdr(task: &FdrTask) -> Result<Self> {
        if task.has_cond_eff() {
            return Err(PotForgeError::Unsupported(
                "conditional effects".to_string(),
            ));
        }

        let ops = task
            .ops
            .iter()
            .map(|op| StripsOp {
                name: op.name.clone(),
                cost: op.cost,
                pre: op.pre.fact_set(&task.vars),
                add_eff: op.eff.fact_set(&task.vars),
            })
            .collect();

        let mgroups = task
            .vars
            .iter()
            .map(|var| MutexGroup {
                facts: var.fact_ids.iter().copied().collect(),
                exactly_one: true,
            })
            .collect();

        Ok(Self {
            fact_count: task.fact_count(),
            ops,
            init: task.init_facts(),
            goal: task.goal.fact_set(&task.vars),
            mgroups,
        })
    }
}
