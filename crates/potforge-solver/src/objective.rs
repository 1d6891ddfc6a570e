//! Objectives weighting facts by the number of mutex-consistent states
//! that contain them.

use potforge_core::{FactSet, MutexGroup, MutexOracle, PotForgeError, Result};

const ZERO_COEF: f64 = 1e-6;

/// Number of states consistent with `fixed`.
///
/// With nothing fixed this is the product of the group sizes; otherwise
/// each group contributes the number of its facts compatible with
/// `fixed`. Zero if `fixed` is itself a mutex.
pub fn count_states_mutex<M: MutexOracle + ?Sized>(
    groups: &[FactSet],
    mutex: &M,
    fixed: &FactSet,
) -> f64 {
    if mutex.is_mutex_set(fixed) {
        return 0.0;
    }
    if fixed.is_empty() {
        return groups.iter().map(|g| g.len() as f64).product();
    }
    groups
        .iter()
        .map(|g| {
            g.iter()
                .filter(|&f| !mutex.is_mutex_with_set(f, fixed))
                .count() as f64
        })
        .product()
}

/// Objective coefficients over all mutex-consistent states.
///
/// Each fact is weighted by the number of states containing it
/// (`mutex_size == 1`) or by the number of states containing it together
/// with each other fact (`mutex_size == 2`), normalized per group. With
/// a condition, groups are first restricted to facts compatible with it.
///
/// Returns `Ok(None)` if the condition leaves some group empty.
///
/// # Errors
///
/// Returns [`PotForgeError::UnsupportedMutexSize`] for sizes other than
/// 1 and 2.
pub fn all_states_mutex<M: MutexOracle + ?Sized>(
    mgroups: &[MutexGroup],
    mutex: &M,
    mutex_size: usize,
    cond: Option<&FactSet>,
) -> Result<Option<Vec<f64>>> {
    if !(1..=2).contains(&mutex_size) {
        return Err(PotForgeError::UnsupportedMutexSize(mutex_size));
    }

    let mut groups = Vec::with_capacity(mgroups.len());
    for group in mgroups {
        let facts: FactSet = match cond {
            Some(cond) => group
                .facts
                .iter()
                .filter(|&f| !mutex.is_mutex_with_set(f, cond))
                .collect(),
            None => group.facts.clone(),
        };
        if facts.is_empty() {
            return Ok(None);
        }
        groups.push(facts);
    }

    let fact_count = mutex.fact_count();
    let mut coef = vec![0.0; fact_count];
    for group in &groups {
        let mut sum = 0.0;
        for fact in group.iter() {
            coef[fact] = if mutex_size == 1 {
                count_states_mutex(&groups, mutex, &FactSet::singleton(fact))
            } else {
                (0..fact_count)
                    .filter(|&other| other != fact)
                    .map(|other| {
                        let fixed: FactSet = [fact, other].into_iter().collect();
                        count_states_mutex(&groups, mutex, &fixed)
                    })
                    .sum()
            };
            sum += coef[fact];
        }

        for fact in group.iter() {
            let c = if sum > 0.0 { coef[fact] / sum } else { 0.0 };
            coef[fact] = if c < ZERO_COEF { 0.0 } else { c };
        }
    }
    Ok(Some(coef))
}

#[cfg(test)]
#[path = "objective_tests.rs"]
mod tests;
