//! Tests for mutex pairs and disambiguation.

use super::*;
use crate::task::{CondEff, FdrOperator, FdrTask};

fn set(facts: &[usize]) -> FactSet {
    facts.iter().copied().collect()
}

// x and y always flip together; z never changes.
// Facts: x0=0 x1=1 y0=2 y1=3 z0=4 z1=5
fn coupled_task() -> FdrTask {
    FdrTask::builder()
        .var("x", ["0", "1"])
        .var("y", ["0", "1"])
        .var("z", ["0", "1"])
        .init([0, 0, 0])
        .goal(0, 1)
        .operator(
            FdrOperator::new("flip", 1)
                .with_pre(0, 0)
                .with_eff(0, 1)
                .with_eff(1, 1),
        )
        .build()
        .unwrap()
}

fn var_groups(sizes: &[usize]) -> Vec<MutexGroup> {
    let mut next = 0;
    sizes
        .iter()
        .map(|&size| {
            let facts = (next..next + size).collect();
            next += size;
            MutexGroup {
                facts,
                exactly_one: true,
            }
        })
        .collect()
}

#[test]
fn test_from_mgroups() {
    let mutex = MutexPairs::from_mgroups(5, &var_groups(&[2, 3]));
    assert!(mutex.is_mutex(0, 1));
    assert!(mutex.is_mutex(2, 4));
    assert!(!mutex.is_mutex(0, 2));
    assert!(!mutex.is_mutex(3, 3));
    assert_eq!(mutex.num_pairs(), 4);
}

#[test]
fn test_mutex_set_includes_self_pairs() {
    let mut mutex = MutexPairs::new(3);
    mutex.add(2, 2);
    assert!(mutex.is_mutex_set(&set(&[0, 2])));
    assert!(!mutex.is_mutex_set(&set(&[0, 1])));
    assert!(mutex.is_mutex_with_set(2, &set(&[2])));
}

#[test]
fn test_h2_finds_coupled_values() {
    let task = coupled_task();
    let mutex = MutexPairs::h2(&task).unwrap();

    assert!(mutex.is_mutex(0, 1));
    assert!(mutex.is_mutex(1, 2));
    assert!(mutex.is_mutex(0, 3));
    assert!(!mutex.is_mutex(0, 2));
    assert!(!mutex.is_mutex(1, 3));
    assert!(!mutex.is_mutex(1, 4));
    // z1 is never reached
    assert!(mutex.is_mutex(5, 5));
    assert!(!mutex.is_mutex(4, 4));
}

#[test]
fn test_h2_keeps_persisting_facts() {
    let task = coupled_task();
    let mutex = MutexPairs::h2(&task).unwrap();
    // z0 holds before and after flip
    assert!(!mutex.is_mutex(3, 4));
}

#[test]
fn test_h2_rejects_conditional_effects() {
    let mut task = coupled_task();
    task.ops[0].cond_eff.push(CondEff::default());
    assert!(matches!(
        MutexPairs::h2(&task),
        Err(crate::PotForgeError::Unsupported(_))
    ));
}

#[test]
fn test_union_with() {
    let mut a = MutexPairs::new(3);
    a.add(0, 1);
    let mut b = MutexPairs::new(3);
    b.add(1, 2);
    a.union_with(&b);
    assert!(a.is_mutex(0, 1));
    assert!(a.is_mutex(2, 1));
}

#[test]
fn test_disambiguate_pins_groups() {
    let task = coupled_task();
    let mutex = MutexPairs::h2(&task).unwrap();
    let groups = var_groups(&[2, 2, 2]);
    let dis = Disambiguation::new(&groups, &mutex);

    let out = dis
        .disambiguate(&set(&[1]), None, DisambiguationStrength::Full)
        .unwrap();
    assert_eq!(out, vec![set(&[1]), set(&[3]), set(&[4])]);
}

#[test]
fn test_disambiguate_cover_limits_groups() {
    let mutex = MutexPairs::from_mgroups(6, &var_groups(&[2, 2, 2]));
    let groups = var_groups(&[2, 2, 2]);
    let dis = Disambiguation::new(&groups, &mutex);

    let out = dis
        .disambiguate(&set(&[0]), Some(&set(&[3])), DisambiguationStrength::Full)
        .unwrap();
    assert_eq!(out, vec![set(&[2, 3])]);
}

#[test]
fn test_disambiguate_unreachable() {
    let task = coupled_task();
    let mutex = MutexPairs::h2(&task).unwrap();
    let groups = var_groups(&[2, 2, 2]);
    let dis = Disambiguation::new(&groups, &mutex);

    assert!(matches!(
        dis.disambiguate(&set(&[1, 2]), None, DisambiguationStrength::SingleFact),
        Err(crate::PotForgeError::Unreachable)
    ));
    assert!(matches!(
        dis.disambiguate(&set(&[5]), None, DisambiguationStrength::Full),
        Err(crate::PotForgeError::Unreachable)
    ));
}

#[test]
fn test_full_strength_propagates_chains() {
    // x1 forces y1, and y1 rules out z0
    let groups = var_groups(&[2, 2, 2]);
    let mut mutex = MutexPairs::from_mgroups(6, &groups);
    mutex.add(1, 2);
    mutex.add(3, 4);
    let dis = Disambiguation::new(&groups, &mutex);
    let cover = set(&[4]);

    let weak = dis
        .disambiguate(&set(&[1]), Some(&cover), DisambiguationStrength::SingleFact)
        .unwrap();
    assert_eq!(weak, vec![set(&[4, 5])]);

    let full = dis
        .disambiguate(&set(&[1]), Some(&cover), DisambiguationStrength::Full)
        .unwrap();
    assert_eq!(full, vec![set(&[5])]);
}

#[test]
fn test_non_exactly_one_groups_are_ignored() {
    let mut groups = var_groups(&[2, 2]);
    groups[1].exactly_one = false;
    let mutex = MutexPairs::from_mgroups(4, &groups);
    let dis = Disambiguation::new(&groups, &mutex);
    let out = dis
        .disambiguate(&FactSet::new(), None, DisambiguationStrength::Full)
        .unwrap();
    assert_eq!(out, vec![set(&[0, 1])]);
}
