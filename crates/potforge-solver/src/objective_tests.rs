//! Tests for mutex-count objectives.

use super::*;
use potforge_core::MutexPairs;

// a = {0, 1}, b = {2, 3, 4}
fn groups() -> Vec<MutexGroup> {
    vec![
        MutexGroup {
            facts: [0, 1].into_iter().collect(),
            exactly_one: true,
        },
        MutexGroup {
            facts: [2, 3, 4].into_iter().collect(),
            exactly_one: true,
        },
    ]
}

fn assert_coefs(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len());
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!((a - e).abs() < 1e-9, "coef {}: {} != {}", i, a, e);
    }
}

#[test]
fn test_count_states() {
    let mgroups = groups();
    let sets: Vec<FactSet> = mgroups.iter().map(|g| g.facts.clone()).collect();
    let mut mutex = MutexPairs::from_mgroups(5, &mgroups);
    mutex.add(1, 4);

    assert_eq!(count_states_mutex(&sets, &mutex, &FactSet::new()), 6.0);
    assert_eq!(count_states_mutex(&sets, &mutex, &FactSet::singleton(0)), 3.0);
    assert_eq!(count_states_mutex(&sets, &mutex, &FactSet::singleton(1)), 2.0);
    let pair: FactSet = [1, 4].into_iter().collect();
    assert_eq!(count_states_mutex(&sets, &mutex, &pair), 0.0);
}

#[test]
fn test_size_one_sums_to_one_per_group() {
    let mgroups = groups();
    let mutex = MutexPairs::from_mgroups(5, &mgroups);
    let coef = all_states_mutex(&mgroups, &mutex, 1, None)
        .unwrap()
        .unwrap();

    let third = 1.0 / 3.0;
    assert_coefs(&coef, &[0.5, 0.5, third, third, third]);
    assert!((coef[0] + coef[1] - 1.0).abs() < 1e-9);
    assert!((coef[2] + coef[3] + coef[4] - 1.0).abs() < 1e-9);
}

#[test]
fn test_size_one_with_mutex() {
    let mgroups = groups();
    let mut mutex = MutexPairs::from_mgroups(5, &mgroups);
    mutex.add(1, 4);
    let coef = all_states_mutex(&mgroups, &mutex, 1, None)
        .unwrap()
        .unwrap();
    assert_coefs(&coef, &[0.6, 0.4, 0.4, 0.4, 0.2]);
}

#[test]
fn test_size_two() {
    let mgroups = groups();
    let mutex = MutexPairs::from_mgroups(5, &mgroups);
    let coef = all_states_mutex(&mgroups, &mutex, 2, None)
        .unwrap()
        .unwrap();
    let third = 1.0 / 3.0;
    assert_coefs(&coef, &[0.5, 0.5, third, third, third]);
}

#[test]
fn test_conditioned_restricts_groups() {
    let mgroups = groups();
    let mut mutex = MutexPairs::from_mgroups(5, &mgroups);
    mutex.add(1, 4);

    let cond = FactSet::singleton(4);
    let coef = all_states_mutex(&mgroups, &mutex, 1, Some(&cond))
        .unwrap()
        .unwrap();
    assert_coefs(&coef, &[1.0, 0.0, 0.0, 0.0, 1.0]);
}

#[test]
fn test_conditioning_on_mutex_pair_is_skipped() {
    let mgroups = groups();
    let mut mutex = MutexPairs::from_mgroups(5, &mgroups);
    mutex.add(1, 4);

    let cond: FactSet = [1, 4].into_iter().collect();
    assert_eq!(all_states_mutex(&mgroups, &mutex, 2, Some(&cond)).unwrap(), None);
}

#[test]
fn test_tiny_coefficients_are_zeroed() {
    let mgroups = vec![MutexGroup {
        facts: [0, 1].into_iter().collect(),
        exactly_one: true,
    }];
    // fact 1 is unreachable, so no state holds it
    let mut mutex = MutexPairs::from_mgroups(2, &mgroups);
    mutex.add(1, 1);
    let coef = all_states_mutex(&mgroups, &mutex, 1, None)
        .unwrap()
        .unwrap();
    assert_coefs(&coef, &[1.0, 0.0]);
}

#[test]
fn test_unsupported_size() {
    let mgroups = groups();
    let mutex = MutexPairs::from_mgroups(5, &mgroups);
    assert!(matches!(
        all_states_mutex(&mgroups, &mutex, 3, None),
        Err(PotForgeError::UnsupportedMutexSize(3))
    ));
    assert!(matches!(
        all_states_mutex(&mgroups, &mutex, 0, None),
        Err(PotForgeError::UnsupportedMutexSize(0))
    ));
}
