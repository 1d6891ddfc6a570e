//! Tests for state sampling.

use super::*;
use potforge_test::{groups_task, line_task};

#[test]
fn test_syntactic_states_within_domains() {
    let task = groups_task();
    let mut sampler = StateSampler::new(&task, SamplerType::Syntactic, 7, None).unwrap();
    for _ in 0..50 {
        let state = sampler.next_state().unwrap();
        assert_eq!(state.len(), 2);
        assert!(state[0] < 2);
        assert!(state[1] < 3);
    }
}

#[test]
fn test_mutex_sampler_avoids_mutex_states() {
    let task = groups_task();
    let mut mutex = MutexPairs::new(task.fact_count());
    // a1 with b2
    mutex.add(1, 4);
    let mut sampler =
        StateSampler::new(&task, SamplerType::SyntacticMutex, 7, Some(&mutex)).unwrap();
    for _ in 0..50 {
        let state = sampler.next_state().unwrap();
        assert_ne!(state, vec![1, 2]);
    }
}

#[test]
fn test_mutex_sampler_requires_mutexes() {
    let task = groups_task();
    assert!(matches!(
        StateSampler::new(&task, SamplerType::SyntacticMutex, 7, None),
        Err(PotForgeError::Config(_))
    ));
}

#[test]
fn test_mutex_sampler_gives_up() {
    let task = groups_task();
    let mut mutex = MutexPairs::new(task.fact_count());
    mutex.add(0, 0);
    mutex.add(1, 1);
    let mut sampler = StateSampler::new(&task, SamplerType::SyntacticMutex, 7, Some(&mutex))
        .unwrap()
        .with_max_attempts(20);
    assert!(matches!(
        sampler.next_state(),
        Err(PotForgeError::SampleLimit { attempts: 20 })
    ));
}

#[test]
fn test_random_walk_without_steps_returns_init() {
    let task = line_task();
    let mut sampler = StateSampler::new(&task, SamplerType::RandomWalk, 7, None).unwrap();
    assert_eq!(sampler.max_steps(), 0);
    assert_eq!(sampler.next_state().unwrap(), task.init);
}

#[test]
fn test_random_walk_reaches_states() {
    let task = line_task();
    let mut sampler = StateSampler::new(&task, SamplerType::RandomWalk, 7, None)
        .unwrap()
        .with_max_steps(20);
    let states: Vec<Vec<usize>> = (0..30).map(|_| sampler.next_state().unwrap()).collect();
    assert!(states.iter().any(|s| *s != task.init));
    for state in &states {
        assert!(state[0] < 4);
        assert!(state[1] < 5);
    }
}

#[test]
fn test_same_seed_same_samples() {
    let task = groups_task();
    let draw = |seed| {
        let mut sampler = StateSampler::new(&task, SamplerType::Syntactic, seed, None).unwrap();
        (0..10)
            .map(|_| sampler.next_state().unwrap())
            .collect::<Vec<_>>()
    };
    assert_eq!(draw(524287), draw(524287));
}
