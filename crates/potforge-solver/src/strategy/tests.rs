//! Tests for objective strategies.

use super::*;
use potforge_config::{SamplerType, SamplesConfig};
use potforge_core::{FdrTask, MgStripsTask, MutexPairs};
use potforge_lp::MicroLpSolver;
use potforge_test::{groups_task, line_task, switch_task, two_states_task, unsolvable_task};

use crate::heuristic::PotentialHeuristic;
use crate::model::PotentialModel;

fn run_strategy(
    task: &FdrTask,
    config: &HeuristicConfig,
    strategy: &mut dyn Strategy<MicroLpSolver>,
) -> PotentialHeuristic {
    let solver = MicroLpSolver::new();
    let model = PotentialModel::from_fdr(task).unwrap();
    let mut scope = GenerationScope::new(task, config, &solver, model);
    strategy.run(&mut scope).unwrap();
    scope.into_heuristic()
}

fn run_mutex_strategy(task: &FdrTask, strategy: &mut MutexStrategy) -> PotentialHeuristic {
    let config = HeuristicConfig::default();
    let solver = MicroLpSolver::new();
    let strips = MgStripsTask::from_fdr(task).unwrap();
    let mutex = MutexPairs::from_mgroups(strips.fact_count, &strips.mgroups);
    let model = PotentialModel::from_fdr(task).unwrap();
    let mut scope =
        GenerationScope::new(task, &config, &solver, model).with_mutexes(&strips.mgroups, &mutex);
    strategy.run(&mut scope).unwrap();
    scope.into_heuristic()
}

#[test]
fn test_init_strategy() {
    let task = switch_task();
    let config = HeuristicConfig::default();
    let mut strategy = StateStrategy::new(StateObjective::Init);
    let heur = run_strategy(&task, &config, &mut strategy);
    assert_eq!(heur.len(), 1);
    assert_eq!(heur.estimate_fdr_state(&task.vars, &task.init), Some(1));
}

#[test]
fn test_max_init_all_states_keeps_both() {
    let task = line_task();
    let config = HeuristicConfig::default();
    let mut strategy = StateStrategy::new(StateObjective::MaxInitAllStates);
    let heur = run_strategy(&task, &config, &mut strategy);
    assert_eq!(heur.len(), 2);
}

#[test]
fn test_samples_max_skips_nothing_on_solvable_task() {
    let task = groups_task();
    let config = HeuristicConfig::default();
    let mut strategy =
        SamplesStrategy::new(SamplesConfig::new(8, SamplerType::Syntactic), SampleAggregate::Max);
    let heur = run_strategy(&task, &config, &mut strategy);
    assert_eq!(heur.len(), 8);
}

#[test]
fn test_samples_sum_single_function() {
    let task = line_task();
    let config = HeuristicConfig::default();
    let mut strategy = SamplesStrategy::new(
        SamplesConfig::new(20, SamplerType::RandomWalk),
        SampleAggregate::Sum,
    );
    let heur = run_strategy(&task, &config, &mut strategy);
    assert_eq!(heur.len(), 1);
}

#[test]
fn test_samples_mutex_sampler_requires_mutexes() {
    let task = groups_task();
    let config = HeuristicConfig::default();
    let solver = MicroLpSolver::new();
    let model = PotentialModel::from_fdr(&task).unwrap();
    let mut scope = GenerationScope::new(&task, &config, &solver, model);
    let mut strategy = SamplesStrategy::new(
        SamplesConfig::new(3, SamplerType::SyntacticMutex),
        SampleAggregate::Max,
    );
    assert!(Strategy::<MicroLpSolver>::run(&mut strategy, &mut scope).is_err());
}

#[test]
fn test_all_states_mutex() {
    let task = groups_task();
    let mut strategy = MutexStrategy::new(1, Conditioning::None);
    let heur = run_mutex_strategy(&task, &mut strategy);
    assert_eq!(heur.len(), 1);
}

#[test]
fn test_conditioned_on_each_fact() {
    let task = groups_task();
    let mut strategy = MutexStrategy::new(1, Conditioning::EachFact);
    let heur = run_mutex_strategy(&task, &mut strategy);
    assert_eq!(heur.len(), task.fact_count());
}

#[test]
fn test_conditioned_random() {
    let task = groups_task();
    let mut facts = MutexStrategy::new(2, Conditioning::RandomFacts(4));
    let heur = run_mutex_strategy(&task, &mut facts);
    assert!(!heur.is_empty() && heur.len() <= 4);

    let mut pairs = MutexStrategy::new(1, Conditioning::RandomPairs(6));
    let heur = run_mutex_strategy(&task, &mut pairs);
    assert!(heur.len() <= 6);
}

#[test]
fn test_diverse_covers_two_states() {
    let task = two_states_task();
    let config = HeuristicConfig::default();
    let solver = MicroLpSolver::new();
    let model = PotentialModel::from_fdr(&task).unwrap();
    let mut scope = GenerationScope::new(&task, &config, &solver, model);

    let mut strategy = DiverseStrategy::new(5, config.diverse_seed);
    let states = vec![vec![0], vec![1], vec![0], vec![1], vec![1]];
    strategy.cover_states(&mut scope, states).unwrap();

    let stats = strategy.stats();
    assert_eq!(stats.states, 2);
    assert_eq!(stats.duplicates, 3);
    assert_eq!(stats.dead_ends, 0);

    let heur = scope.into_heuristic();
    assert!(!heur.is_empty() && heur.len() <= 2);
    assert_eq!(heur.estimate_fdr_state(&task.vars, &[0]), Some(1));
    assert_eq!(heur.estimate_fdr_state(&task.vars, &[1]), Some(0));
}

#[test]
fn test_diverse_skips_dead_ends() {
    let task = unsolvable_task();
    let config = HeuristicConfig::default();
    let mut strategy = DiverseStrategy::new(4, config.diverse_seed);
    let heur = run_strategy(&task, &config, &mut strategy);

    assert!(heur.is_empty());
    let stats = strategy.stats();
    assert_eq!(stats.states, 0);
    assert_eq!(stats.dead_ends, 4);
    assert_eq!(stats.duplicates, 0);
}

#[test]
fn test_diverse_is_deterministic() {
    let task = line_task();
    let config = HeuristicConfig::default();
    let run = || {
        let mut strategy = DiverseStrategy::new(10, config.diverse_seed);
        run_strategy(&task, &config, &mut strategy)
    };
    let first = run();
    assert!(!first.is_empty() && first.len() <= 10);
    assert_eq!(first, run());
}

#[test]
fn test_strategy_for_objective() {
    let config = HeuristicConfig::default();
    let strategy = strategy_for::<MicroLpSolver>(&config);
    assert_eq!(strategy.strategy_type_name(), "StateStrategy");

    let config = config.with_objective(ObjectiveConfig::Diverse(potforge_config::DiverseConfig {
        num_samples: 3,
    }));
    let strategy = strategy_for::<MicroLpSolver>(&config);
    assert_eq!(strategy.strategy_type_name(), "DiverseStrategy");
}
