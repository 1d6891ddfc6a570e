//! Configuration system for PotForge.
//!
//! Load heuristic synthesis settings from TOML or YAML to pick the
//! objective strategy, the encoding and the sampling seeds without code
//! changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use potforge_config::{HeuristicConfig, ObjectiveConfig};
//!
//! let config = HeuristicConfig::from_toml_str(r#"
//!     disambiguation = "single_fact"
//!     add_init_constr = false
//!
//!     [objective]
//!     type = "diverse"
//!     num_samples = 500
//! "#).unwrap();
//!
//! assert!(!config.add_init_constr);
//! assert!(matches!(config.objective, ObjectiveConfig::Diverse(ref d) if d.num_samples == 500));
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use potforge_config::HeuristicConfig;
//!
//! let config = HeuristicConfig::load("potentials.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::path::Path;

use potforge_core::{DisambiguationStrength, PotForgeError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default seed of state samplers and random conditioning.
pub const DEFAULT_SAMPLER_SEED: u64 = 524287;

/// Default seed of the diverse ensemble builder.
pub const DEFAULT_DIVERSE_SEED: u64 = 131071;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Mutex conditioning size {0} is not supported (expected 1 or 2)")]
    UnsupportedMutexSize(usize),
}

impl From<ConfigError> for PotForgeError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::UnsupportedMutexSize(size) => PotForgeError::UnsupportedMutexSize(size),
            ConfigError::Io(e) => PotForgeError::Io(e),
            other => PotForgeError::Config(other.to_string()),
        }
    }
}

/// Main heuristic synthesis configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct HeuristicConfig {
    /// Encoding of the potential model.
    pub disambiguation: DisambiguationMode,

    /// Objective strategy.
    pub objective: ObjectiveConfig,

    /// Pin later objectives to the best initial-state value first.
    pub add_init_constr: bool,

    /// Fraction of the best initial-state value the pin enforces.
    pub init_constr_coef: f64,

    /// Solve the potential LPs with integral variables.
    pub use_ilp: bool,

    /// Strengthen mutexes with h² reachability.
    pub h2: bool,

    /// Seed of state samplers and random conditioning.
    pub sampler_seed: u64,

    /// Seed of the diverse ensemble builder.
    pub diverse_seed: u64,

    /// Attempts the mutex-filtered sampler makes per state.
    pub max_sample_attempts: usize,

    /// Evaluation of the resulting ensemble.
    pub evaluator: EvaluatorConfig,
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        Self {
            disambiguation: DisambiguationMode::default(),
            objective: ObjectiveConfig::default(),
            add_init_constr: true,
            init_constr_coef: 1.0,
            use_ilp: false,
            h2: true,
            sampler_seed: DEFAULT_SAMPLER_SEED,
            diverse_seed: DEFAULT_DIVERSE_SEED,
            max_sample_attempts: 1_000_000,
            evaluator: EvaluatorConfig::default(),
        }
    }
}

impl HeuristicConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn with_objective(mut self, objective: ObjectiveConfig) -> Self {
        self.objective = objective;
        self
    }

    pub fn with_disambiguation(mut self, mode: DisambiguationMode) -> Self {
        self.disambiguation = mode;
        self
    }

    /// Enables the initial-state pin with the given coefficient.
    pub fn with_init_constr(mut self, coef: f64) -> Self {
        self.add_init_constr = true;
        self.init_constr_coef = coef;
        self
    }

    pub fn without_init_constr(mut self) -> Self {
        self.add_init_constr = false;
        self
    }

    pub fn with_ilp(mut self, use_ilp: bool) -> Self {
        self.use_ilp = use_ilp;
        self
    }

    pub fn with_h2(mut self, h2: bool) -> Self {
        self.h2 = h2;
        self
    }

    pub fn with_sampler_seed(mut self, seed: u64) -> Self {
        self.sampler_seed = seed;
        self
    }

    pub fn with_diverse_seed(mut self, seed: u64) -> Self {
        self.diverse_seed = seed;
        self
    }

    /// Checks strategy parameters before any model is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.objective.validate()?;
        if !self.init_constr_coef.is_finite() || self.init_constr_coef < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "init_constr_coef must be a non-negative number, got {}",
                self.init_constr_coef
            )));
        }
        if self.max_sample_attempts == 0 {
            return Err(ConfigError::Invalid(
                "max_sample_attempts must be positive".to_string(),
            ));
        }
        self.evaluator.validate()
    }

    /// Whether the objective or the encoding needs mutex pairs.
    pub fn needs_mutexes(&self) -> bool {
        self.disambiguation != DisambiguationMode::None || self.objective.needs_mutexes()
    }
}

/// Encoding of the potential model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DisambiguationMode {
    /// Fact-indexed model built directly from the FDR task.
    None,

    /// Mutex-group model, one filtering pass per fact set.
    SingleFact,

    /// Mutex-group model with fixpoint disambiguation.
    #[default]
    Full,
}

impl DisambiguationMode {
    /// Strength passed to the disambiguation oracle, `None` for the
    /// direct encoding.
    pub fn strength(self) -> Option<DisambiguationStrength> {
        match self {
            DisambiguationMode::None => None,
            DisambiguationMode::SingleFact => Some(DisambiguationStrength::SingleFact),
            DisambiguationMode::Full => Some(DisambiguationStrength::Full),
        }
    }
}

/// Objective strategy.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ObjectiveConfig {
    /// Optimize for the initial state.
    Init,

    /// Optimize the average over all syntactic states.
    #[default]
    AllStates,

    /// Init and AllStates functions together.
    MaxInitAllStates,

    /// One function optimizing the sum over sampled states.
    SamplesSum(SamplesConfig),

    /// One function per sampled state.
    SamplesMax(SamplesConfig),

    /// Average over mutex-consistent states.
    AllStatesMutex(MutexObjectiveConfig),

    /// One mutex-consistent average per conditioning fact.
    AllStatesMutexConditioned(MutexObjectiveConfig),

    /// Mutex-consistent averages conditioned on random facts.
    AllStatesMutexConditionedRand(MutexSamplesConfig),

    /// Mutex-consistent averages conditioned on random fact pairs.
    AllStatesMutexConditionedRand2(MutexSamplesConfig),

    /// Greedy ensemble covering sampled states.
    Diverse(DiverseConfig),
}

impl ObjectiveConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            ObjectiveConfig::Init
            | ObjectiveConfig::AllStates
            | ObjectiveConfig::MaxInitAllStates => Ok(()),
            ObjectiveConfig::SamplesSum(c) | ObjectiveConfig::SamplesMax(c) => {
                check_samples(c.num_samples)
            }
            ObjectiveConfig::AllStatesMutex(c) | ObjectiveConfig::AllStatesMutexConditioned(c) => {
                check_mutex_size(c.mutex_size)
            }
            ObjectiveConfig::AllStatesMutexConditionedRand(c)
            | ObjectiveConfig::AllStatesMutexConditionedRand2(c) => {
                check_mutex_size(c.mutex_size)?;
                check_samples(c.num_samples)
            }
            ObjectiveConfig::Diverse(c) => check_samples(c.num_samples),
        }
    }

    pub fn needs_mutexes(&self) -> bool {
        match self {
            ObjectiveConfig::SamplesSum(c) | ObjectiveConfig::SamplesMax(c) => {
                c.sampler == SamplerType::SyntacticMutex
            }
            ObjectiveConfig::AllStatesMutex(_)
            | ObjectiveConfig::AllStatesMutexConditioned(_)
            | ObjectiveConfig::AllStatesMutexConditionedRand(_)
            | ObjectiveConfig::AllStatesMutexConditionedRand2(_) => true,
            _ => false,
        }
    }
}

fn check_mutex_size(size: usize) -> Result<(), ConfigError> {
    if (1..=2).contains(&size) {
        Ok(())
    } else {
        Err(ConfigError::UnsupportedMutexSize(size))
    }
}

fn check_samples(num_samples: usize) -> Result<(), ConfigError> {
    if num_samples == 0 {
        return Err(ConfigError::Invalid(
            "num_samples must be positive".to_string(),
        ));
    }
    Ok(())
}

/// Sampled-state objective configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SamplesConfig {
    pub num_samples: usize,

    #[serde(default)]
    pub sampler: SamplerType,
}

impl SamplesConfig {
    pub fn new(num_samples: usize, sampler: SamplerType) -> Self {
        Self {
            num_samples,
            sampler,
        }
    }
}

/// State sampling method.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplerType {
    /// Uniform value per variable.
    Syntactic,

    /// Uniform values, redrawn until no pair is mutex.
    SyntacticMutex,

    /// Random walk from the initial state.
    #[default]
    RandomWalk,
}

/// Mutex-count objective configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MutexObjectiveConfig {
    pub mutex_size: usize,
}

/// Randomly conditioned mutex-count objective configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MutexSamplesConfig {
    pub mutex_size: usize,
    pub num_samples: usize,
}

/// Diverse ensemble configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct DiverseConfig {
    pub num_samples: usize,
}

/// Rounding of ensemble values into integer estimates.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct EvaluatorConfig {
    /// Sums above this are reported as dead ends.
    pub dead_end_threshold: f64,

    /// Subtracted before rounding up.
    pub round_eps: f64,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            dead_end_threshold: 1e8,
            round_eps: 0.001,
        }
    }
}

impl EvaluatorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dead_end_threshold.is_nan() || self.dead_end_threshold <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "dead_end_threshold must be positive, got {}",
                self.dead_end_threshold
            )));
        }
        if !(0.0..1.0).contains(&self.round_eps) {
            return Err(ConfigError::Invalid(format!(
                "round_eps must lie in [0, 1), got {}",
                self.round_eps
            )));
        }
        Ok(())
    }
}
