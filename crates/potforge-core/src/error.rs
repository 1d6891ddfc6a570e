//! Error types for PotForge

use thiserror::Error;

/// Main error type for PotForge operations
#[derive(Debug, Error)]
pub enum PotForgeError {
    /// Input uses a feature the synthesis engine does not handle
    #[error("Not supported: {0}")]
    Unsupported(String),

    /// Malformed planning task
    #[error("Invalid task: {0}")]
    InvalidTask(String),

    /// Error in heuristic configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Mutex-conditioned objectives only handle sets of one or two facts
    #[error("Mutex conditioning size {0} is not supported (expected 1 or 2)")]
    UnsupportedMutexSize(usize),

    /// The goal (or a required fact set) is provably unreachable
    #[error("Unreachable")]
    Unreachable,

    /// No potential function could be computed
    #[error("No solution: {0}")]
    NoSolution(String),

    /// Sampling gave up after the configured number of attempts
    #[error("Sampling failed after {attempts} attempts")]
    SampleLimit { attempts: usize },

    /// Invalid argument passed to an operation
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Malformed potentials artifact
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for PotForge operations
pub type Result<T> = std::result::Result<T, PotForgeError>;
