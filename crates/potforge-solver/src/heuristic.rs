//! Potential functions and their max-and-round evaluation.

use potforge_config::EvaluatorConfig;
use potforge_core::{FactId, FdrVars};

/// Estimate reported for states the ensemble proves to be dead ends.
pub const DEAD_END: i32 = i32::MAX;

/// One weight per fact.
#[derive(Debug, Clone, PartialEq)]
pub struct PotentialFunction {
    weights: Vec<f64>,
}

impl PotentialFunction {
    pub fn new(weights: Vec<f64>) -> Self {
        Self { weights }
    }

    pub fn zeros(fact_count: usize) -> Self {
        Self::new(vec![0.0; fact_count])
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn fact_count(&self) -> usize {
        self.weights.len()
    }

    pub fn weight(&self, fact: FactId) -> f64 {
        self.weights[fact]
    }

    /// Potential of a state given by its facts.
    pub fn sum(&self, facts: &[FactId]) -> f64 {
        facts.iter().map(|&f| self.weights[f]).sum()
    }
}

/// Turns raw potential sums into integer estimates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluator {
    pub dead_end_threshold: f64,
    pub round_eps: f64,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::from(&EvaluatorConfig::default())
    }
}

impl From<&EvaluatorConfig> for Evaluator {
    fn from(config: &EvaluatorConfig) -> Self {
        Self {
            dead_end_threshold: config.dead_end_threshold,
            round_eps: config.round_eps,
        }
    }
}

impl Evaluator {
    /// Negative sums count as zero.
    pub fn clamp(&self, sum: f64) -> f64 {
        sum.max(0.0)
    }

    /// `ceil(sum − eps)` of the clamped sum, or [`DEAD_END`] above the
    /// threshold.
    pub fn round(&self, sum: f64) -> i32 {
        if sum > self.dead_end_threshold {
            return DEAD_END;
        }
        let value = (self.clamp(sum) - self.round_eps).ceil();
        // threshold may exceed i32 range when configured very high
        if value >= f64::from(i32::MAX) {
            DEAD_END
        } else {
            value.max(0.0) as i32
        }
    }

    /// Rounded estimate of a single function.
    pub fn function_estimate(&self, function: &PotentialFunction, facts: &[FactId]) -> i32 {
        self.round(function.sum(facts))
    }
}

/// Ensemble of potential functions evaluated by their pointwise maximum.
///
/// # Example
///
/// ```
/// use potforge_solver::{PotentialFunction, PotentialHeuristic};
///
/// let mut heur = PotentialHeuristic::new();
/// heur.add(PotentialFunction::new(vec![1.2, 0.0, -0.5]));
/// heur.add(PotentialFunction::new(vec![0.0, 2.0, 0.0]));
///
/// assert_eq!(heur.estimate_facts(&[0, 2]), Some(1));
/// assert_eq!(heur.estimate_facts(&[1, 2]), Some(2));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PotentialHeuristic {
    functions: Vec<PotentialFunction>,
    evaluator: Evaluator,
}

impl PotentialHeuristic {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_evaluator(mut self, evaluator: Evaluator) -> Self {
        self.evaluator = evaluator;
        self
    }

    pub fn add(&mut self, function: PotentialFunction) {
        self.functions.push(function);
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    pub fn functions(&self) -> &[PotentialFunction] {
        &self.functions
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    fn max_sum(&self, facts: &[FactId]) -> Option<f64> {
        self.functions
            .iter()
            .map(|f| f.sum(facts))
            .reduce(f64::max)
    }

    /// Integer estimate of the state made of `facts`; `None` for an empty
    /// ensemble.
    pub fn estimate_facts(&self, facts: &[FactId]) -> Option<i32> {
        self.max_sum(facts).map(|sum| self.evaluator.round(sum))
    }

    /// Integer estimate of a full FDR state.
    pub fn estimate_fdr_state(&self, vars: &FdrVars, state: &[usize]) -> Option<i32> {
        let facts: Vec<FactId> = vars.state_facts(state).collect();
        self.estimate_facts(&facts)
    }

    /// Clamped maximum sum, infinite for dead ends.
    pub fn estimate_dbl_facts(&self, facts: &[FactId]) -> Option<f64> {
        self.max_sum(facts).map(|sum| {
            if sum > self.evaluator.dead_end_threshold {
                f64::INFINITY
            } else {
                self.evaluator.clamp(sum)
            }
        })
    }
}

#[cfg(test)]
#[path = "heuristic_tests.rs"]
mod tests;
