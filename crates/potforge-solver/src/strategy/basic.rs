//! Single-solve objectives over the initial state and all syntactic
//! states.

use potforge_core::Result;
use potforge_lp::LpSolver;
use tracing::info;

use super::Strategy;
use crate::scope::GenerationScope;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateObjective {
    Init,
    AllStates,
    /// Init first, then AllStates; both functions are kept.
    MaxInitAllStates,
}

#[derive(Debug, Clone)]
pub struct StateStrategy {
    objective: StateObjective,
}

impl StateStrategy {
    pub fn new(objective: StateObjective) -> Self {
        Self { objective }
    }

    fn solve_init<S: LpSolver + ?Sized>(scope: &mut GenerationScope<'_, S>) {
        let solved = scope.solve_init().map(|f| scope.add_function(f)).is_some();
        info!(event = "objective_solved", objective = "init", solved = solved);
    }

    fn solve_all_states<S: LpSolver + ?Sized>(scope: &mut GenerationScope<'_, S>) {
        let task = scope.task();
        scope.model_mut().set_obj_all_syntactic_states(&task.vars);
        let solved = scope.solve().map(|f| scope.add_function(f)).is_some();
        info!(event = "objective_solved", objective = "all_states", solved = solved);
    }
}

impl<S: LpSolver + ?Sized> Strategy<S> for StateStrategy {
    fn run(&mut self, scope: &mut GenerationScope<'_, S>) -> Result<()> {
        match self.objective {
            StateObjective::Init => Self::solve_init(scope),
            StateObjective::AllStates => Self::solve_all_states(scope),
            StateObjective::MaxInitAllStates => {
                Self::solve_init(scope);
                Self::solve_all_states(scope);
            }
        }
        Ok(())
    }

    fn strategy_type_name(&self) -> &'static str {
        "StateStrategy"
    }
}
