pub(crate) mod constraint_satisfaction_solver;
pub(crate) mod cp;
pub(crate) mod predicates;
pub(crate) mod propagation;
mod restart_strategy;
pub(crate) mod solver_statistics;
mod state;
pub(crate) mod termination;
#[cfg(test)]
pub(crate) mod test_solver;
mod variable_names;
pub(crate) mod variables;

pub(crate) use constraint_satisfaction_solver::ConstraintSatisfactionSolver;
pub use constraint_satisfaction_solver::SearchBudget;
pub use constraint_satisfaction_solver::SolverOptions;
pub(crate) use cp::Assignments;
pub(crate) use cp::DomainEvents;
pub use restart_strategy::RestartOptions;
pub(crate) use restart_strategy::RestartStrategy;
pub(crate) use state::Conflict;
pub(crate) use state::State;
pub(crate) use variable_names::VariableNames;
