use thiserror::Error;

#[cfg(doc)]
use crate::Solver;

/// Errors related to adding constraints to the [`Solver`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstraintOperationError {
    /// Error which indicates that a constraint was attempted to be added while the [`Solver`] was
    /// in an infeasible state.
    #[error("Adding constraint failed because the solver is in an infeasible state")]
    InfeasibleState,
    /// Error which indicate that adding a propagator led to infeasibility at the root.
    #[error("Adding the constraint failed because it is infeasible at the root")]
    InfeasiblePropagator,
    /// The constraint inside a reification has no negation which can be propagated.
    #[error("The constraint {0} cannot be reified")]
    UnsupportedReification(&'static str),
    /// The arguments of the constraint do not describe a well-formed constraint.
    #[error("Malformed {constraint} constraint: {reason}")]
    MalformedConstraint {
        constraint: &'static str,
        reason: String,
    },
}
