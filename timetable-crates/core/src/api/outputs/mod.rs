use crate::basic_types::Solution;
#[cfg(doc)]
use crate::termination::TerminationCondition;
#[cfg(doc)]
use crate::Solver;

/// The result of a call to [`Solver::satisfy`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SatisfactionResult {
    /// Indicates that a solution was found; every variable of the [`Solver`] is assigned.
    Solved(Solution),
    /// Indicates that there is no solution to the satisfaction problem.
    Infeasible,
    /// Indicates that it is not known whether a solution exists, because a
    /// [`TerminationCondition`] triggered or the search budget ran out.
    SearchExhausted,
}

impl SatisfactionResult {
    /// The solution, if one was found.
    pub fn solution(&self) -> Option<&Solution> {
        match self {
            SatisfactionResult::Solved(solution) => Some(solution),
            SatisfactionResult::Infeasible | SatisfactionResult::SearchExhausted => None,
        }
    }
}
