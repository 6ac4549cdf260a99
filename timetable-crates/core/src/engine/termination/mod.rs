//! A [`TerminationCondition`] is a condition which is polled by the solver between decisions.
//! It indicates when the solver should stop, even if no definitive conclusions have been made;
//! the search then ends with [`crate::results::SatisfactionResult::SearchExhausted`].

pub(crate) mod combinator;
pub(crate) mod indefinite;
pub(crate) mod time_budget;

/// The central trait that defines a termination condition. A termination condition determines when
/// the solver should give up searching for solutions.
pub trait TerminationCondition {
    /// Returns `true` when the solver should stop, `false` otherwise.
    fn should_stop(&mut self) -> bool;

    /// Called by the solver after every decision.
    fn decision_has_been_made(&mut self) {}
}

impl<T: TerminationCondition> TerminationCondition for Option<T> {
    fn should_stop(&mut self) -> bool {
        match self {
            Some(t) => t.should_stop(),
            None => false,
        }
    }

    fn decision_has_been_made(&mut self) {
        if let Some(t) = self {
            t.decision_has_been_made()
        }
    }
}
