use crate::branching::SelectionContext;
use crate::predicates::Predicate;

/// A trait containing the interface for [`ValueSelector`]s, specifying the method required for
/// selecting a value for a given variable.
pub trait ValueSelector<Var> {
    /// Determines which value in the domain of `decision_variable` to branch next on.
    /// The domain of the `decision_variable` variable should have at least 2 values in it (as it
    /// otherwise should not have been selected as `decision_variable`). Returns a [`Predicate`]
    /// specifying the required change in the domain.
    fn select_value(&mut self, context: &mut SelectionContext, decision_variable: Var)
        -> Predicate;
}
