#[cfg(doc)]
use crate::branching::value_selection::ValueSelector;
#[cfg(doc)]
use crate::branching::variable_selection::VariableSelector;
use crate::branching::SelectionContext;
use crate::predicates::Predicate;
use crate::variables::DomainId;
use crate::basic_types::Solution;

/// A trait for defining a branching strategy (oftentimes utilising a [`VariableSelector`] and a
/// [`ValueSelector`]).
///
/// Implementations of this trait control which part of the search space the solver explores.
/// It is required that the resulting decision creates a smaller domain for at least 1 of the
/// variables; a decision which is already satisfied or falsified is replaced by the solver.
pub trait Brancher {
    /// Returns the next decision concerning a single variable and value, or [`None`] if all
    /// variables under consideration are fixed.
    ///
    /// Note that this method **cannot** perform the assignment of the decision; the
    /// [`SelectionContext`] is only mutable to account for the usage of random generators.
    fn next_decision(&mut self, context: &mut SelectionContext) -> Option<Predicate>;

    /// Called after propagation failed; `scope` holds the variables of the failing propagator.
    fn on_conflict(&mut self, _scope: &[DomainId]) {}

    /// Called after every propagation with the variables whose domains were narrowed.
    fn on_domains_narrowed(&mut self, _variables: &[DomainId]) {}

    /// This method is called whenever a restart is performed.
    fn on_restart(&mut self) {}

    /// This method is called when a solution is found.
    fn on_solution(&mut self, _solution: &Solution) {}
}

impl<B: Brancher + ?Sized> Brancher for Box<B> {
    fn next_decision(&mut self, context: &mut SelectionContext) -> Option<Predicate> {
        (**self).next_decision(context)
    }

    fn on_conflict(&mut self, scope: &[DomainId]) {
        (**self).on_conflict(scope)
    }

    fn on_domains_narrowed(&mut self, variables: &[DomainId]) {
        (**self).on_domains_narrowed(variables)
    }

    fn on_restart(&mut self) {
        (**self).on_restart()
    }

    fn on_solution(&mut self, solution: &Solution) {
        (**self).on_solution(solution)
    }
}
