use crate::branching::SelectionContext;
use crate::variables::DomainId;

/// A trait containing the interface for [`VariableSelector`]s,
/// specifying the appropriate hooks into the solver and the methods required for selecting
/// variables.
pub trait VariableSelector<Var> {
    /// Determines which variable to select next if there are any left to branch on.
    /// Should only return [`None`] when all variables which have been passed to the
    /// [`VariableSelector`] have been assigned. Otherwise it should return the variable to
    /// branch on next.
    fn select_variable(&mut self, context: &mut SelectionContext) -> Option<Var>;

    /// A function which is called after a conflict has been found, with the variables of the
    /// propagator which failed.
    fn on_conflict(&mut self, _scope: &[DomainId]) {}

    /// A function which is called after propagation with the variables whose domains were
    /// narrowed.
    fn on_domains_narrowed(&mut self, _variables: &[DomainId]) {}
}

impl<Var> VariableSelector<Var> for Box<dyn VariableSelector<Var>> {
    fn select_variable(&mut self, context: &mut SelectionContext) -> Option<Var> {
        self.as_mut().select_variable(context)
    }

    fn on_conflict(&mut self, scope: &[DomainId]) {
        self.as_mut().on_conflict(scope)
    }

    fn on_domains_narrowed(&mut self, variables: &[DomainId]) {
        self.as_mut().on_domains_narrowed(variables)
    }
}
