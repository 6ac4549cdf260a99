use std::marker::PhantomData;

use crate::branching::value_selection::ValueSelector;
use crate::branching::variable_selection::VariableSelector;
use crate::branching::Brancher;
use crate::branching::SelectionContext;
use crate::predicates::Predicate;
use crate::variables::DomainId;

/// An implementation of a [`Brancher`] which simply uses a single
/// [`VariableSelector`] and a single [`ValueSelector`] independently of one another.
#[derive(Debug)]
pub struct IndependentVariableValueBrancher<Var, VariableSelect, ValueSelect> {
    /// The [`VariableSelector`] of the [`Brancher`], determines which (unfixed) variable to branch
    /// next on.
    variable_selector: VariableSelect,
    /// The [`ValueSelector`] of the [`Brancher`] determines which value in the domain to branch
    /// next on given a variable.
    value_selector: ValueSelect,
    /// [`PhantomData`] to ensure that the variable type is bound to the
    /// [`IndependentVariableValueBrancher`]
    variable_type: PhantomData<Var>,
}

impl<Var, VariableSelect, ValueSelect>
    IndependentVariableValueBrancher<Var, VariableSelect, ValueSelect>
where
    VariableSelect: VariableSelector<Var>,
    ValueSelect: ValueSelector<Var>,
{
    pub fn new(var_selector: VariableSelect, val_selector: ValueSelect) -> Self {
        IndependentVariableValueBrancher {
            variable_selector: var_selector,
            value_selector: val_selector,
            variable_type: PhantomData,
        }
    }
}

impl<Var, VariableSelect, ValueSelect> Brancher
    for IndependentVariableValueBrancher<Var, VariableSelect, ValueSelect>
where
    VariableSelect: VariableSelector<Var>,
    ValueSelect: ValueSelector<Var>,
{
    /// First we select a variable
    ///  - If all variables under consideration are fixed (i.e. `select_variable` return None) then
    ///    we simply return None
    ///  - Otherwise we select a value and return the corresponding predicate
    fn next_decision(&mut self, context: &mut SelectionContext) -> Option<Predicate> {
        self.variable_selector
            .select_variable(context)
            .map(|selected_variable| {
                // We have selected a variable, select a value for the variable
                self.value_selector.select_value(context, selected_variable)
            })
    }

    fn on_conflict(&mut self, scope: &[DomainId]) {
        self.variable_selector.on_conflict(scope)
    }

    fn on_domains_narrowed(&mut self, variables: &[DomainId]) {
        self.variable_selector.on_domains_narrowed(variables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branching::selection_context::tests::create_assignments;
    use crate::branching::selection_context::tests::create_rng;
    use crate::branching::value_selection::InDomainMin;
    use crate::branching::variable_selection::InputOrder;
    use crate::predicate;

    #[test]
    fn decides_on_the_minimum_of_the_first_unfixed_variable() {
        let (assignments, variables) = create_assignments(&[(3, 3), (4, 8), (0, 2)]);
        let mut rng = create_rng();
        let mut context = SelectionContext::new(&assignments, &mut rng);

        let mut brancher =
            IndependentVariableValueBrancher::new(InputOrder::new(&variables), InDomainMin);

        let x = variables[1];
        assert_eq!(Some(predicate!(x == 4)), brancher.next_decision(&mut context));
    }

    #[test]
    fn no_decision_when_everything_is_fixed() {
        let (assignments, variables) = create_assignments(&[(3, 3), (1, 1)]);
        let mut rng = create_rng();
        let mut context = SelectionContext::new(&assignments, &mut rng);

        let mut brancher =
            IndependentVariableValueBrancher::new(InputOrder::new(&variables), InDomainMin);

        assert_eq!(None, brancher.next_decision(&mut context));
    }
}
