use super::ValueSelector;
use crate::branching::SelectionContext;
use crate::predicate;
use crate::predicates::Predicate;
use crate::variables::DomainId;

/// [`ValueSelector`] which chooses to assign the provided variable to its lowest-bound.
#[derive(Debug, Copy, Clone)]
pub struct InDomainMin;

impl ValueSelector<DomainId> for InDomainMin {
    fn select_value(
        &mut self,
        context: &mut SelectionContext,
        decision_variable: DomainId,
    ) -> Predicate {
        predicate!(decision_variable == context.lower_bound(decision_variable))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branching::selection_context::tests::create_assignments;
    use crate::branching::selection_context::tests::create_rng;

    #[test]
    fn test_returns_correct_literal() {
        let (assignments, variables) = create_assignments(&[(0, 10)]);
        let mut rng = create_rng();
        let mut context = SelectionContext::new(&assignments, &mut rng);
        let x = variables[0];

        let mut selector = InDomainMin;

        let selected_predicate = selector.select_value(&mut context, x);
        assert_eq!(selected_predicate, predicate!(x == 0))
    }
}
