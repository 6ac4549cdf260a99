use log::warn;

use crate::branching::tie_breaking::Direction;
use crate::branching::tie_breaking::RandomTieBreaker;
use crate::branching::variable_selection::VariableSelector;
use crate::branching::SelectionContext;
use crate::containers::KeyedVec;
use crate::containers::StorageKey;
use crate::variables::DomainId;

/// A [`VariableSelector`] which selects the unfixed variable with the smallest ratio between its
/// domain size and its weighted degree, see \[1\].
///
/// Every time a propagator fails, the weight of every variable in its scope is incremented; the
/// weighted degree of a variable is the total weight of the failures it took part in. Weights
/// start at 1 and survive restarts. Ties are broken uniformly at random.
///
/// # Bibliography
/// \[1\] F. Boussemart, F. Hemery, C. Lecoutre, and L. Sais, ‘Boosting systematic search by
/// weighting constraints’, in ECAI, 2004, vol. 16, p. 146.
#[derive(Debug)]
pub struct DomWDeg {
    variables: Vec<DomainId>,
    weights: KeyedVec<DomainId, u64>,
    tie_breaker: RandomTieBreaker<DomainId, f64>,
}

const DEFAULT_WEIGHT: u64 = 1;

impl DomWDeg {
    pub fn new(variables: &[DomainId]) -> Self {
        if variables.is_empty() {
            warn!("The DomWDeg variable selector was not provided with any variables");
        }

        let mut weights = KeyedVec::default();
        for &variable in variables {
            weights.accomodate(variable, DEFAULT_WEIGHT);
        }

        DomWDeg {
            variables: variables.to_vec(),
            weights,
            tie_breaker: RandomTieBreaker::new(Direction::Minimum),
        }
    }

    fn weight(&self, variable: DomainId) -> u64 {
        self.weights
            .get(variable)
            .copied()
            .unwrap_or(DEFAULT_WEIGHT)
    }
}

impl VariableSelector<DomainId> for DomWDeg {
    fn select_variable(&mut self, context: &mut SelectionContext) -> Option<DomainId> {
        for &variable in self.variables.iter() {
            if context.is_integer_fixed(variable) {
                continue;
            }

            let ratio = context.get_size_of_domain(variable) as f64 / self.weight(variable) as f64;
            self.tie_breaker.consider(variable, ratio, context.random());
        }

        self.tie_breaker.select()
    }

    fn on_conflict(&mut self, scope: &[DomainId]) {
        for &variable in scope {
            if variable.index() < self.weights.len() {
                self.weights[variable] += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branching::selection_context::tests::create_assignments;
    use crate::branching::selection_context::tests::create_rng;

    #[test]
    fn smallest_domain_is_selected_without_failures() {
        let (assignments, variables) = create_assignments(&[(0, 10), (0, 2), (4, 4)]);
        let mut rng = create_rng();
        let mut context = SelectionContext::new(&assignments, &mut rng);

        let mut strategy = DomWDeg::new(&variables);

        assert_eq!(Some(variables[1]), strategy.select_variable(&mut context));
    }

    #[test]
    fn failures_shift_the_selection() {
        let (assignments, variables) = create_assignments(&[(0, 5), (0, 2)]);
        let mut rng = create_rng();
        let mut context = SelectionContext::new(&assignments, &mut rng);

        let mut strategy = DomWDeg::new(&variables);
        // 6 / 3 < 3 / 1
        strategy.on_conflict(&[variables[0]]);
        strategy.on_conflict(&[variables[0]]);

        assert_eq!(Some(variables[0]), strategy.select_variable(&mut context));
    }

    #[test]
    fn untracked_variables_in_conflicts_are_ignored() {
        let (assignments, variables) = create_assignments(&[(0, 5), (0, 2), (0, 1)]);
        let mut rng = create_rng();
        let mut context = SelectionContext::new(&assignments, &mut rng);

        let mut strategy = DomWDeg::new(&variables[..2]);
        strategy.on_conflict(&[variables[2]]);

        assert_eq!(Some(variables[1]), strategy.select_variable(&mut context));
    }
}
