use crate::basic_types::Random;
#[cfg(doc)]
use crate::branching::Brancher;
use crate::engine::Assignments;
use crate::variables::DomainId;

/// The context provided to the [`Brancher`]; it gives read access to the current domains and
/// access to the random generator of the solver.
#[derive(Debug)]
pub struct SelectionContext<'a> {
    assignments: &'a Assignments,
    random_generator: &'a mut dyn Random,
}

impl<'a> SelectionContext<'a> {
    pub(crate) fn new(assignments: &'a Assignments, rng: &'a mut dyn Random) -> Self {
        SelectionContext {
            assignments,
            random_generator: rng,
        }
    }

    /// Returns a random generator which can be used to generate random values (see [`Random`] for
    /// more information).
    pub fn random(&mut self) -> &mut dyn Random {
        self.random_generator
    }

    /// Returns the number of values in the domain of `var`.
    pub fn get_size_of_domain(&self, var: DomainId) -> u32 {
        self.assignments.get_domain_size(var)
    }

    /// Returns the lower bound of the provided variable.
    pub fn lower_bound(&self, var: DomainId) -> i32 {
        self.assignments.get_lower_bound(var)
    }

    /// Returns the upper bound of the provided variable.
    pub fn upper_bound(&self, var: DomainId) -> i32 {
        self.assignments.get_upper_bound(var)
    }

    /// Determines whether the provided value is in the domain of the provided variable.
    pub fn contains(&self, var: DomainId, value: i32) -> bool {
        self.assignments.is_value_in_domain(var, value)
    }

    /// Determines whether the provided variable is fixed.
    pub fn is_integer_fixed(&self, var: DomainId) -> bool {
        self.assignments.is_fixed(var)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use crate::engine::Assignments;
    use crate::variables::DomainId;

    /// Creates the assignments with one variable per pair of bounds.
    pub(crate) fn create_assignments(bounds: &[(i32, i32)]) -> (Assignments, Vec<DomainId>) {
        let mut assignments = Assignments::default();
        let variables = bounds
            .iter()
            .map(|&(lower_bound, upper_bound)| assignments.grow(lower_bound, upper_bound))
            .collect();
        (assignments, variables)
    }

    pub(crate) fn create_rng() -> SmallRng {
        SmallRng::seed_from_u64(42)
    }
}
