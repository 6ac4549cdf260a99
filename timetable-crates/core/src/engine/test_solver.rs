//! This module exposes helpers that aid testing of propagators. The [`TestSolver`] allows
//! setting up specific scenarios under which to test the various operations of a propagator.
use crate::basic_types::EmptyDomain;
use crate::basic_types::Inconsistency;
use crate::engine::propagation::PropagationContext;
use crate::engine::propagation::PropagatorConstructor;
use crate::engine::propagation::PropagatorId;
use crate::engine::State;
use crate::variables::DomainId;

/// A container for variables and propagators, which can be used to test propagators.
#[derive(Debug, Default)]
pub(crate) struct TestSolver {
    state: State,
}

impl TestSolver {
    pub(crate) fn new_variable(&mut self, lb: i32, ub: i32) -> DomainId {
        self.state.assignments.grow(lb, ub)
    }

    pub(crate) fn new_sparse_variable(&mut self, values: Vec<i32>) -> DomainId {
        self.state.assignments.grow_sparse(values)
    }

    /// Posts the propagator and runs every posted propagator to the fixed point.
    pub(crate) fn new_propagator<Constructor: PropagatorConstructor>(
        &mut self,
        constructor: Constructor,
    ) -> Result<PropagatorId, Inconsistency> {
        let propagator_id = self.state.add_propagator(constructor);
        self.propagate()?;
        Ok(propagator_id)
    }

    pub(crate) fn propagate(&mut self) -> Result<(), Inconsistency> {
        self.state
            .propagate_to_fixed_point()
            .map_err(|conflict| conflict.inconsistency)
    }

    pub(crate) fn propagator_name(&self, propagator_id: PropagatorId) -> &str {
        self.state.propagator_name(propagator_id)
    }

    pub(crate) fn contains(&self, var: DomainId, value: i32) -> bool {
        self.state.assignments.is_value_in_domain(var, value)
    }

    pub(crate) fn lower_bound(&self, var: DomainId) -> i32 {
        self.state.assignments.get_lower_bound(var)
    }

    pub(crate) fn upper_bound(&self, var: DomainId) -> i32 {
        self.state.assignments.get_upper_bound(var)
    }

    pub(crate) fn is_fixed(&self, var: DomainId) -> bool {
        self.state.assignments.is_fixed(var)
    }

    pub(crate) fn set_lower_bound(&mut self, var: DomainId, bound: i32) -> Result<(), EmptyDomain> {
        self.state
            .assignments
            .tighten_lower_bound(var, bound)
            .map(|_| ())
    }

    pub(crate) fn set_upper_bound(&mut self, var: DomainId, bound: i32) -> Result<(), EmptyDomain> {
        self.state
            .assignments
            .tighten_upper_bound(var, bound)
            .map(|_| ())
    }

    pub(crate) fn remove(&mut self, var: DomainId, value: i32) -> Result<(), EmptyDomain> {
        self.state
            .assignments
            .remove_value_from_domain(var, value)
            .map(|_| ())
    }

    pub(crate) fn assign(&mut self, var: DomainId, value: i32) -> Result<(), EmptyDomain> {
        self.state
            .assignments
            .make_assignment(var, value)
            .map(|_| ())
    }

    pub(crate) fn assert_bounds(&self, var: DomainId, lb: i32, ub: i32) {
        let actual_lb = self.lower_bound(var);
        let actual_ub = self.upper_bound(var);

        assert_eq!(
            (lb, ub), (actual_lb, actual_ub),
            "The expected bounds [{lb}..{ub}] did not match the actual bounds [{actual_lb}..{actual_ub}]"
        );
    }

    pub(crate) fn read_context(&self) -> PropagationContext<'_> {
        PropagationContext::new(&self.state.assignments)
    }

    pub(crate) fn domain_values(&self, var: DomainId) -> Vec<i32> {
        self.state.assignments.domain_iter(var).collect()
    }
}
