use crate::basic_types::EmptyDomain;
use crate::engine::Assignments;
use crate::variables::DomainId;

/// Read access to the current domains.
pub(crate) trait ReadDomains {
    fn assignments(&self) -> &Assignments;

    fn lower_bound(&self, var: DomainId) -> i32 {
        self.assignments().get_lower_bound(var)
    }

    fn upper_bound(&self, var: DomainId) -> i32 {
        self.assignments().get_upper_bound(var)
    }

    fn contains(&self, var: DomainId, value: i32) -> bool {
        self.assignments().is_value_in_domain(var, value)
    }

    fn is_fixed(&self, var: DomainId) -> bool {
        self.assignments().is_fixed(var)
    }

    fn domain_size(&self, var: DomainId) -> u32 {
        self.assignments().get_domain_size(var)
    }

    fn iterate_domain(&self, var: DomainId) -> impl Iterator<Item = i32> + '_ {
        self.assignments().domain_iter(var)
    }
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct PropagationContext<'a> {
    assignments: &'a Assignments,
}

impl<'a> PropagationContext<'a> {
    pub(crate) fn new(assignments: &'a Assignments) -> Self {
        PropagationContext { assignments }
    }
}

impl ReadDomains for PropagationContext<'_> {
    fn assignments(&self) -> &Assignments {
        self.assignments
    }
}

/// The context handed to [`crate::engine::propagation::Propagator::propagate`]; it allows
/// domains to be restricted.
#[derive(Debug)]
pub(crate) struct PropagationContextMut<'a> {
    assignments: &'a mut Assignments,
}

impl<'a> PropagationContextMut<'a> {
    pub(crate) fn new(assignments: &'a mut Assignments) -> Self {
        PropagationContextMut { assignments }
    }

    pub(crate) fn as_readonly(&self) -> PropagationContext<'_> {
        PropagationContext::new(self.assignments)
    }

    pub(crate) fn set_lower_bound(&mut self, var: DomainId, bound: i32) -> Result<(), EmptyDomain> {
        self.assignments
            .tighten_lower_bound(var, bound)
            .map(|_| ())
    }

    pub(crate) fn set_upper_bound(&mut self, var: DomainId, bound: i32) -> Result<(), EmptyDomain> {
        self.assignments
            .tighten_upper_bound(var, bound)
            .map(|_| ())
    }

    pub(crate) fn remove(&mut self, var: DomainId, value: i32) -> Result<(), EmptyDomain> {
        self.assignments
            .remove_value_from_domain(var, value)
            .map(|_| ())
    }

    pub(crate) fn assign(&mut self, var: DomainId, value: i32) -> Result<(), EmptyDomain> {
        self.assignments.make_assignment(var, value).map(|_| ())
    }

    /// Keeps only the values of `var` for which `keep` holds.
    pub(crate) fn restrict(
        &mut self,
        var: DomainId,
        keep: impl Fn(i32) -> bool,
    ) -> Result<(), EmptyDomain> {
        self.assignments.restrict(var, keep).map(|_| ())
    }
}

impl ReadDomains for PropagationContextMut<'_> {
    fn assignments(&self) -> &Assignments {
        self.assignments
    }
}
