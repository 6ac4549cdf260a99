use super::BinaryNotEqualsConstructor;
use crate::basic_types::PropagationStatusCP;
use crate::engine::propagation::PropagationContext;
use crate::engine::propagation::PropagationContextMut;
use crate::engine::propagation::Priority;
use crate::engine::propagation::Propagator;
use crate::engine::propagation::PropagatorConstructor;
use crate::engine::propagation::PropagatorConstructorContext;
use crate::engine::propagation::ReadDomains;
use crate::engine::propagation::ReifiableConstructor;
use crate::engine::DomainEvents;
use crate::variables::DomainId;

/// `lhs == rhs + offset`, propagated on the full domains.
#[derive(Clone, Copy, Debug)]
pub(crate) struct BinaryEqualsConstructor {
    pub(crate) lhs: DomainId,
    pub(crate) rhs: DomainId,
    pub(crate) offset: i32,
}

impl PropagatorConstructor for BinaryEqualsConstructor {
    type PropagatorImpl = BinaryEqualsPropagator;

    fn create(self, context: &mut PropagatorConstructorContext<'_>) -> Self::PropagatorImpl {
        context.register(self.lhs, DomainEvents::ANY_INT);
        context.register(self.rhs, DomainEvents::ANY_INT);

        BinaryEqualsPropagator {
            lhs: self.lhs,
            rhs: self.rhs,
            offset: self.offset,
        }
    }
}

impl ReifiableConstructor for BinaryEqualsConstructor {
    type Negation = BinaryNotEqualsConstructor;

    fn negation(&self) -> Self::Negation {
        BinaryNotEqualsConstructor {
            lhs: self.lhs,
            rhs: self.rhs,
            offset: self.offset,
        }
    }
}

#[derive(Debug)]
pub(crate) struct BinaryEqualsPropagator {
    lhs: DomainId,
    rhs: DomainId,
    offset: i32,
}

impl BinaryEqualsPropagator {
    /// Whether `value` of `lhs` has a matching value in `rhs`.
    fn lhs_supported(&self, context: &impl ReadDomains, value: i32) -> bool {
        value
            .checked_sub(self.offset)
            .is_some_and(|other| context.contains(self.rhs, other))
    }

    fn rhs_supported(&self, context: &impl ReadDomains, value: i32) -> bool {
        value
            .checked_add(self.offset)
            .is_some_and(|other| context.contains(self.lhs, other))
    }
}

impl Propagator for BinaryEqualsPropagator {
    fn name(&self) -> &str {
        "BinaryEq"
    }

    fn priority(&self) -> Priority {
        Priority::High
    }

    fn propagate(&self, mut context: PropagationContextMut) -> PropagationStatusCP {
        let unsupported = context
            .iterate_domain(self.lhs)
            .filter(|&value| !self.lhs_supported(&context, value))
            .collect::<Vec<_>>();
        for value in unsupported {
            context.remove(self.lhs, value)?;
        }

        let unsupported = context
            .iterate_domain(self.rhs)
            .filter(|&value| !self.rhs_supported(&context, value))
            .collect::<Vec<_>>();
        for value in unsupported {
            context.remove(self.rhs, value)?;
        }

        Ok(())
    }

    fn detect_inconsistency(&self, context: PropagationContext) -> bool {
        !context
            .iterate_domain(self.lhs)
            .any(|value| self.lhs_supported(&context, value))
    }
}
