use super::BinaryEqualsConstructor;
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

/// `lhs != rhs + offset`; only propagates once one of the sides is fixed.
#[derive(Clone, Copy, Debug)]
pub(crate) struct BinaryNotEqualsConstructor {
    pub(crate) lhs: DomainId,
    pub(crate) rhs: DomainId,
    pub(crate) offset: i32,
}

impl PropagatorConstructor for BinaryNotEqualsConstructor {
    type PropagatorImpl = BinaryNotEqualsPropagator;

    fn create(self, context: &mut PropagatorConstructorContext<'_>) -> Self::PropagatorImpl {
        context.register(self.lhs, DomainEvents::ASSIGN);
        context.register(self.rhs, DomainEvents::ASSIGN);

        BinaryNotEqualsPropagator {
            lhs: self.lhs,
            rhs: self.rhs,
            offset: self.offset,
        }
    }
}

impl ReifiableConstructor for BinaryNotEqualsConstructor {
    type Negation = BinaryEqualsConstructor;

    fn negation(&self) -> Self::Negation {
        BinaryEqualsConstructor {
            lhs: self.lhs,
            rhs: self.rhs,
            offset: self.offset,
        }
    }
}

#[derive(Debug)]
pub(crate) struct BinaryNotEqualsPropagator {
    lhs: DomainId,
    rhs: DomainId,
    offset: i32,
}

impl Propagator for BinaryNotEqualsPropagator {
    fn name(&self) -> &str {
        "BinaryNe"
    }

    fn priority(&self) -> Priority {
        Priority::High
    }

    fn propagate(&self, mut context: PropagationContextMut) -> PropagationStatusCP {
        if context.is_fixed(self.lhs) {
            if let Some(value) = context.lower_bound(self.lhs).checked_sub(self.offset) {
                context.remove(self.rhs, value)?;
            }
        }

        if context.is_fixed(self.rhs) {
            if let Some(value) = context.lower_bound(self.rhs).checked_add(self.offset) {
                context.remove(self.lhs, value)?;
            }
        }

        Ok(())
    }

    fn detect_inconsistency(&self, context: PropagationContext) -> bool {
        context.is_fixed(self.lhs)
            && context.is_fixed(self.rhs)
            && context.lower_bound(self.lhs) as i64
                == context.lower_bound(self.rhs) as i64 + self.offset as i64
    }
}
