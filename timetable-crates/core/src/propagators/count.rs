use crate::basic_types::Inconsistency;
use crate::basic_types::PropagationStatusCP;
use crate::engine::propagation::PropagationContext;
use crate::engine::propagation::PropagationContextMut;
use crate::engine::propagation::Priority;
use crate::engine::propagation::Propagator;
use crate::engine::propagation::PropagatorConstructor;
use crate::engine::propagation::PropagatorConstructorContext;
use crate::engine::propagation::ReadDomains;
use crate::engine::DomainEvents;
use crate::variables::DomainId;

/// The number of `variables` equal to `value` is `count`.
#[derive(Clone, Debug)]
pub(crate) struct CountConstructor {
    pub(crate) value: i32,
    pub(crate) variables: Box<[DomainId]>,
    pub(crate) count: DomainId,
}

impl PropagatorConstructor for CountConstructor {
    type PropagatorImpl = CountPropagator;

    fn create(self, context: &mut PropagatorConstructorContext<'_>) -> Self::PropagatorImpl {
        for &variable in self.variables.iter() {
            context.register(variable, DomainEvents::ANY_INT);
        }
        context.register(self.count, DomainEvents::BOUNDS);

        CountPropagator {
            value: self.value,
            variables: self.variables,
            count: self.count,
        }
    }
}

#[derive(Debug)]
pub(crate) struct CountPropagator {
    value: i32,
    variables: Box<[DomainId]>,
    count: DomainId,
}

/// How many variables are fixed to a value (`must`) and how many can still take it (`may`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Occurrences {
    pub(crate) must: usize,
    pub(crate) may: usize,
}

impl Occurrences {
    pub(crate) fn of(context: &impl ReadDomains, variables: &[DomainId], value: i32) -> Self {
        variables
            .iter()
            .filter(|&&variable| context.contains(variable, value))
            .fold(Occurrences::default(), |occurrences, &variable| Occurrences {
                must: occurrences.must + usize::from(context.is_fixed(variable)),
                may: occurrences.may + 1,
            })
    }
}

/// Tightens `count` to the occurrence bounds, and fixes the occurrences of `value` once the
/// bounds of `count` leave no choice.
pub(crate) fn propagate_occurrences(
    context: &mut PropagationContextMut,
    variables: &[DomainId],
    value: i32,
    count: DomainId,
) -> PropagationStatusCP {
    let occurrences = Occurrences::of(&*context, variables, value);

    context.set_lower_bound(count, occurrences.must as i32)?;
    context.set_upper_bound(count, occurrences.may as i32)?;

    if occurrences.must == occurrences.may {
        return Ok(());
    }

    if context.upper_bound(count) as usize == occurrences.must {
        for &variable in variables {
            if !context.is_fixed(variable) {
                context.remove(variable, value)?;
            }
        }
    } else if context.lower_bound(count) as usize == occurrences.may {
        for &variable in variables {
            if context.contains(variable, value) {
                context.assign(variable, value)?;
            }
        }
    }

    Ok(())
}

impl Propagator for CountPropagator {
    fn name(&self) -> &str {
        "Count"
    }

    fn priority(&self) -> Priority {
        Priority::Medium
    }

    fn propagate(&self, mut context: PropagationContextMut) -> PropagationStatusCP {
        if self.detect_inconsistency(context.as_readonly()) {
            return Err(Inconsistency::Violated);
        }

        propagate_occurrences(&mut context, &self.variables, self.value, self.count)
    }

    fn detect_inconsistency(&self, context: PropagationContext) -> bool {
        let occurrences = Occurrences::of(&context, &self.variables, self.value);
        (occurrences.must as i64) > context.upper_bound(self.count) as i64
            || (occurrences.may as i64) < context.lower_bound(self.count) as i64
    }
}
