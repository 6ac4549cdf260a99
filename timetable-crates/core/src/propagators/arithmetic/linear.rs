use crate::basic_types::Inconsistency;
use crate::basic_types::PropagationStatusCP;
use crate::constraints::Relation;
use crate::engine::propagation::PropagationContext;
use crate::engine::propagation::PropagationContextMut;
use crate::engine::propagation::Priority;
use crate::engine::propagation::Propagator;
use crate::engine::propagation::PropagatorConstructor;
use crate::engine::propagation::PropagatorConstructorContext;
use crate::engine::propagation::ReadDomains;
use crate::engine::propagation::ReifiableConstructor;
use crate::engine::DomainEvents;
use crate::math::num_ext::NumExt;
use crate::variables::DomainId;

/// `Σ coefficient * variable <relation> rhs`.
///
/// Intermediate sums are computed in `i64` so that they cannot overflow for any combination of
/// `i32` domains and coefficients.
#[derive(Clone, Debug)]
pub(crate) struct LinearConstructor {
    terms: Box<[(i32, DomainId)]>,
    relation: Relation,
    rhs: i32,
}

impl LinearConstructor {
    /// Terms with coefficient zero are dropped.
    pub(crate) fn new(
        terms: impl IntoIterator<Item = (i32, DomainId)>,
        relation: Relation,
        rhs: i32,
    ) -> Self {
        LinearConstructor {
            terms: terms
                .into_iter()
                .filter(|&(coefficient, _)| coefficient != 0)
                .collect(),
            relation,
            rhs,
        }
    }
}

impl PropagatorConstructor for LinearConstructor {
    type PropagatorImpl = LinearPropagator;

    fn create(self, context: &mut PropagatorConstructorContext<'_>) -> Self::PropagatorImpl {
        let events = match self.relation {
            Relation::NotEqual => DomainEvents::ASSIGN,
            _ => DomainEvents::BOUNDS,
        };
        for &(_, variable) in self.terms.iter() {
            context.register(variable, events);
        }

        LinearPropagator {
            terms: self.terms,
            relation: self.relation,
            rhs: self.rhs as i64,
        }
    }
}

impl ReifiableConstructor for LinearConstructor {
    type Negation = LinearConstructor;

    fn negation(&self) -> Self::Negation {
        let (relation, rhs) = match self.relation {
            Relation::Equal => (Relation::NotEqual, self.rhs),
            Relation::NotEqual => (Relation::Equal, self.rhs),
            Relation::LessEqual => (Relation::GreaterEqual, self.rhs.saturating_add(1)),
            Relation::GreaterEqual => (Relation::LessEqual, self.rhs.saturating_sub(1)),
        };

        LinearConstructor {
            terms: self.terms.clone(),
            relation,
            rhs,
        }
    }
}

#[derive(Debug)]
pub(crate) struct LinearPropagator {
    terms: Box<[(i32, DomainId)]>,
    relation: Relation,
    rhs: i64,
}

impl Propagator for LinearPropagator {
    fn name(&self) -> &str {
        match self.relation {
            Relation::Equal => "LinearEq",
            Relation::NotEqual => "LinearNe",
            Relation::LessEqual => "LinearLeq",
            Relation::GreaterEqual => "LinearGeq",
        }
    }

    fn priority(&self) -> Priority {
        Priority::High
    }

    fn propagate(&self, mut context: PropagationContextMut) -> PropagationStatusCP {
        match self.relation {
            Relation::LessEqual => propagate_less_equal(&mut context, &self.terms, 1, self.rhs),
            Relation::GreaterEqual => {
                propagate_less_equal(&mut context, &self.terms, -1, -self.rhs)
            }
            Relation::Equal => {
                propagate_less_equal(&mut context, &self.terms, 1, self.rhs)?;
                propagate_less_equal(&mut context, &self.terms, -1, -self.rhs)
            }
            Relation::NotEqual => propagate_not_equal(&mut context, &self.terms, self.rhs),
        }
    }

    fn detect_inconsistency(&self, context: PropagationContext) -> bool {
        let (minimum, maximum) = bounds_of_sum(&context, &self.terms, 1);

        match self.relation {
            Relation::LessEqual => minimum > self.rhs,
            Relation::GreaterEqual => maximum < self.rhs,
            Relation::Equal => minimum > self.rhs || maximum < self.rhs,
            Relation::NotEqual => minimum == maximum && minimum == self.rhs,
        }
    }
}

/// The smallest and largest value `Σ sign * a_i * x_i` can take.
fn bounds_of_sum(context: &impl ReadDomains, terms: &[(i32, DomainId)], sign: i64) -> (i64, i64) {
    terms
        .iter()
        .map(|&(coefficient, variable)| term_bounds(context, sign * coefficient as i64, variable))
        .fold((0, 0), |(minimum, maximum), (lower, upper)| {
            (minimum + lower, maximum + upper)
        })
}

fn term_bounds(context: &impl ReadDomains, coefficient: i64, variable: DomainId) -> (i64, i64) {
    let lower = coefficient * context.lower_bound(variable) as i64;
    let upper = coefficient * context.upper_bound(variable) as i64;
    (lower.min(upper), lower.max(upper))
}

/// Enforces `Σ sign * a_i * x_i <= rhs` on bounds.
fn propagate_less_equal(
    context: &mut PropagationContextMut,
    terms: &[(i32, DomainId)],
    sign: i64,
    rhs: i64,
) -> PropagationStatusCP {
    let (minimum, _) = bounds_of_sum(&*context, terms, sign);
    if minimum > rhs {
        return Err(Inconsistency::Violated);
    }

    for &(coefficient, variable) in terms.iter() {
        let coefficient = sign * coefficient as i64;
        let (term_minimum, _) = term_bounds(&*context, coefficient, variable);
        // The largest value `coefficient * variable` can take given the minimum of the rest.
        let slack = rhs - (minimum - term_minimum);

        if coefficient > 0 {
            let bound = NumExt::div_floor(slack, coefficient);
            context.set_upper_bound(variable, clamp_to_i32(bound))?;
        } else {
            let bound = NumExt::div_ceil(slack, coefficient);
            context.set_lower_bound(variable, clamp_to_i32(bound))?;
        }
    }

    Ok(())
}

/// Removes the only value which would make the sum equal to `rhs`, once all but one variable are
/// fixed.
fn propagate_not_equal(
    context: &mut PropagationContextMut,
    terms: &[(i32, DomainId)],
    rhs: i64,
) -> PropagationStatusCP {
    let mut unfixed = None;
    let mut fixed_sum = 0_i64;

    for &(coefficient, variable) in terms.iter() {
        if context.is_fixed(variable) {
            fixed_sum += coefficient as i64 * context.lower_bound(variable) as i64;
        } else if unfixed.is_some() {
            return Ok(());
        } else {
            unfixed = Some((coefficient as i64, variable));
        }
    }

    match unfixed {
        None if fixed_sum == rhs => Err(Inconsistency::Violated),
        None => Ok(()),
        Some((coefficient, variable)) => {
            let remainder = rhs - fixed_sum;
            if remainder % coefficient == 0 {
                if let Ok(value) = i32::try_from(remainder / coefficient) {
                    context.remove(variable, value)?;
                }
            }
            Ok(())
        }
    }
}

fn clamp_to_i32(value: i64) -> i32 {
    value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}
