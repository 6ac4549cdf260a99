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
use crate::variables::DomainId;

/// `|a - b| <relation> distance`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct DistanceConstructor {
    pub(crate) a: DomainId,
    pub(crate) b: DomainId,
    pub(crate) relation: Relation,
    pub(crate) distance: i32,
}

impl PropagatorConstructor for DistanceConstructor {
    type PropagatorImpl = DistancePropagator;

    fn create(self, context: &mut PropagatorConstructorContext<'_>) -> Self::PropagatorImpl {
        let events = match self.relation {
            Relation::LessEqual | Relation::GreaterEqual => DomainEvents::BOUNDS,
            Relation::Equal => DomainEvents::ANY_INT,
            Relation::NotEqual => DomainEvents::ASSIGN,
        };
        context.register(self.a, events);
        context.register(self.b, events);

        DistancePropagator {
            a: self.a,
            b: self.b,
            relation: self.relation,
            distance: self.distance as i64,
        }
    }
}

impl ReifiableConstructor for DistanceConstructor {
    type Negation = DistanceConstructor;

    fn negation(&self) -> Self::Negation {
        let (relation, distance) = match self.relation {
            Relation::LessEqual => (Relation::GreaterEqual, self.distance.saturating_add(1)),
            Relation::GreaterEqual => (Relation::LessEqual, self.distance.saturating_sub(1)),
            Relation::Equal => (Relation::NotEqual, self.distance),
            Relation::NotEqual => (Relation::Equal, self.distance),
        };

        DistanceConstructor {
            relation,
            distance,
            ..*self
        }
    }
}

#[derive(Debug)]
pub(crate) struct DistancePropagator {
    a: DomainId,
    b: DomainId,
    relation: Relation,
    distance: i64,
}

impl Propagator for DistancePropagator {
    fn name(&self) -> &str {
        "Distance"
    }

    fn priority(&self) -> Priority {
        Priority::High
    }

    fn propagate(&self, mut context: PropagationContextMut) -> PropagationStatusCP {
        match self.relation {
            Relation::LessEqual => {
                if self.distance < 0 {
                    return Err(Inconsistency::Violated);
                }
                within_distance(&mut context, self.a, self.b, self.distance)?;
                within_distance(&mut context, self.b, self.a, self.distance)
            }
            Relation::GreaterEqual => {
                if self.distance <= 0 {
                    return Ok(());
                }
                at_least_distance(&mut context, self.a, self.b, self.distance)?;
                at_least_distance(&mut context, self.b, self.a, self.distance)
            }
            Relation::Equal => {
                if self.distance < 0 {
                    return Err(Inconsistency::Violated);
                }
                exactly_distance(&mut context, self.a, self.b, self.distance)?;
                exactly_distance(&mut context, self.b, self.a, self.distance)
            }
            Relation::NotEqual => {
                if self.distance < 0 {
                    return Ok(());
                }
                not_distance(&mut context, self.a, self.b, self.distance)?;
                not_distance(&mut context, self.b, self.a, self.distance)
            }
        }
    }

    fn detect_inconsistency(&self, context: PropagationContext) -> bool {
        let (lb_a, ub_a) = bounds(&context, self.a);
        let (lb_b, ub_b) = bounds(&context, self.b);

        match self.relation {
            Relation::LessEqual => lb_a - ub_b > self.distance || lb_b - ub_a > self.distance,
            Relation::GreaterEqual => (ub_a - lb_b).max(ub_b - lb_a) < self.distance,
            Relation::Equal => !context
                .iterate_domain(self.a)
                .any(|value| has_support_at_distance(&context, value, self.b, self.distance)),
            Relation::NotEqual => {
                context.is_fixed(self.a)
                    && context.is_fixed(self.b)
                    && (lb_a - lb_b).abs() == self.distance
            }
        }
    }
}

fn bounds(context: &impl ReadDomains, variable: DomainId) -> (i64, i64) {
    (
        context.lower_bound(variable) as i64,
        context.upper_bound(variable) as i64,
    )
}

fn clamp_to_i32(value: i64) -> i32 {
    value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

/// Restricts `variable` to the window `[lb(other) - distance, ub(other) + distance]`.
fn within_distance(
    context: &mut PropagationContextMut,
    variable: DomainId,
    other: DomainId,
    distance: i64,
) -> PropagationStatusCP {
    let (lower, upper) = bounds(&*context, other);
    context.set_lower_bound(variable, clamp_to_i32(lower - distance))?;
    context.set_upper_bound(variable, clamp_to_i32(upper + distance))?;
    Ok(())
}

/// Removes the values of `variable` which are closer than `distance` to every value of `other`,
/// i.e. those strictly between `ub(other) - distance` and `lb(other) + distance`.
fn at_least_distance(
    context: &mut PropagationContextMut,
    variable: DomainId,
    other: DomainId,
    distance: i64,
) -> PropagationStatusCP {
    let (lower, upper) = bounds(&*context, other);
    let excluded_from = upper - distance;
    let excluded_to = lower + distance;

    if excluded_from + 1 < excluded_to {
        context.restrict(variable, move |value| {
            let value = value as i64;
            value <= excluded_from || value >= excluded_to
        })?;
    }
    Ok(())
}

fn has_support_at_distance(
    context: &impl ReadDomains,
    value: i32,
    other: DomainId,
    distance: i64,
) -> bool {
    let value = value as i64;
    [value - distance, value + distance]
        .into_iter()
        .filter_map(|candidate| i32::try_from(candidate).ok())
        .any(|candidate| context.contains(other, candidate))
}

fn exactly_distance(
    context: &mut PropagationContextMut,
    variable: DomainId,
    other: DomainId,
    distance: i64,
) -> PropagationStatusCP {
    let unsupported = context
        .iterate_domain(variable)
        .filter(|&value| !has_support_at_distance(&*context, value, other, distance))
        .collect::<Vec<_>>();
    for value in unsupported {
        context.remove(variable, value)?;
    }
    Ok(())
}

fn not_distance(
    context: &mut PropagationContextMut,
    variable: DomainId,
    other: DomainId,
    distance: i64,
) -> PropagationStatusCP {
    if !context.is_fixed(other) {
        return Ok(());
    }

    let value = context.lower_bound(other) as i64;
    for excluded in [value - distance, value + distance] {
        if let Ok(excluded) = i32::try_from(excluded) {
            context.remove(variable, excluded)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_solver::TestSolver;

    fn distance(
        solver: &mut TestSolver,
        a: DomainId,
        b: DomainId,
        relation: Relation,
        distance: i32,
    ) -> Result<(), Inconsistency> {
        solver
            .new_propagator(DistanceConstructor {
                a,
                b,
                relation,
                distance,
            })
            .map(|_| ())
    }

    #[test]
    fn at_most_restricts_to_a_window() {
        let mut solver = TestSolver::default();
        let a = solver.new_variable(0, 20);
        let b = solver.new_variable(8, 10);

        distance(&mut solver, a, b, Relation::LessEqual, 2).expect("no empty domains");

        solver.assert_bounds(a, 6, 12);
        solver.assert_bounds(b, 8, 10);
    }

    #[test]
    fn at_least_removes_the_middle() {
        let mut solver = TestSolver::default();
        let a = solver.new_variable(0, 10);
        let b = solver.new_variable(5, 5);

        distance(&mut solver, a, b, Relation::GreaterEqual, 3).expect("no empty domains");

        assert_eq!(vec![0, 1, 2, 8, 9, 10], solver.domain_values(a));
    }

    #[test]
    fn exactly_keeps_supported_values() {
        let mut solver = TestSolver::default();
        let a = solver.new_variable(0, 6);
        let b = solver.new_sparse_variable(vec![1, 5]);

        distance(&mut solver, a, b, Relation::Equal, 2).expect("no empty domains");

        assert_eq!(vec![3], solver.domain_values(a));
        assert_eq!(vec![1, 5], solver.domain_values(b));
    }

    #[test]
    fn not_equal_removes_both_sides() {
        let mut solver = TestSolver::default();
        let a = solver.new_variable(0, 6);
        let b = solver.new_variable(0, 6);

        distance(&mut solver, a, b, Relation::NotEqual, 2).expect("no empty domains");
        solver.assign(b, 3).expect("non-empty domain");
        solver.propagate().expect("non-empty domain");

        assert_eq!(vec![0, 2, 3, 4, 6], solver.domain_values(a));
    }

    #[test]
    fn negative_distance_bound_is_violated() {
        let mut solver = TestSolver::default();
        let a = solver.new_variable(0, 6);
        let b = solver.new_variable(0, 6);

        assert_eq!(
            Err(Inconsistency::Violated),
            distance(&mut solver, a, b, Relation::LessEqual, -1)
        );
    }

    #[test]
    fn negation_of_at_most_is_strictly_more() {
        let mut solver = TestSolver::default();
        let a = solver.new_variable(0, 4);
        let b = solver.new_variable(2, 2);

        let constructor = DistanceConstructor {
            a,
            b,
            relation: Relation::LessEqual,
            distance: 1,
        };
        let _ = solver
            .new_propagator(constructor.negation())
            .expect("no empty domains");

        assert_eq!(vec![0, 4], solver.domain_values(a));
    }

    #[test]
    fn too_close_bounds_are_detected() {
        let mut solver = TestSolver::default();
        let a = solver.new_variable(3, 4);
        let b = solver.new_variable(4, 5);

        let propagator = DistancePropagator {
            a,
            b,
            relation: Relation::GreaterEqual,
            distance: 3,
        };

        assert!(propagator.detect_inconsistency(solver.read_context()));
    }
}
