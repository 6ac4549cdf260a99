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

/// A [`PropagatorConstructor`] for the [`ReifiedPropagator`].
#[derive(Clone, Debug)]
pub(crate) struct ReifiedConstructor<C> {
    pub(crate) constructor: C,
    /// A 0-1 variable which is 1 exactly when the constraint of `constructor` holds.
    pub(crate) reification: DomainId,
}

impl<C> PropagatorConstructor for ReifiedConstructor<C>
where
    C: ReifiableConstructor,
{
    type PropagatorImpl = ReifiedPropagator<
        C::PropagatorImpl,
        <C::Negation as PropagatorConstructor>::PropagatorImpl,
    >;

    fn create(self, context: &mut PropagatorConstructorContext<'_>) -> Self::PropagatorImpl {
        let negation = self.constructor.negation().create(context);
        let propagator = self.constructor.create(context);
        context.register(self.reification, DomainEvents::ASSIGN);

        let name = format!("Reified({})", propagator.name());

        ReifiedPropagator {
            propagator,
            negation,
            reification: self.reification,
            name,
        }
    }
}

/// Propagator for the constraint `r <-> p`, where `r` is a 0-1 variable and `p` is the
/// constraint of an arbitrary reifiable propagator.
///
/// Once `r` is fixed the propagator of `p` (when `r = 1`) or of its negation (when `r = 0`) is
/// run. Before that, `r` is fixed as soon as either of the two reports an inconsistency.
#[derive(Debug)]
pub(crate) struct ReifiedPropagator<WrappedPropagator, NegatedPropagator> {
    propagator: WrappedPropagator,
    negation: NegatedPropagator,
    reification: DomainId,
    name: String,
}

impl<WrappedPropagator, NegatedPropagator> Propagator
    for ReifiedPropagator<WrappedPropagator, NegatedPropagator>
where
    WrappedPropagator: Propagator,
    NegatedPropagator: Propagator,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> Priority {
        self.propagator.priority()
    }

    fn propagate(&self, mut context: PropagationContextMut) -> PropagationStatusCP {
        if context.is_fixed(self.reification) {
            return if context.lower_bound(self.reification) == 1 {
                self.propagator.propagate(context)
            } else {
                self.negation.propagate(context)
            };
        }

        if self.propagator.detect_inconsistency(context.as_readonly()) {
            context.assign(self.reification, 0)?;
            self.negation.propagate(context)
        } else if self.negation.detect_inconsistency(context.as_readonly()) {
            context.assign(self.reification, 1)?;
            self.propagator.propagate(context)
        } else {
            Ok(())
        }
    }

    fn detect_inconsistency(&self, context: PropagationContext) -> bool {
        if !context.is_fixed(self.reification) {
            return false;
        }

        if context.lower_bound(self.reification) == 1 {
            self.propagator.detect_inconsistency(context)
        } else {
            self.negation.detect_inconsistency(context)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::Relation;
    use crate::propagators::DistanceConstructor;
    use crate::propagators::LinearConstructor;
    use crate::engine::test_solver::TestSolver;

    #[test]
    fn true_reification_enforces_the_constraint() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(0, 10);
        let r = solver.new_variable(1, 1);

        let _ = solver
            .new_propagator(ReifiedConstructor {
                constructor: LinearConstructor::new([(1, x)], Relation::LessEqual, 3),
                reification: r,
            })
            .expect("no empty domains");

        solver.assert_bounds(x, 0, 3);
    }

    #[test]
    fn false_reification_enforces_the_negation() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(0, 10);
        let r = solver.new_variable(0, 1);

        let _ = solver
            .new_propagator(ReifiedConstructor {
                constructor: LinearConstructor::new([(1, x)], Relation::LessEqual, 3),
                reification: r,
            })
            .expect("no empty domains");
        solver.assert_bounds(x, 0, 10);

        solver.assign(r, 0).expect("non-empty domain");
        solver.propagate().expect("non-empty domain");

        solver.assert_bounds(x, 4, 10);
    }

    #[test]
    fn violated_constraint_sets_reification_to_false() {
        let mut solver = TestSolver::default();
        let a = solver.new_variable(0, 2);
        let b = solver.new_variable(8, 9);
        let r = solver.new_variable(0, 1);

        let _ = solver
            .new_propagator(ReifiedConstructor {
                constructor: DistanceConstructor {
                    a,
                    b,
                    relation: Relation::LessEqual,
                    distance: 3,
                },
                reification: r,
            })
            .expect("no empty domains");

        solver.assert_bounds(r, 0, 0);
    }

    #[test]
    fn entailed_constraint_sets_reification_to_true() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(0, 2);
        let y = solver.new_variable(0, 2);
        let r = solver.new_variable(0, 1);

        let _ = solver
            .new_propagator(ReifiedConstructor {
                constructor: LinearConstructor::new(
                    [(1, x), (1, y)],
                    Relation::GreaterEqual,
                    1,
                ),
                reification: r,
            })
            .expect("no empty domains");
        solver.assert_bounds(r, 0, 1);

        solver.set_lower_bound(x, 1).expect("non-empty domain");
        solver.propagate().expect("non-empty domain");

        solver.assert_bounds(r, 1, 1);
    }

    #[test]
    fn name_wraps_the_inner_propagator() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(0, 2);
        let r = solver.new_variable(0, 1);

        let propagator_id = solver
            .new_propagator(ReifiedConstructor {
                constructor: LinearConstructor::new([(1, x)], Relation::Equal, 1),
                reification: r,
            })
            .expect("no empty domains");

        assert_eq!("Reified(LinearEq)", solver.propagator_name(propagator_id));
    }
}
