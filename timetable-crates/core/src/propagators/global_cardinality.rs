use super::count::propagate_occurrences;
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

/// For every `j`, the number of `variables` equal to `values[j]` is `counts[j]`.
///
/// When `closed` is set, the variables may not take any value outside of `values`.
#[derive(Clone, Debug)]
pub(crate) struct GlobalCardinalityConstructor {
    pub(crate) variables: Box<[DomainId]>,
    pub(crate) values: Box<[i32]>,
    pub(crate) counts: Box<[DomainId]>,
    pub(crate) closed: bool,
}

impl PropagatorConstructor for GlobalCardinalityConstructor {
    type PropagatorImpl = GlobalCardinalityPropagator;

    fn create(self, context: &mut PropagatorConstructorContext<'_>) -> Self::PropagatorImpl {
        for &variable in self.variables.iter() {
            context.register(variable, DomainEvents::ANY_INT);
        }
        for &count in self.counts.iter() {
            context.register(count, DomainEvents::BOUNDS);
        }

        GlobalCardinalityPropagator {
            variables: self.variables,
            values: self.values,
            counts: self.counts,
            closed: self.closed,
        }
    }
}

/// Filters every tracked value like a separate count constraint, and additionally reasons over
/// the sum of the counts: the variables which must take a tracked value form a lower bound, and
/// the variables which can take one an upper bound, on that sum.
#[derive(Debug)]
pub(crate) struct GlobalCardinalityPropagator {
    variables: Box<[DomainId]>,
    values: Box<[i32]>,
    counts: Box<[DomainId]>,
    closed: bool,
}

impl GlobalCardinalityPropagator {
    /// The number of variables which must take a tracked value, and the number which can.
    fn tracked_assignments(&self, context: &impl ReadDomains) -> (i64, i64) {
        if self.closed {
            let n = self.variables.len() as i64;
            return (n, n);
        }

        self.variables
            .iter()
            .fold((0, 0), |(must, may), &variable| {
                let num_tracked = self
                    .values
                    .iter()
                    .filter(|&&value| context.contains(variable, value))
                    .count() as u32;

                (
                    must + i64::from(num_tracked == context.domain_size(variable)),
                    may + i64::from(num_tracked > 0),
                )
            })
    }

    fn propagate_count_sum(&self, context: &mut PropagationContextMut) -> PropagationStatusCP {
        let (must, may) = self.tracked_assignments(&*context);

        let sum_lower = self
            .counts
            .iter()
            .map(|&count| context.lower_bound(count) as i64)
            .sum::<i64>();
        let sum_upper = self
            .counts
            .iter()
            .map(|&count| context.upper_bound(count) as i64)
            .sum::<i64>();

        if sum_lower > may || sum_upper < must {
            return Err(Inconsistency::Violated);
        }

        for &count in self.counts.iter() {
            let others_lower = sum_lower - context.lower_bound(count) as i64;
            let others_upper = sum_upper - context.upper_bound(count) as i64;

            context.set_upper_bound(count, (may - others_lower) as i32)?;
            context.set_lower_bound(count, (must - others_upper) as i32)?;
        }

        Ok(())
    }
}

impl Propagator for GlobalCardinalityPropagator {
    fn name(&self) -> &str {
        if self.closed {
            "GlobalCardinalityClosed"
        } else {
            "GlobalCardinality"
        }
    }

    fn priority(&self) -> Priority {
        Priority::Low
    }

    fn propagate(&self, mut context: PropagationContextMut) -> PropagationStatusCP {
        if self.closed {
            for &variable in self.variables.iter() {
                context.restrict(variable, |value| self.values.contains(&value))?;
            }
        }

        for (&value, &count) in self.values.iter().zip(self.counts.iter()) {
            propagate_occurrences(&mut context, &self.variables, value, count)?;
        }

        self.propagate_count_sum(&mut context)
    }

    fn detect_inconsistency(&self, context: PropagationContext) -> bool {
        let (must, may) = self.tracked_assignments(&context);
        let sum_lower = self
            .counts
            .iter()
            .map(|&count| context.lower_bound(count) as i64)
            .sum::<i64>();
        let sum_upper = self
            .counts
            .iter()
            .map(|&count| context.upper_bound(count) as i64)
            .sum::<i64>();

        sum_lower > may || sum_upper < must
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_solver::TestSolver;

    fn gcc(
        solver: &mut TestSolver,
        variables: &[DomainId],
        values: &[i32],
        counts: &[DomainId],
        closed: bool,
    ) -> Result<(), Inconsistency> {
        solver
            .new_propagator(GlobalCardinalityConstructor {
                variables: variables.into(),
                values: values.into(),
                counts: counts.into(),
                closed,
            })
            .map(|_| ())
    }

    #[test]
    fn closed_variant_removes_untracked_values() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(0, 4);
        let y = solver.new_variable(0, 4);
        let c1 = solver.new_variable(0, 2);
        let c3 = solver.new_variable(0, 2);

        gcc(&mut solver, &[x, y], &[1, 3], &[c1, c3], true).expect("no empty domains");

        assert_eq!(vec![1, 3], solver.domain_values(x));
        assert_eq!(vec![1, 3], solver.domain_values(y));
    }

    #[test]
    fn open_variant_keeps_untracked_values() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(0, 4);
        let y = solver.new_variable(0, 4);
        let c1 = solver.new_variable(0, 0);

        gcc(&mut solver, &[x, y], &[1], &[c1], false).expect("no empty domains");

        assert_eq!(vec![0, 2, 3, 4], solver.domain_values(x));
        assert_eq!(vec![0, 2, 3, 4], solver.domain_values(y));
    }

    #[test]
    fn closed_counts_must_cover_every_variable() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(1, 2);
        let y = solver.new_variable(1, 2);
        let z = solver.new_variable(1, 2);
        let c1 = solver.new_variable(0, 1);
        let c2 = solver.new_variable(0, 3);

        gcc(&mut solver, &[x, y, z], &[1, 2], &[c1, c2], true).expect("no empty domains");

        solver.assert_bounds(c2, 2, 3);
    }

    #[test]
    fn joint_counts_bound_each_other() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(0, 3);
        let y = solver.new_variable(0, 3);
        let z = solver.new_variable(0, 3);
        let c1 = solver.new_variable(2, 3);
        let c2 = solver.new_variable(0, 3);

        gcc(&mut solver, &[x, y, z], &[1, 2], &[c1, c2], false).expect("no empty domains");

        solver.assert_bounds(c2, 0, 1);
    }

    #[test]
    fn insufficient_capacity_fails() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(1, 2);
        let y = solver.new_variable(1, 2);
        let c1 = solver.new_variable(0, 0);
        let c2 = solver.new_variable(0, 1);

        assert!(gcc(&mut solver, &[x, y], &[1, 2], &[c1, c2], true).is_err());
    }

    #[test]
    fn fixed_counts_fix_the_variables() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(1, 2);
        let y = solver.new_variable(1, 2);
        let c1 = solver.new_variable(0, 2);
        let c2 = solver.new_variable(0, 2);

        gcc(&mut solver, &[x, y], &[1, 2], &[c1, c2], true).expect("no empty domains");
        solver.assign(x, 2).expect("non-empty domain");
        solver.set_upper_bound(c2, 1).expect("non-empty domain");
        solver.propagate().expect("non-empty domain");

        solver.assert_bounds(y, 1, 1);
        solver.assert_bounds(c1, 1, 1);
        solver.assert_bounds(c2, 1, 1);
    }
}
