use itertools::Itertools;
use log::debug;

use super::Relation;
use crate::basic_types::ConstraintOperationError;
use crate::engine::ConstraintSatisfactionSolver;
use crate::predicate;
use crate::propagators::BinaryEqualsConstructor;
use crate::propagators::BinaryNotEqualsConstructor;
use crate::propagators::CountConstructor;
use crate::propagators::DistanceConstructor;
use crate::propagators::GlobalCardinalityConstructor;
use crate::propagators::LinearConstructor;
use crate::propagators::ReifiedConstructor;
use crate::variables::DomainId;

/// A relation over variables, posted with [`crate::Solver::add_constraint`].
///
/// See the functions in [`crate::constraints`] for the meaning of every variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    Equals {
        variable: DomainId,
        value: i32,
    },
    NotEquals {
        variable: DomainId,
        value: i32,
    },
    GreaterEqual {
        variable: DomainId,
        value: i32,
    },
    LessEqual {
        variable: DomainId,
        value: i32,
    },
    BinaryEquals {
        lhs: DomainId,
        rhs: DomainId,
        offset: i32,
    },
    BinaryNotEquals {
        lhs: DomainId,
        rhs: DomainId,
        offset: i32,
    },
    Count {
        value: i32,
        variables: Box<[DomainId]>,
        count: DomainId,
    },
    GlobalCardinality {
        variables: Box<[DomainId]>,
        values: Box<[i32]>,
        counts: Box<[DomainId]>,
        /// Whether the `variables` are restricted to the listed values.
        closed: bool,
    },
    Sum {
        variables: Box<[DomainId]>,
        relation: Relation,
        target: DomainId,
    },
    Distance {
        a: DomainId,
        b: DomainId,
        relation: Relation,
        bound: i32,
    },
    Reify {
        constraint: Box<Constraint>,
        reification: DomainId,
    },
}

/// The propagators of the constraints which have a negation.
enum Reifiable {
    Linear(LinearConstructor),
    BinaryEquals(BinaryEqualsConstructor),
    BinaryNotEquals(BinaryNotEqualsConstructor),
    Distance(DistanceConstructor),
}

impl Constraint {
    /// The name of the kind of constraint, used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Constraint::Equals { .. } => "Equals",
            Constraint::NotEquals { .. } => "NotEquals",
            Constraint::GreaterEqual { .. } => "GreaterEqual",
            Constraint::LessEqual { .. } => "LessEqual",
            Constraint::BinaryEquals { .. } => "BinaryEquals",
            Constraint::BinaryNotEquals { .. } => "BinaryNotEquals",
            Constraint::Count { .. } => "Count",
            Constraint::GlobalCardinality { closed: false, .. } => "GlobalCardinality",
            Constraint::GlobalCardinality { closed: true, .. } => "GlobalCardinalityClosed",
            Constraint::Sum { .. } => "Sum",
            Constraint::Distance { .. } => "Distance",
            Constraint::Reify { .. } => "Reify",
        }
    }

    /// Compiles the constraint into its propagators and adds them to the solver.
    pub(crate) fn post(
        self,
        solver: &mut ConstraintSatisfactionSolver,
    ) -> Result<(), ConstraintOperationError> {
        match self {
            Constraint::Count {
                value,
                variables,
                count,
            } => solver.add_propagator(CountConstructor {
                value,
                variables,
                count,
            }),

            Constraint::GlobalCardinality {
                variables,
                values,
                counts,
                closed,
            } => {
                check_cardinality_arguments(&values, &counts)?;
                solver.add_propagator(GlobalCardinalityConstructor {
                    variables,
                    values,
                    counts,
                    closed,
                })
            }

            Constraint::Reify {
                constraint,
                reification,
            } => {
                let name = constraint.name();
                let Some(reifiable) = constraint.into_reifiable() else {
                    return Err(ConstraintOperationError::UnsupportedReification(name));
                };

                solver.post_at_root(predicate!(reification >= 0))?;
                solver.post_at_root(predicate!(reification <= 1))?;

                debug!("Reifying {name} with {reification}");
                match reifiable {
                    Reifiable::Linear(constructor) => solver.add_propagator(ReifiedConstructor {
                        constructor,
                        reification,
                    }),
                    Reifiable::BinaryEquals(constructor) => {
                        solver.add_propagator(ReifiedConstructor {
                            constructor,
                            reification,
                        })
                    }
                    Reifiable::BinaryNotEquals(constructor) => {
                        solver.add_propagator(ReifiedConstructor {
                            constructor,
                            reification,
                        })
                    }
                    Reifiable::Distance(constructor) => {
                        solver.add_propagator(ReifiedConstructor {
                            constructor,
                            reification,
                        })
                    }
                }
            }

            constraint => match constraint.into_reifiable() {
                Some(Reifiable::Linear(constructor)) => solver.add_propagator(constructor),
                Some(Reifiable::BinaryEquals(constructor)) => solver.add_propagator(constructor),
                Some(Reifiable::BinaryNotEquals(constructor)) => {
                    solver.add_propagator(constructor)
                }
                Some(Reifiable::Distance(constructor)) => solver.add_propagator(constructor),
                None => unreachable!("every other constraint has a negation"),
            },
        }
    }

    fn into_reifiable(self) -> Option<Reifiable> {
        let reifiable = match self {
            Constraint::Equals { variable, value } => {
                Reifiable::Linear(LinearConstructor::new([(1, variable)], Relation::Equal, value))
            }
            Constraint::NotEquals { variable, value } => Reifiable::Linear(
                LinearConstructor::new([(1, variable)], Relation::NotEqual, value),
            ),
            Constraint::GreaterEqual { variable, value } => Reifiable::Linear(
                LinearConstructor::new([(1, variable)], Relation::GreaterEqual, value),
            ),
            Constraint::LessEqual { variable, value } => Reifiable::Linear(
                LinearConstructor::new([(1, variable)], Relation::LessEqual, value),
            ),
            Constraint::BinaryEquals { lhs, rhs, offset } => {
                Reifiable::BinaryEquals(BinaryEqualsConstructor { lhs, rhs, offset })
            }
            Constraint::BinaryNotEquals { lhs, rhs, offset } => {
                Reifiable::BinaryNotEquals(BinaryNotEqualsConstructor { lhs, rhs, offset })
            }
            Constraint::Sum {
                variables,
                relation,
                target,
            } => Reifiable::Linear(LinearConstructor::new(
                variables
                    .iter()
                    .map(|&variable| (1, variable))
                    .chain(std::iter::once((-1, target))),
                relation,
                0,
            )),
            Constraint::Distance {
                a,
                b,
                relation,
                bound,
            } => Reifiable::Distance(DistanceConstructor {
                a,
                b,
                relation,
                distance: bound,
            }),
            Constraint::Count { .. }
            | Constraint::GlobalCardinality { .. }
            | Constraint::Reify { .. } => return None,
        };

        Some(reifiable)
    }
}

fn check_cardinality_arguments(
    values: &[i32],
    counts: &[DomainId],
) -> Result<(), ConstraintOperationError> {
    if values.len() != counts.len() {
        return Err(ConstraintOperationError::MalformedConstraint {
            constraint: "GlobalCardinality",
            reason: format!(
                "{} values are tracked but {} counts are given",
                values.len(),
                counts.len()
            ),
        });
    }

    if let Some(duplicate) = values.iter().duplicates().next() {
        return Err(ConstraintOperationError::MalformedConstraint {
            constraint: "GlobalCardinality",
            reason: format!("the value {duplicate} is tracked more than once"),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints;

    fn solver_with_variables(
        bounds: &[(i32, i32)],
    ) -> (ConstraintSatisfactionSolver, Vec<DomainId>) {
        let mut solver = ConstraintSatisfactionSolver::default();
        let variables = bounds
            .iter()
            .map(|&(lower_bound, upper_bound)| {
                solver.state.assignments.grow(lower_bound, upper_bound)
            })
            .collect();
        (solver, variables)
    }

    #[test]
    fn sum_is_posted_as_linear_equality() {
        let (mut solver, variables) = solver_with_variables(&[(0, 3), (0, 3), (5, 5)]);

        constraints::sum(vec![variables[0], variables[1]], Relation::Equal, variables[2])
            .post(&mut solver)
            .expect("satisfiable at the root");

        assert_eq!(2, solver.state.assignments.get_lower_bound(variables[0]));
        assert_eq!(2, solver.state.assignments.get_lower_bound(variables[1]));
    }

    #[test]
    fn mismatched_cardinality_arguments_are_malformed() {
        let (mut solver, variables) = solver_with_variables(&[(0, 3), (0, 3), (0, 2)]);

        let result = constraints::global_cardinality(
            vec![variables[0], variables[1]],
            vec![1, 2],
            vec![variables[2]],
        )
        .post(&mut solver);

        assert!(matches!(
            result,
            Err(ConstraintOperationError::MalformedConstraint {
                constraint: "GlobalCardinality",
                ..
            })
        ));
    }

    #[test]
    fn duplicate_cardinality_values_are_malformed() {
        let (mut solver, variables) = solver_with_variables(&[(0, 3), (0, 2), (0, 2)]);

        let result = constraints::global_cardinality_closed(
            vec![variables[0]],
            vec![1, 1],
            vec![variables[1], variables[2]],
        )
        .post(&mut solver);

        assert!(matches!(
            result,
            Err(ConstraintOperationError::MalformedConstraint { .. })
        ));
    }

    #[test]
    fn count_cannot_be_reified() {
        let (mut solver, variables) = solver_with_variables(&[(0, 3), (0, 1), (0, 1)]);

        let result = constraints::reify(
            constraints::count(1, vec![variables[0]], variables[1]),
            variables[2],
        )
        .post(&mut solver);

        assert_eq!(
            Err(ConstraintOperationError::UnsupportedReification("Count")),
            result
        );
    }

    #[test]
    fn reification_restricts_to_zero_one() {
        let (mut solver, variables) = solver_with_variables(&[(0, 3), (-2, 5)]);

        constraints::reify(constraints::greater_equal(variables[0], 2), variables[1])
            .post(&mut solver)
            .expect("satisfiable at the root");

        assert_eq!(0, solver.state.assignments.get_lower_bound(variables[1]));
        assert_eq!(1, solver.state.assignments.get_upper_bound(variables[1]));
    }

    #[test]
    fn reified_equality_fixes_the_reification_when_entailed() {
        let (mut solver, variables) = solver_with_variables(&[(4, 4), (0, 1)]);

        constraints::reify(constraints::equals(variables[0], 4), variables[1])
            .post(&mut solver)
            .expect("satisfiable at the root");

        assert_eq!(Some(1), solver.state.assignments.get_assigned_value(variables[1]));
    }

    #[test]
    fn infeasible_constraint_reports_infeasible_propagator() {
        let (mut solver, variables) = solver_with_variables(&[(0, 3), (0, 3)]);

        let result = constraints::distance(variables[0], variables[1], Relation::GreaterEqual, 4)
            .post(&mut solver);

        assert_eq!(Err(ConstraintOperationError::InfeasiblePropagator), result);
        assert_eq!(
            Err(ConstraintOperationError::InfeasibleState),
            constraints::equals(variables[0], 1).post(&mut solver)
        );
    }
}
