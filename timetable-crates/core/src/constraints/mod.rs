//! A constraint is a relation over variables. In the solver, constraints are enforced through
//! propagators, and therefore constraints can be viewed as a collection of propagators.
//!
//! Constraints are plain values of the [`Constraint`] enum; the functions in this module create
//! them and [`crate::Solver::add_constraint`] posts them. A [`Constraint::Reify`] binds a 0-1
//! variable to the truth of another constraint, which is supported for every constraint which
//! has a negation that can be propagated (all but [`Constraint::Count`],
//! [`Constraint::GlobalCardinality`] and nested reifications).
mod constraint;

pub use constraint::Constraint;

use crate::variables::DomainId;

/// The comparison of a constraint with its right-hand side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    Equal,
    NotEqual,
    LessEqual,
    GreaterEqual,
}

impl std::fmt::Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Relation::Equal => write!(f, "=="),
            Relation::NotEqual => write!(f, "!="),
            Relation::LessEqual => write!(f, "<="),
            Relation::GreaterEqual => write!(f, ">="),
        }
    }
}

/// Creates the [`Constraint`] `variable == value`.
pub fn equals(variable: DomainId, value: i32) -> Constraint {
    Constraint::Equals { variable, value }
}

/// Creates the [`Constraint`] `variable != value`.
pub fn not_equals(variable: DomainId, value: i32) -> Constraint {
    Constraint::NotEquals { variable, value }
}

/// Creates the [`Constraint`] `variable >= value`.
pub fn greater_equal(variable: DomainId, value: i32) -> Constraint {
    Constraint::GreaterEqual { variable, value }
}

/// Creates the [`Constraint`] `variable <= value`.
pub fn less_equal(variable: DomainId, value: i32) -> Constraint {
    Constraint::LessEqual { variable, value }
}

/// Creates the [`Constraint`] `lhs == rhs + offset`.
pub fn binary_equals(lhs: DomainId, rhs: DomainId, offset: i32) -> Constraint {
    Constraint::BinaryEquals { lhs, rhs, offset }
}

/// Creates the [`Constraint`] `lhs != rhs + offset`.
pub fn binary_not_equals(lhs: DomainId, rhs: DomainId, offset: i32) -> Constraint {
    Constraint::BinaryNotEquals { lhs, rhs, offset }
}

/// Creates the [`Constraint`] which states that exactly `count` of the `variables` take
/// `value`.
pub fn count(value: i32, variables: impl Into<Box<[DomainId]>>, count: DomainId) -> Constraint {
    Constraint::Count {
        value,
        variables: variables.into(),
        count,
    }
}

/// Creates the [`Constraint`] which states that, for every `i`, exactly `counts[i]` of the
/// `variables` take `values[i]`. Values which are not listed are unconstrained.
pub fn global_cardinality(
    variables: impl Into<Box<[DomainId]>>,
    values: impl Into<Box<[i32]>>,
    counts: impl Into<Box<[DomainId]>>,
) -> Constraint {
    Constraint::GlobalCardinality {
        variables: variables.into(),
        values: values.into(),
        counts: counts.into(),
        closed: false,
    }
}

/// As [`global_cardinality`], but the `variables` may only take the listed `values`.
pub fn global_cardinality_closed(
    variables: impl Into<Box<[DomainId]>>,
    values: impl Into<Box<[i32]>>,
    counts: impl Into<Box<[DomainId]>>,
) -> Constraint {
    Constraint::GlobalCardinality {
        variables: variables.into(),
        values: values.into(),
        counts: counts.into(),
        closed: true,
    }
}

/// Creates the [`Constraint`] `Σ variables <relation> target`.
pub fn sum(
    variables: impl Into<Box<[DomainId]>>,
    relation: Relation,
    target: DomainId,
) -> Constraint {
    Constraint::Sum {
        variables: variables.into(),
        relation,
        target,
    }
}

/// Creates the [`Constraint`] `|a - b| <relation> bound`.
pub fn distance(a: DomainId, b: DomainId, relation: Relation, bound: i32) -> Constraint {
    Constraint::Distance {
        a,
        b,
        relation,
        bound,
    }
}

/// Creates the [`Constraint`] `reification <-> constraint`; the `reification` variable is
/// restricted to `{0, 1}` when the constraint is posted.
pub fn reify(constraint: Constraint, reification: DomainId) -> Constraint {
    Constraint::Reify {
        constraint: Box::new(constraint),
        reification,
    }
}
