mod outputs;
pub(crate) mod solver;

pub use solver::DefaultBrancher;
pub use solver::Solver;

pub use crate::basic_types::ConstraintOperationError;
pub use crate::basic_types::EmptyDomain;
pub use crate::basic_types::Random;

pub mod results {
    //! Contains the outputs of solving using the [`Solver`].
    //!
    //! A search ends in one of three ways: a [`Solution`] is found, the problem is proven
    //! infeasible, or the search is stopped by a termination condition or the search budget
    //! before either could be established ([`SatisfactionResult::SearchExhausted`]).
    pub use crate::api::outputs::SatisfactionResult;
    pub use crate::basic_types::Solution;
    #[cfg(doc)]
    use crate::Solver;
}

pub mod variables {
    //! Contains the variables which are used by the [`Solver`].
    //!
    //! Integer variables are represented by [`DomainId`]s. They are created using
    //! [`Solver::new_bounded_integer`] when the domain is a range between a lower-bound and an
    //! upper-bound, or using [`Solver::new_sparse_integer`] when the domain has holes. Boolean
    //! variables are integer variables with the domain `{0, 1}` ([`Solver::new_boolean`]).
    pub use crate::engine::variables::DomainId;
    #[cfg(doc)]
    use crate::Solver;
}

pub mod options {
    //! Contains the options which can be passed to the [`Solver`].
    //!
    //! These influence the restart strategy, the default variable selection and the budget of
    //! every search.
    pub use crate::basic_types::sequence_generators::SequenceGeneratorType;
    pub use crate::branching::variable_selection::VariableSelection;
    pub use crate::engine::RestartOptions;
    pub use crate::engine::SearchBudget;
    pub use crate::engine::SolverOptions;
    #[cfg(doc)]
    use crate::Solver;
}

pub mod termination {
    //! Contains the conditions which are used to determine when the [`Solver`] should terminate
    //! even when the state of the satisfaction problem is unknown.
    //!
    //! The main [`TerminationCondition`] is a condition which is polled by the [`Solver`] during
    //! the search process. It indicates when the [`Solver`] should stop, even if no definitive
    //! conclusions have been made.
    //!
    //! The most common example would be [`TimeBudget`], which terminates the [`Solver`] whenever
    //! the time budget is exceeded.
    pub use crate::engine::termination::combinator::*;
    pub use crate::engine::termination::indefinite::*;
    pub use crate::engine::termination::time_budget::*;
    pub use crate::engine::termination::TerminationCondition;
    #[cfg(doc)]
    use crate::Solver;
}

pub mod predicates {
    //! Contains structures which represent atomic constraints over a single variable.
    //!
    //! A [`Predicate`] is one of `[x >= v]`, `[x <= v]`, `[x == v]` and `[x != v]`. Branchers
    //! return predicates as decisions; the `predicate!` macro builds them.
    pub use crate::engine::predicates::Predicate;
    pub use crate::engine::predicates::PredicateConstructor;
}

