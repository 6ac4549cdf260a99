//! Provides the [`Brancher`](crate::branching::Brancher) implementations of the solver.
pub mod independent_variable_value_brancher;
