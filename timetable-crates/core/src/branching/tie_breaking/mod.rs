//! Contains structures for tie-breaking; these decide between variables when they are equally
//! good according to a [`crate::branching::variable_selection::VariableSelector`] (for example
//! two variables with the same domain size).
mod random_tie_breaker;

pub use random_tie_breaker::*;

/// Whether the value comparison should find the maximum [`Direction::Maximum`] variable or the
/// [`Direction::Minimum`] variable.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Maximum,
    Minimum,
}
