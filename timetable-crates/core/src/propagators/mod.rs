//! Contains propagator implementations that are used in the solver.
pub(crate) mod arithmetic;
pub(crate) mod count;
pub(crate) mod global_cardinality;
pub(crate) mod reified_propagator;

pub(crate) use arithmetic::*;
pub(crate) use count::*;
pub(crate) use global_cardinality::*;
pub(crate) use reified_propagator::*;
