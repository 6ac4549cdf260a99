//! The interface between propagators and the engine.
//!
//! A propagator is created from a [`PropagatorConstructor`], which subscribes it to the domain
//! events of its variables. Whenever one of those events happens the engine enqueues the
//! propagator; [`Propagator::propagate`] then removes the values which cannot be part of any
//! solution given the current domains, or reports an [`crate::basic_types::Inconsistency`].
pub(crate) mod constructor;
pub(crate) mod contexts;
pub(crate) mod propagator;
pub(crate) mod propagator_id;

pub(crate) use constructor::PropagatorConstructor;
pub(crate) use constructor::PropagatorConstructorContext;
pub(crate) use constructor::ReifiableConstructor;
pub(crate) use contexts::PropagationContext;
pub(crate) use contexts::PropagationContextMut;
pub(crate) use contexts::ReadDomains;
pub(crate) use propagator::Priority;
pub(crate) use propagator::Propagator;
pub(crate) use propagator::PropagatorOutcome;
pub(crate) use propagator_id::PropagatorId;
