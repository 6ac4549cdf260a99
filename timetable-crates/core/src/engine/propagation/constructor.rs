use fnv::FnvHashSet;

use super::Propagator;
use super::PropagatorId;
use crate::engine::cp::WatchList;
use crate::engine::DomainEvents;
use crate::variables::DomainId;

/// A propagator constructor creates a fully initialized instance of a [`Propagator`].
///
/// The constructor is responsible for indicating on which events the propagator should be
/// enqueued.
pub(crate) trait PropagatorConstructor {
    /// The propagator that is produced by this constructor.
    type PropagatorImpl: Propagator + 'static;

    /// Create the propagator instance from `Self`.
    fn create(self, context: &mut PropagatorConstructorContext<'_>) -> Self::PropagatorImpl;
}

/// A constructor whose constraint has a negation which can itself be propagated; only these can
/// be reified.
pub(crate) trait ReifiableConstructor: PropagatorConstructor {
    type Negation: PropagatorConstructor;

    fn negation(&self) -> Self::Negation;
}

/// The communication point between the engine and a [`PropagatorConstructor`].
///
/// Propagators use it to register for domain changes of their variables. The registered
/// variables form the scope of the propagator, which the search heuristics use to attribute
/// failures to variables.
#[derive(Debug)]
pub(crate) struct PropagatorConstructorContext<'a> {
    watch_list: &'a mut WatchList,
    propagator_id: PropagatorId,
    scope: Vec<DomainId>,
    in_scope: FnvHashSet<DomainId>,
}

impl<'a> PropagatorConstructorContext<'a> {
    pub(crate) fn new(propagator_id: PropagatorId, watch_list: &'a mut WatchList) -> Self {
        PropagatorConstructorContext {
            watch_list,
            propagator_id,
            scope: Vec::new(),
            in_scope: FnvHashSet::default(),
        }
    }

    /// Subscribes the propagator to the given [`DomainEvents`] of `var`.
    pub(crate) fn register(&mut self, var: DomainId, domain_events: DomainEvents) {
        self.watch_list
            .watch(var, self.propagator_id, domain_events.events());

        if self.in_scope.insert(var) {
            self.scope.push(var);
        }
    }

    pub(crate) fn into_scope(self) -> Vec<DomainId> {
        self.scope
    }
}
