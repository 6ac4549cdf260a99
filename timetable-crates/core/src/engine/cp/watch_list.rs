use enumset::EnumSet;

use super::DomainEvent;
use crate::containers::KeyedVec;
use crate::engine::propagation::PropagatorId;
use crate::variables::DomainId;

/// For every variable, the propagators which are enqueued when its domain changes.
#[derive(Debug, Default, Clone)]
pub(crate) struct WatchList {
    watchers: KeyedVec<DomainId, Vec<Watcher>>,
}

#[derive(Debug, Clone, Copy)]
struct Watcher {
    propagator_id: PropagatorId,
    events: EnumSet<DomainEvent>,
}

impl WatchList {
    /// Subscribes `propagator_id` to `events` on `domain_id`. Registering the same propagator
    /// twice for a variable merges the event sets.
    pub(crate) fn watch(
        &mut self,
        domain_id: DomainId,
        propagator_id: PropagatorId,
        events: EnumSet<DomainEvent>,
    ) {
        self.watchers.accomodate(domain_id, Vec::new());

        let watchers = &mut self.watchers[domain_id];
        if let Some(watcher) = watchers
            .iter_mut()
            .find(|watcher| watcher.propagator_id == propagator_id)
        {
            watcher.events |= events;
        } else {
            watchers.push(Watcher {
                propagator_id,
                events,
            });
        }
    }

    /// The propagators watching `domain_id` for `event`.
    pub(crate) fn watchers(
        &self,
        domain_id: DomainId,
        event: DomainEvent,
    ) -> impl Iterator<Item = PropagatorId> + '_ {
        self.watchers
            .get(domain_id)
            .into_iter()
            .flatten()
            .filter(move |watcher| watcher.events.contains(event))
            .map(|watcher| watcher.propagator_id)
    }
}
