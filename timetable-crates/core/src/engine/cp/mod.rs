mod assignments;
mod domain_events;
mod propagator_queue;
mod watch_list;

pub(crate) use assignments::Assignments;
pub(crate) use assignments::Snapshot;
pub(crate) use domain_events::DomainEvent;
pub(crate) use domain_events::DomainEvents;
pub(crate) use propagator_queue::PropagatorQueue;
pub(crate) use watch_list::WatchList;
