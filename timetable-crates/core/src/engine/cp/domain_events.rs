use enumset::enum_set;
use enumset::EnumSet;
use enumset::EnumSetType;

/// A kind of change to the domain of a variable.
#[derive(Debug, EnumSetType)]
pub(crate) enum DomainEvent {
    /// The domain became a single value.
    Assign,
    /// The lower bound increased.
    LowerBound,
    /// The upper bound decreased.
    UpperBound,
    /// A value strictly between the bounds was removed.
    Removal,
}

/// The set of [`DomainEvent`]s a propagator subscribes to for one of its variables.
#[derive(Debug, Copy, Clone)]
pub(crate) struct DomainEvents {
    events: EnumSet<DomainEvent>,
}

impl DomainEvents {
    /// Any change to the domain.
    pub(crate) const ANY_INT: DomainEvents = DomainEvents::new(enum_set!(
        DomainEvent::Assign
            | DomainEvent::LowerBound
            | DomainEvent::UpperBound
            | DomainEvent::Removal
    ));
    /// Lower and upper bound tightening, but not the removal of inner values.
    pub(crate) const BOUNDS: DomainEvents = DomainEvents::new(enum_set!(
        DomainEvent::Assign | DomainEvent::LowerBound | DomainEvent::UpperBound
    ));
    /// Only the domain becoming a single value.
    pub(crate) const ASSIGN: DomainEvents = DomainEvents::new(enum_set!(DomainEvent::Assign));

    pub(crate) const fn new(events: EnumSet<DomainEvent>) -> DomainEvents {
        DomainEvents { events }
    }

    pub(crate) fn events(&self) -> EnumSet<DomainEvent> {
        self.events
    }
}
