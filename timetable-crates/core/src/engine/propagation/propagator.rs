use std::fmt::Debug;

use super::PropagationContext;
use super::PropagationContextMut;
use crate::basic_types::Inconsistency;
use crate::basic_types::PropagationStatusCP;

/// A propagator removes values from domains which will never be in any solution, or reports
/// that the current domains are inconsistent.
///
/// Propagators keep no state between calls; everything they reason about is read from the
/// domains. They are not required to reach a fixed point themselves: the engine calls them
/// again whenever one of their variables changes, including through their own changes.
pub(crate) trait Propagator: Debug {
    /// Return the name of the propagator, used for logging.
    fn name(&self) -> &str;

    /// Filters the domains of the variables of this propagator.
    ///
    /// Returns [`Err`] when the domains cannot be extended to a solution of the constraint,
    /// either because a posted restriction emptied a domain or because the propagator detected
    /// the violation itself.
    fn propagate(&self, context: PropagationContextMut) -> PropagationStatusCP;

    /// The bucket of the queue this propagator is placed in; cheap propagators run first.
    fn priority(&self) -> Priority {
        Priority::VeryLow
    }

    /// Returns whether the current domains are already known to violate the constraint,
    /// without changing any domain.
    ///
    /// A reified propagator uses this to decide its reification variable. Returning `false`
    /// is always sound.
    fn detect_inconsistency(&self, _context: PropagationContext) -> bool {
        false
    }
}

/// The priority of a propagator; lower values are popped from the queue first.
#[derive(Default, Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub(crate) enum Priority {
    High = 0,
    Medium = 1,
    Low = 2,
    #[default]
    VeryLow = 3,
}

impl Priority {
    pub(crate) const NUM_LEVELS: u32 = 4;
}

/// The effect of a single call to [`Propagator::propagate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PropagatorOutcome {
    /// No domain changed; the propagator is at its fixed point.
    Fixed,
    /// At least one domain was narrowed.
    Changed,
    /// The domains are inconsistent with the constraint.
    Failed(Inconsistency),
}
