use thiserror::Error;

use crate::variables::DomainId;

/// The result of a propagation step; [`Err`] when the current domains cannot be extended to a
/// solution.
pub(crate) type PropagationStatusCP = Result<(), Inconsistency>;

/// A restriction of the domain store would leave `domain_id` without values.
///
/// The domain store is left untouched when this is returned.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("the domain of {domain_id} became empty")]
pub struct EmptyDomain {
    pub domain_id: DomainId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Inconsistency {
    /// Posting a domain restriction emptied a domain.
    EmptyDomain(DomainId),
    /// The propagator found the current domains inconsistent without emptying a domain.
    Violated,
}

impl From<EmptyDomain> for Inconsistency {
    fn from(empty_domain: EmptyDomain) -> Self {
        Inconsistency::EmptyDomain(empty_domain.domain_id)
    }
}
