use crate::containers::StorageKey;

/// A handle to an integer variable in the domain store of a [`crate::Solver`].
///
/// The handle carries no domain information itself; it is only meaningful for the solver which
/// created it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DomainId {
    pub(crate) id: u32,
}

#[cfg(test)]
impl DomainId {
    pub(crate) fn new(id: u32) -> Self {
        DomainId { id }
    }
}

impl StorageKey for DomainId {
    fn index(&self) -> usize {
        self.id as usize
    }

    fn create_from_index(index: usize) -> Self {
        DomainId { id: index as u32 }
    }
}

impl std::fmt::Display for DomainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "x{}", self.id)
    }
}

impl std::fmt::Debug for DomainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "x{}", self.id)
    }
}
