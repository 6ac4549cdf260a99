use std::vec::Drain;

use super::DomainEvent;
use crate::basic_types::EmptyDomain;
use crate::basic_types::Trail;
use crate::containers::KeyedVec;
use crate::containers::StorageKey;
use crate::predicates::Predicate;
use crate::timetable_assert_moderate;
use crate::timetable_assert_simple;
use crate::variables::DomainId;

/// The domain store: the current set of admissible values of every variable.
///
/// Domains only shrink; every change is recorded on a trail so that
/// [`Assignments::synchronise`] (and [`Assignments::restore`]) can undo it exactly. A restriction
/// which would empty a domain is refused with [`EmptyDomain`] and leaves the store unchanged.
#[derive(Clone, Debug, Default)]
pub(crate) struct Assignments {
    domains: KeyedVec<DomainId, IntegerDomain>,
    trail: Trail<TrailEntry>,
    /// The events which have not been handed to the propagation engine yet.
    events: Vec<(DomainId, DomainEvent)>,
}

/// A point on the trail to which the domain store can be restored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Snapshot {
    checkpoint: usize,
}

#[derive(Clone, Copy, Debug)]
struct TrailEntry {
    domain_id: DomainId,
    old_lower_bound: i32,
    old_upper_bound: i32,
    old_size: u32,
    /// Set when the change punched a hole strictly between the bounds.
    removed_value: Option<i32>,
}

#[derive(Clone, Debug)]
struct IntegerDomain {
    initial_lower_bound: i32,
    lower_bound: i32,
    upper_bound: i32,
    size: u32,
    /// Whether `initial_lower_bound + i` has not been removed as a hole; values outside the
    /// bounds are absent regardless of this flag.
    present: Vec<bool>,
}

impl IntegerDomain {
    fn new(values: &[i32]) -> IntegerDomain {
        timetable_assert_simple!(!values.is_empty());
        timetable_assert_moderate!(values.windows(2).all(|pair| pair[0] < pair[1]));

        let lower_bound = values[0];
        let upper_bound = values[values.len() - 1];
        let width = (upper_bound as i64 - lower_bound as i64 + 1) as usize;

        let mut present = vec![false; width];
        for &value in values {
            present[(value as i64 - lower_bound as i64) as usize] = true;
        }

        IntegerDomain {
            initial_lower_bound: lower_bound,
            lower_bound,
            upper_bound,
            size: values.len() as u32,
            present,
        }
    }

    fn new_bounded(lower_bound: i32, upper_bound: i32) -> IntegerDomain {
        timetable_assert_simple!(lower_bound <= upper_bound);
        let width = (upper_bound as i64 - lower_bound as i64 + 1) as usize;

        IntegerDomain {
            initial_lower_bound: lower_bound,
            lower_bound,
            upper_bound,
            size: width as u32,
            present: vec![true; width],
        }
    }

    fn offset(&self, value: i32) -> usize {
        (value as i64 - self.initial_lower_bound as i64) as usize
    }

    fn contains(&self, value: i32) -> bool {
        self.lower_bound <= value && value <= self.upper_bound && self.present[self.offset(value)]
    }

    /// The smallest value in the domain which is at least `value`.
    fn first_value_from(&self, value: i32) -> Option<i32> {
        (value.max(self.lower_bound)..=self.upper_bound).find(|&v| self.present[self.offset(v)])
    }

    /// The largest value in the domain which is at most `value`.
    fn last_value_until(&self, value: i32) -> Option<i32> {
        (self.lower_bound..=value.min(self.upper_bound))
            .rev()
            .find(|&v| self.present[self.offset(v)])
    }

    fn count_values(&self, from: i32, to: i32) -> u32 {
        (from.max(self.lower_bound)..=to.min(self.upper_bound))
            .filter(|&v| self.present[self.offset(v)])
            .count() as u32
    }

    fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        (self.lower_bound..=self.upper_bound).filter(|&v| self.present[self.offset(v)])
    }
}

// Creating variables and reading domains.
impl Assignments {
    pub(crate) fn grow(&mut self, lower_bound: i32, upper_bound: i32) -> DomainId {
        self.domains
            .push(IntegerDomain::new_bounded(lower_bound, upper_bound))
    }

    /// Creates a variable with exactly the given values; `values` does not need to be sorted.
    pub(crate) fn grow_sparse(&mut self, mut values: Vec<i32>) -> DomainId {
        values.sort_unstable();
        values.dedup();
        self.domains.push(IntegerDomain::new(&values))
    }

    pub(crate) fn num_domains(&self) -> usize {
        self.domains.len()
    }

    pub(crate) fn domains(&self) -> impl Iterator<Item = DomainId> {
        (0..self.domains.len()).map(DomainId::create_from_index)
    }

    pub(crate) fn get_lower_bound(&self, domain_id: DomainId) -> i32 {
        self.domains[domain_id].lower_bound
    }

    pub(crate) fn get_upper_bound(&self, domain_id: DomainId) -> i32 {
        self.domains[domain_id].upper_bound
    }

    pub(crate) fn get_domain_size(&self, domain_id: DomainId) -> u32 {
        self.domains[domain_id].size
    }

    pub(crate) fn is_value_in_domain(&self, domain_id: DomainId, value: i32) -> bool {
        self.domains[domain_id].contains(value)
    }

    pub(crate) fn is_fixed(&self, domain_id: DomainId) -> bool {
        self.domains[domain_id].size == 1
    }

    pub(crate) fn get_assigned_value(&self, domain_id: DomainId) -> Option<i32> {
        self.is_fixed(domain_id)
            .then(|| self.get_lower_bound(domain_id))
    }

    pub(crate) fn domain_iter(&self, domain_id: DomainId) -> impl Iterator<Item = i32> + '_ {
        self.domains[domain_id].iter()
    }

    pub(crate) fn is_predicate_satisfied(&self, predicate: Predicate) -> bool {
        let domain_id = predicate.get_domain();
        match predicate {
            Predicate::LowerBound { lower_bound, .. } => {
                self.get_lower_bound(domain_id) >= lower_bound
            }
            Predicate::UpperBound { upper_bound, .. } => {
                self.get_upper_bound(domain_id) <= upper_bound
            }
            Predicate::NotEqual {
                not_equal_constant, ..
            } => !self.is_value_in_domain(domain_id, not_equal_constant),
            Predicate::Equal {
                equality_constant, ..
            } => self.get_assigned_value(domain_id) == Some(equality_constant),
        }
    }

    pub(crate) fn is_predicate_falsified(&self, predicate: Predicate) -> bool {
        self.is_predicate_satisfied(!predicate)
    }
}

// Restricting domains.
impl Assignments {
    /// Removes every value below `new_lower_bound`. Returns whether the domain changed.
    pub(crate) fn tighten_lower_bound(
        &mut self,
        domain_id: DomainId,
        new_lower_bound: i32,
    ) -> Result<bool, EmptyDomain> {
        let domain = &self.domains[domain_id];
        if new_lower_bound <= domain.lower_bound {
            return Ok(false);
        }

        let Some(new_lower_bound) = domain.first_value_from(new_lower_bound) else {
            return Err(EmptyDomain { domain_id });
        };
        let num_removed = domain.count_values(domain.lower_bound, new_lower_bound - 1);

        self.record_change(domain_id, None);

        let domain = &mut self.domains[domain_id];
        domain.lower_bound = new_lower_bound;
        domain.size -= num_removed;

        self.events.push((domain_id, DomainEvent::LowerBound));
        if domain.size == 1 {
            self.events.push((domain_id, DomainEvent::Assign));
        }

        Ok(true)
    }

    /// Removes every value above `new_upper_bound`. Returns whether the domain changed.
    pub(crate) fn tighten_upper_bound(
        &mut self,
        domain_id: DomainId,
        new_upper_bound: i32,
    ) -> Result<bool, EmptyDomain> {
        let domain = &self.domains[domain_id];
        if new_upper_bound >= domain.upper_bound {
            return Ok(false);
        }

        let Some(new_upper_bound) = domain.last_value_until(new_upper_bound) else {
            return Err(EmptyDomain { domain_id });
        };
        let num_removed = domain.count_values(new_upper_bound + 1, domain.upper_bound);

        self.record_change(domain_id, None);

        let domain = &mut self.domains[domain_id];
        domain.upper_bound = new_upper_bound;
        domain.size -= num_removed;

        self.events.push((domain_id, DomainEvent::UpperBound));
        if domain.size == 1 {
            self.events.push((domain_id, DomainEvent::Assign));
        }

        Ok(true)
    }

    /// Removes `value` from the domain. Returns whether the domain changed.
    pub(crate) fn remove_value_from_domain(
        &mut self,
        domain_id: DomainId,
        value: i32,
    ) -> Result<bool, EmptyDomain> {
        let domain = &self.domains[domain_id];
        if !domain.contains(value) {
            return Ok(false);
        }
        if domain.size == 1 {
            return Err(EmptyDomain { domain_id });
        }

        if value == domain.lower_bound {
            return self.tighten_lower_bound(domain_id, value + 1);
        }
        if value == domain.upper_bound {
            return self.tighten_upper_bound(domain_id, value - 1);
        }

        self.record_change(domain_id, Some(value));

        let domain = &mut self.domains[domain_id];
        let offset = domain.offset(value);
        domain.present[offset] = false;
        domain.size -= 1;

        self.events.push((domain_id, DomainEvent::Removal));

        Ok(true)
    }

    /// Reduces the domain to `value`. Returns whether the domain changed.
    pub(crate) fn make_assignment(
        &mut self,
        domain_id: DomainId,
        value: i32,
    ) -> Result<bool, EmptyDomain> {
        if !self.is_value_in_domain(domain_id, value) {
            return Err(EmptyDomain { domain_id });
        }

        let lower_bound_changed = self.tighten_lower_bound(domain_id, value)?;
        let upper_bound_changed = self.tighten_upper_bound(domain_id, value)?;

        Ok(lower_bound_changed || upper_bound_changed)
    }

    /// Keeps only the values for which `keep` holds. Returns whether the domain changed.
    pub(crate) fn restrict(
        &mut self,
        domain_id: DomainId,
        keep: impl Fn(i32) -> bool,
    ) -> Result<bool, EmptyDomain> {
        let to_remove = self
            .domain_iter(domain_id)
            .filter(|&value| !keep(value))
            .collect::<Vec<_>>();

        if to_remove.len() as u32 == self.get_domain_size(domain_id) {
            return Err(EmptyDomain { domain_id });
        }

        for &value in to_remove.iter() {
            let _ = self.remove_value_from_domain(domain_id, value)?;
        }

        Ok(!to_remove.is_empty())
    }

    /// Makes `predicate` true. Returns whether the domain changed.
    pub(crate) fn post_predicate(&mut self, predicate: Predicate) -> Result<bool, EmptyDomain> {
        let domain_id = predicate.get_domain();
        match predicate {
            Predicate::LowerBound { lower_bound, .. } => {
                self.tighten_lower_bound(domain_id, lower_bound)
            }
            Predicate::UpperBound { upper_bound, .. } => {
                self.tighten_upper_bound(domain_id, upper_bound)
            }
            Predicate::NotEqual {
                not_equal_constant, ..
            } => self.remove_value_from_domain(domain_id, not_equal_constant),
            Predicate::Equal {
                equality_constant, ..
            } => self.make_assignment(domain_id, equality_constant),
        }
    }

    fn record_change(&mut self, domain_id: DomainId, removed_value: Option<i32>) {
        let domain = &self.domains[domain_id];
        self.trail.push(TrailEntry {
            domain_id,
            old_lower_bound: domain.lower_bound,
            old_upper_bound: domain.upper_bound,
            old_size: domain.size,
            removed_value,
        });
    }
}

// Events.
impl Assignments {
    pub(crate) fn has_pending_events(&self) -> bool {
        !self.events.is_empty()
    }

    pub(crate) fn drain_events(&mut self) -> Drain<'_, (DomainId, DomainEvent)> {
        self.events.drain(..)
    }
}

// Backtracking.
impl Assignments {
    pub(crate) fn new_checkpoint(&mut self) {
        self.trail.new_checkpoint();
    }

    pub(crate) fn get_decision_level(&self) -> usize {
        self.trail.get_checkpoint()
    }

    /// Undoes every change made after `new_checkpoint` was entered, most recent first.
    pub(crate) fn synchronise(&mut self, new_checkpoint: usize) {
        timetable_assert_simple!(new_checkpoint <= self.get_decision_level());
        self.events.clear();

        if new_checkpoint == self.get_decision_level() {
            return;
        }

        for entry in self.trail.synchronise(new_checkpoint) {
            let domain = &mut self.domains[entry.domain_id];
            domain.lower_bound = entry.old_lower_bound;
            domain.upper_bound = entry.old_upper_bound;
            domain.size = entry.old_size;

            if let Some(value) = entry.removed_value {
                let offset = domain.offset(value);
                domain.present[offset] = true;
            }
        }
    }

    pub(crate) fn snapshot(&mut self) -> Snapshot {
        let snapshot = Snapshot {
            checkpoint: self.get_decision_level(),
        };
        self.new_checkpoint();
        snapshot
    }

    pub(crate) fn restore(&mut self, snapshot: Snapshot) {
        self.synchronise(snapshot.checkpoint);
    }
}
