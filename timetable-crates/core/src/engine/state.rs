use log::trace;

use crate::basic_types::Inconsistency;
use crate::containers::KeyedVec;
use crate::create_statistics_struct;
use crate::engine::cp::PropagatorQueue;
use crate::engine::cp::Snapshot;
use crate::engine::cp::WatchList;
use crate::engine::propagation::Priority;
use crate::engine::propagation::PropagationContextMut;
use crate::engine::propagation::Propagator;
use crate::engine::propagation::PropagatorConstructor;
use crate::engine::propagation::PropagatorConstructorContext;
use crate::engine::propagation::PropagatorId;
use crate::engine::propagation::PropagatorOutcome;
use crate::engine::Assignments;
use crate::statistics::Statistic;
use crate::statistics::StatisticLogger;
use crate::timetable_assert_advanced;
use crate::variables::DomainId;

create_statistics_struct!(
    /// Counters of the propagation engine.
    PropagationStatistics {
        /// The number of calls to a propagator
        num_propagator_calls: u64,
        /// The number of calls which left every domain unchanged
        num_fixed_outcomes: u64,
        /// The number of calls which narrowed at least one domain
        num_changed_outcomes: u64,
        /// The number of calls which reported an inconsistency
        num_failed_outcomes: u64,
});

/// A propagator reported an inconsistency while running to the fixed point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Conflict {
    pub(crate) propagator_id: PropagatorId,
    pub(crate) inconsistency: Inconsistency,
}

/// The propagation engine: the domain store together with the propagators posted over it.
///
/// Changes to the domains are turned into [`crate::engine::cp::DomainEvent`]s; every
/// propagator watching a changed variable for that event is marked dirty and enqueued.
/// [`State::propagate_to_fixed_point`] pops dirty propagators until the queue runs empty or one
/// of them fails.
#[derive(Debug, Default)]
pub(crate) struct State {
    pub(crate) assignments: Assignments,
    propagators: KeyedVec<PropagatorId, Box<dyn Propagator>>,
    priorities: KeyedVec<PropagatorId, Priority>,
    scopes: KeyedVec<PropagatorId, Box<[DomainId]>>,
    watch_list: WatchList,
    propagator_queue: PropagatorQueue,
    /// The variables narrowed since [`State::take_narrowed_domains`] was last called.
    narrowed_domains: Vec<DomainId>,
    is_narrowed: KeyedVec<DomainId, bool>,
    pub(crate) statistics: PropagationStatistics,
}

impl State {
    /// Creates the propagator and enqueues it, so that its first call happens during the next
    /// propagation.
    pub(crate) fn add_propagator<Constructor: PropagatorConstructor>(
        &mut self,
        constructor: Constructor,
    ) -> PropagatorId {
        let propagator_id = PropagatorId(self.propagators.len() as u32);

        let mut context = PropagatorConstructorContext::new(propagator_id, &mut self.watch_list);
        let propagator = constructor.create(&mut context);
        let scope = context.into_scope();

        trace!(
            "Posted {} as {propagator_id} over {} variables",
            propagator.name(),
            scope.len()
        );

        let priority = propagator.priority();
        let _ = self.propagators.push(Box::new(propagator));
        let _ = self.priorities.push(priority);
        let _ = self.scopes.push(scope.into_boxed_slice());

        self.propagator_queue
            .enqueue_propagator(propagator_id, priority);

        propagator_id
    }

    /// The variables the propagator registered for.
    pub(crate) fn scope(&self, propagator_id: PropagatorId) -> &[DomainId] {
        &self.scopes[propagator_id]
    }

    pub(crate) fn propagator_name(&self, propagator_id: PropagatorId) -> &str {
        self.propagators[propagator_id].name()
    }

    /// Runs dirty propagators until none is left or one of them fails.
    ///
    /// On failure the queue is emptied and the domains are left as they were at the moment of
    /// failure; the caller is expected to backtrack.
    pub(crate) fn propagate_to_fixed_point(&mut self) -> Result<(), Conflict> {
        self.notify_pending_events();

        while let Some(propagator_id) = self.propagator_queue.pop() {
            match self.propagate_once(propagator_id) {
                PropagatorOutcome::Fixed => {}
                PropagatorOutcome::Changed => self.notify_pending_events(),
                PropagatorOutcome::Failed(inconsistency) => {
                    self.record_pending_events_without_enqueueing();
                    self.propagator_queue.clear();

                    trace!(
                        "{} ({propagator_id}) failed with {inconsistency:?}",
                        self.propagator_name(propagator_id)
                    );

                    return Err(Conflict {
                        propagator_id,
                        inconsistency,
                    });
                }
            }
        }
        timetable_assert_advanced!(self.propagator_queue.is_empty());

        Ok(())
    }

    /// Calls a single propagator and classifies the effect of the call.
    pub(crate) fn propagate_once(&mut self, propagator_id: PropagatorId) -> PropagatorOutcome {
        self.statistics.num_propagator_calls += 1;

        let context = PropagationContextMut::new(&mut self.assignments);
        let outcome = match self.propagators[propagator_id].propagate(context) {
            Err(inconsistency) => PropagatorOutcome::Failed(inconsistency),
            Ok(()) if self.assignments.has_pending_events() => PropagatorOutcome::Changed,
            Ok(()) => PropagatorOutcome::Fixed,
        };

        match outcome {
            PropagatorOutcome::Fixed => self.statistics.num_fixed_outcomes += 1,
            PropagatorOutcome::Changed => self.statistics.num_changed_outcomes += 1,
            PropagatorOutcome::Failed(_) => self.statistics.num_failed_outcomes += 1,
        }

        outcome
    }

    /// Opens a new decision level; [`State::restore`] with the returned snapshot undoes every
    /// domain change made after this call.
    pub(crate) fn snapshot(&mut self) -> Snapshot {
        self.assignments.snapshot()
    }

    pub(crate) fn restore(&mut self, snapshot: Snapshot) {
        self.assignments.restore(snapshot);
        self.propagator_queue.clear();
    }

    /// Undoes every domain change made after `decision_level` was entered.
    pub(crate) fn restore_to(&mut self, decision_level: usize) {
        self.assignments.synchronise(decision_level);
        self.propagator_queue.clear();
    }

    /// The variables which were narrowed since the previous call, each reported once.
    pub(crate) fn take_narrowed_domains(&mut self) -> Vec<DomainId> {
        for &domain_id in self.narrowed_domains.iter() {
            self.is_narrowed[domain_id] = false;
        }
        std::mem::take(&mut self.narrowed_domains)
    }

    fn notify_pending_events(&mut self) {
        for (domain_id, event) in self.assignments.drain_events() {
            for propagator_id in self.watch_list.watchers(domain_id, event) {
                self.propagator_queue
                    .enqueue_propagator(propagator_id, self.priorities[propagator_id]);
            }

            self.is_narrowed.accomodate(domain_id, false);
            if !self.is_narrowed[domain_id] {
                self.is_narrowed[domain_id] = true;
                self.narrowed_domains.push(domain_id);
            }
        }
    }

    fn record_pending_events_without_enqueueing(&mut self) {
        for (domain_id, _) in self.assignments.drain_events() {
            self.is_narrowed.accomodate(domain_id, false);
            if !self.is_narrowed[domain_id] {
                self.is_narrowed[domain_id] = true;
                self.narrowed_domains.push(domain_id);
            }
        }
    }

    pub(crate) fn log_statistics(&self, statistic_logger: StatisticLogger) {
        self.statistics.log(statistic_logger);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_types::PropagationStatusCP;
    use crate::engine::propagation::PropagationContext;
    use crate::engine::propagation::ReadDomains;
    use crate::engine::DomainEvents;

    /// `x < y`, propagated on bounds.
    #[derive(Debug, Clone, Copy)]
    struct LessThan {
        x: DomainId,
        y: DomainId,
    }

    impl PropagatorConstructor for LessThan {
        type PropagatorImpl = LessThan;

        fn create(self, context: &mut PropagatorConstructorContext<'_>) -> Self::PropagatorImpl {
            context.register(self.x, DomainEvents::BOUNDS);
            context.register(self.y, DomainEvents::BOUNDS);
            self
        }
    }

    impl Propagator for LessThan {
        fn name(&self) -> &str {
            "LessThan"
        }

        fn propagate(&self, mut context: PropagationContextMut) -> PropagationStatusCP {
            let y_upper = context.upper_bound(self.y);
            context.set_upper_bound(self.x, y_upper - 1)?;
            let x_lower = context.lower_bound(self.x);
            context.set_lower_bound(self.y, x_lower + 1)?;
            Ok(())
        }

        fn detect_inconsistency(&self, context: PropagationContext) -> bool {
            context.lower_bound(self.x) >= context.upper_bound(self.y)
        }
    }

    #[test]
    fn chain_reaches_fixed_point() {
        let mut state = State::default();
        let a = state.assignments.grow(0, 5);
        let b = state.assignments.grow(0, 5);
        let c = state.assignments.grow(0, 5);

        let _ = state.add_propagator(LessThan { x: a, y: b });
        let _ = state.add_propagator(LessThan { x: b, y: c });

        assert_eq!(Ok(()), state.propagate_to_fixed_point());
        assert_eq!(3, state.assignments.get_upper_bound(a));
        assert_eq!(1, state.assignments.get_lower_bound(b));
        assert_eq!(4, state.assignments.get_upper_bound(b));
        assert_eq!(2, state.assignments.get_lower_bound(c));

        let narrowed = state.take_narrowed_domains();
        assert_eq!(3, narrowed.len());
        assert!(state.take_narrowed_domains().is_empty());
    }

    #[test]
    fn cycle_is_reported_as_conflict() {
        let mut state = State::default();
        let a = state.assignments.grow(0, 5);
        let b = state.assignments.grow(0, 5);

        let _ = state.add_propagator(LessThan { x: a, y: b });
        let _ = state.add_propagator(LessThan { x: b, y: a });

        let conflict = state
            .propagate_to_fixed_point()
            .expect_err("a < b < a is inconsistent");
        assert!(matches!(
            conflict.inconsistency,
            Inconsistency::EmptyDomain(_)
        ));
        assert_eq!(1, state.statistics.num_failed_outcomes);
    }

    #[test]
    fn a_call_at_the_fixed_point_changes_nothing() {
        let mut state = State::default();
        let a = state.assignments.grow(0, 5);
        let b = state.assignments.grow(0, 5);

        let propagator_id = state.add_propagator(LessThan { x: a, y: b });
        assert_eq!(Ok(()), state.propagate_to_fixed_point());

        assert_eq!(PropagatorOutcome::Fixed, state.propagate_once(propagator_id));
    }

    #[test]
    fn restoring_undoes_propagation() {
        let mut state = State::default();
        let a = state.assignments.grow(0, 5);
        let b = state.assignments.grow(0, 5);
        let _ = state.add_propagator(LessThan { x: a, y: b });
        assert_eq!(Ok(()), state.propagate_to_fixed_point());

        state.assignments.new_checkpoint();
        let _ = state.assignments.tighten_lower_bound(a, 3);
        assert_eq!(Ok(()), state.propagate_to_fixed_point());
        assert_eq!(4, state.assignments.get_lower_bound(b));

        state.restore_to(0);
        assert_eq!(0, state.assignments.get_lower_bound(a));
        assert_eq!(1, state.assignments.get_lower_bound(b));
        assert_eq!(
            vec![a, b],
            state.scope(PropagatorId(0)).to_vec()
        );
    }
}
