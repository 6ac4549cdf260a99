use log::warn;

use crate::branching::tie_breaking::Direction;
use crate::branching::tie_breaking::RandomTieBreaker;
use crate::branching::variable_selection::VariableSelector;
use crate::branching::SelectionContext;
use crate::containers::KeyedVec;
use crate::containers::StorageKey;
use crate::variables::DomainId;

/// A [`VariableSelector`] which selects the unfixed variable with the highest activity.
///
/// The activity of a variable is bumped whenever propagation narrows its domain and whenever it
/// takes part in a failing propagator. Bumps made after each failure weigh more than older ones
/// (the increment grows by `1 / decay_factor` per failure), in the style of VSIDS \[1\]. Ties are
/// broken uniformly at random.
///
/// # Bibliography
/// \[1\] L. Michel and P. Van Hentenryck, ‘Activity-based search for black-box constraint
/// programming solvers’, in CPAIOR, 2012, pp. 228–243.
#[derive(Debug)]
pub struct Activity {
    variables: Vec<DomainId>,
    activities: KeyedVec<DomainId, f64>,
    increment: f64,
    max_threshold: f64,
    decay_factor: f64,
    tie_breaker: RandomTieBreaker<DomainId, f64>,
}

const DEFAULT_ACTIVITY_INCREMENT: f64 = 1.0;
const DEFAULT_ACTIVITY_MAX_THRESHOLD: f64 = 1e100;
const DEFAULT_ACTIVITY_DECAY_FACTOR: f64 = 0.95;
const DEFAULT_ACTIVITY_VALUE: f64 = 0.0;

impl Activity {
    pub fn new(variables: &[DomainId]) -> Self {
        if variables.is_empty() {
            warn!("The Activity variable selector was not provided with any variables");
        }

        let mut activities = KeyedVec::default();
        for &variable in variables {
            activities.accomodate(variable, DEFAULT_ACTIVITY_VALUE);
        }

        Activity {
            variables: variables.to_vec(),
            activities,
            increment: DEFAULT_ACTIVITY_INCREMENT,
            max_threshold: DEFAULT_ACTIVITY_MAX_THRESHOLD,
            decay_factor: DEFAULT_ACTIVITY_DECAY_FACTOR,
            tie_breaker: RandomTieBreaker::new(Direction::Maximum),
        }
    }

    fn bump_activity(&mut self, variable: DomainId) {
        if variable.index() >= self.activities.len() {
            return;
        }

        // Scale the activities if the values are too large
        if self.activities[variable] + self.increment >= self.max_threshold {
            for activity in self.activities.iter_mut() {
                *activity /= self.max_threshold;
            }
            self.increment /= self.max_threshold;
        }

        self.activities[variable] += self.increment;
    }

    fn decay_activities(&mut self) {
        self.increment *= 1.0 / self.decay_factor;
    }
}

impl VariableSelector<DomainId> for Activity {
    fn select_variable(&mut self, context: &mut SelectionContext) -> Option<DomainId> {
        for &variable in self.variables.iter() {
            if context.is_integer_fixed(variable) {
                continue;
            }

            self.tie_breaker
                .consider(variable, self.activities[variable], context.random());
        }

        self.tie_breaker.select()
    }

    fn on_conflict(&mut self, scope: &[DomainId]) {
        for &variable in scope {
            self.bump_activity(variable);
        }
        self.decay_activities();
    }

    fn on_domains_narrowed(&mut self, variables: &[DomainId]) {
        for &variable in variables {
            self.bump_activity(variable);
        }
    }
}
