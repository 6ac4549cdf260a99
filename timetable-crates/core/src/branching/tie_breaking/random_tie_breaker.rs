use super::Direction;
use crate::basic_types::Random;

/// A tie breaker which selects the variable with the "best" value (according to the
/// [`Direction`]); if there is a tie then it selects any of the tied variables with equal
/// probability.
///
/// A variable tying with the current selection replaces it with probability `1 / n`, where `n` is
/// the number of variables seen with that value so far (reservoir sampling).
#[derive(Debug)]
pub struct RandomTieBreaker<Var, Value> {
    selected: Option<(Var, Value)>,
    num_variables_considered: usize,
    direction: Direction,
}

impl<Var: Copy, Value: PartialOrd> RandomTieBreaker<Var, Value> {
    pub fn new(direction: Direction) -> Self {
        RandomTieBreaker {
            selected: None,
            num_variables_considered: 0,
            direction,
        }
    }

    /// Consider the next element with the corresponding value.
    pub fn consider(&mut self, variable: Var, value: Value, random: &mut dyn Random) {
        let Some((_, selected_value)) = self.selected.as_ref() else {
            self.num_variables_considered = 1;
            self.selected = Some((variable, value));
            return;
        };

        let is_better = match self.direction {
            Direction::Maximum => value > *selected_value,
            Direction::Minimum => value < *selected_value,
        };

        if is_better {
            self.num_variables_considered = 1;
            self.selected = Some((variable, value));
        } else if value == *selected_value {
            self.num_variables_considered += 1;
            if random.generate_bool(1.0 / self.num_variables_considered as f64) {
                self.selected = Some((variable, value));
            }
        }
    }

    /// Get the selected variable and reset the tie breaker so it can be used again.
    pub fn select(&mut self) -> Option<Var> {
        self.num_variables_considered = 0;
        self.selected.take().map(|(variable, _)| variable)
    }
}
