use log::warn;

use crate::basic_types::sequence_generators::ConstantSequence;
use crate::basic_types::sequence_generators::GeometricSequence;
use crate::basic_types::sequence_generators::LubySequence;
use crate::basic_types::sequence_generators::SequenceGenerator;
use crate::basic_types::sequence_generators::SequenceGeneratorType;

/// The options which are used by the solver to determine when a restart should occur.
///
/// A restart abandons the current search tree and continues from the root; heuristic
/// information gathered by the brancher is kept. The solver restarts once the number of
/// failures since the previous restart reaches the next element of the sequence selected by
/// [`RestartOptions::sequence_generator_type`], scaled by [`RestartOptions::base_interval`].
/// The default is the Luby sequence (see [\[1\]](https://www.sciencedirect.com/science/article/pii/0020019093900299)).
///
/// # Bibliography
/// \[1\] M. Luby, A. Sinclair, and D. Zuckerman, ‘Optimal speedup of Las Vegas algorithms’,
/// Information Processing Letters, vol. 47, no. 4, pp. 173–180, 1993.
#[derive(Debug, Clone, Copy)]
pub struct RestartOptions {
    /// Decides the sequence based on which the restarts are performed.
    /// To be used in combination with [`RestartOptions::base_interval`]
    pub sequence_generator_type: SequenceGeneratorType,
    /// The base interval length is used as a multiplier to the restart sequence.
    /// For example, constant restarts with base interval 100 means a restart is triggered every
    /// 100 failures.
    pub base_interval: u64,
    /// The coefficient in the geometric sequence `x_i = x_{i-1} * geometric-coef` where `x_1 =
    /// `[`RestartOptions::base_interval`]. Used only if
    /// [`RestartOptions::sequence_generator_type`] is assigned to
    /// [`SequenceGeneratorType::Geometric`].
    pub geometric_coef: Option<f64>,
    /// Disables restarts altogether.
    pub no_restarts: bool,
}

impl Default for RestartOptions {
    fn default() -> Self {
        Self {
            sequence_generator_type: SequenceGeneratorType::Luby,
            base_interval: 100,
            geometric_coef: None,
            no_restarts: false,
        }
    }
}

const DEFAULT_GEOMETRIC_COEFFICIENT: f64 = 1.5;

#[derive(Debug)]
pub(crate) struct RestartStrategy {
    /// A generator for determining how many failures should be found before the next restart
    /// takes place (one example of such a generator is [`LubySequence`]).
    sequence_generator: Box<dyn SequenceGenerator>,
    /// The number of failures encountered since the last restart took place
    number_of_failures_encountered_since_restart: u64,
    /// The number of failures until the next restart takes place
    number_of_failures_until_restart: u64,
    no_restarts: bool,
}

impl Default for RestartStrategy {
    fn default() -> Self {
        RestartStrategy::new(RestartOptions::default())
    }
}

impl RestartStrategy {
    pub(crate) fn new(options: RestartOptions) -> Self {
        let base_interval = options.base_interval.max(1) as i64;
        let mut sequence_generator: Box<dyn SequenceGenerator> =
            match options.sequence_generator_type {
                SequenceGeneratorType::Constant => Box::new(ConstantSequence::new(base_interval)),
                SequenceGeneratorType::Geometric => {
                    let coefficient = options.geometric_coef.unwrap_or_else(|| {
                        warn!(
                            "Geometric restarts without a coefficient, using {DEFAULT_GEOMETRIC_COEFFICIENT}"
                        );
                        DEFAULT_GEOMETRIC_COEFFICIENT
                    });
                    Box::new(GeometricSequence::new(base_interval, coefficient))
                }
                SequenceGeneratorType::Luby => Box::new(LubySequence::new(base_interval)),
            };

        let number_of_failures_until_restart = next_budget(sequence_generator.as_mut());

        RestartStrategy {
            sequence_generator,
            number_of_failures_encountered_since_restart: 0,
            number_of_failures_until_restart,
            no_restarts: options.no_restarts,
        }
    }

    /// Whether the failure budget of the current restart epoch has been spent.
    pub(crate) fn should_restart(&self) -> bool {
        !self.no_restarts
            && self.number_of_failures_encountered_since_restart
                >= self.number_of_failures_until_restart
    }

    pub(crate) fn notify_failure(&mut self) {
        self.number_of_failures_encountered_since_restart += 1;
    }

    /// Starts a new restart epoch with the next budget of the sequence.
    pub(crate) fn notify_restart(&mut self) {
        self.number_of_failures_encountered_since_restart = 0;
        self.number_of_failures_until_restart = next_budget(self.sequence_generator.as_mut());
    }

    #[cfg(test)]
    pub(crate) fn failures_until_restart(&self) -> u64 {
        self.number_of_failures_until_restart
    }
}

fn next_budget(sequence_generator: &mut dyn SequenceGenerator) -> u64 {
    // Saturated or overflown elements are treated as "never restart again".
    let next = sequence_generator.next();
    if next <= 0 {
        u64::MAX
    } else {
        next as u64
    }
}
