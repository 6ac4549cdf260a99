use super::SequenceGenerator;

/// Given constants 'a' and 'm', the i-th element f(i) in a geometric sequence is computed as:
///  f(i) = f(i-1) * m
///  f(0) = a
/// When 'm' is not an integer, the above formula is _not_ the same as f(i) = a * m^i since
/// intermediate values will be rounded down.
///
/// Values saturate at `i64::MAX` instead of overflowing.
#[derive(Debug, Copy, Clone)]
pub(crate) struct GeometricSequence {
    current_value: i64,
    multiplication_factor: f64,
}

impl GeometricSequence {
    pub(crate) fn new(starting_value: i64, multiplication_factor: f64) -> GeometricSequence {
        GeometricSequence {
            current_value: starting_value,
            multiplication_factor,
        }
    }
}

impl SequenceGenerator for GeometricSequence {
    fn next(&mut self) -> i64 {
        let next_value = self.current_value;
        // `as` saturates for floats which are out of range
        self.current_value = (self.current_value as f64 * self.multiplication_factor) as i64;
        next_value
    }
}

#[cfg(test)]
mod tests {
    use super::GeometricSequence;
    use crate::basic_types::sequence_generators::SequenceGenerator;

    #[test]
    fn doubling_yields_powers_of_two() {
        let mut geometric_sequence = GeometricSequence::new(1, 2.0);
        for i in 0..62 {
            assert_eq!(1_i64 << i, geometric_sequence.next());
        }
    }

    #[test]
    fn fractional_factor_rounds_down() {
        let mut geometric_sequence = GeometricSequence::new(10, 1.5);
        assert_eq!(10, geometric_sequence.next());
        assert_eq!(15, geometric_sequence.next());
        assert_eq!(22, geometric_sequence.next());
        assert_eq!(33, geometric_sequence.next());
    }
}
