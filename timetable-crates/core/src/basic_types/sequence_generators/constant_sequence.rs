use super::SequenceGenerator;

// A sequence that generates the same value
#[derive(Debug, Copy, Clone)]
pub(crate) struct ConstantSequence {
    constant_value: i64,
}

impl ConstantSequence {
    pub(crate) fn new(constant_value: i64) -> ConstantSequence {
        ConstantSequence { constant_value }
    }
}

impl SequenceGenerator for ConstantSequence {
    fn next(&mut self) -> i64 {
        self.constant_value
    }
}

#[cfg(test)]
mod tests {
    use super::ConstantSequence;
    use crate::basic_types::sequence_generators::SequenceGenerator;

    #[test]
    fn every_budget_is_the_base_interval() {
        let mut constant_sequence = ConstantSequence::new(100);
        for _ in 0..1000 {
            assert_eq!(100, constant_sequence.next());
        }
    }
}
