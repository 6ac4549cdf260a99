use std::fmt::Debug;

/// Generates the failure budgets of consecutive restart epochs.
pub(crate) trait SequenceGenerator: Debug {
    fn next(&mut self) -> i64;
}
