use std::fmt::Debug;

use rand::Rng;
use rand::SeedableRng;

/// Abstraction over the random generator used for breaking ties during search.
pub trait Random: Debug {
    /// Returns `true` with the given probability.
    fn generate_bool(&mut self, probability: f64) -> bool;
}

// Any "regular" seedable generator can be used where an implementation of `Random` is expected.
impl<T> Random for T
where
    T: SeedableRng + Rng + Debug,
{
    fn generate_bool(&mut self, probability: f64) -> bool {
        self.gen_bool(probability.clamp(0.0, 1.0))
    }
}
