mod constraint_operation_error;
mod propagation_status_cp;
mod random;
pub(crate) mod sequence_generators;
mod solution;
mod trail;

pub use constraint_operation_error::ConstraintOperationError;
pub use propagation_status_cp::EmptyDomain;
pub(crate) use propagation_status_cp::Inconsistency;
pub(crate) use propagation_status_cp::PropagationStatusCP;
pub use random::Random;
pub use solution::Solution;
pub(crate) use trail::Trail;
