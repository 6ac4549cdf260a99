//! Index-addressed containers used by the engine and exposed for building models.
mod keyed_vec;
mod variable_grid;

pub use keyed_vec::KeyedVec;
pub use keyed_vec::StorageKey;
pub use variable_grid::VariableGrid;
