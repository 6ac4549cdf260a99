pub(crate) mod binary;
pub(crate) mod distance;
pub(crate) mod linear;

pub(crate) use binary::*;
pub(crate) use distance::*;
pub(crate) use linear::*;
