pub(crate) mod binary_equals;
pub(crate) mod binary_not_equals;

pub(crate) use binary_equals::*;
pub(crate) use binary_not_equals::*;
