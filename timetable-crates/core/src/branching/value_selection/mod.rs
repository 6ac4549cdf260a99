//! Provides the [`ValueSelector`] trait which is required for value selectors to implement.
//!
//! The only selector in use is [`InDomainMin`]: search is binary branching on
//! `[x == min(x)]`, refuted by `[x != min(x)]`.
mod in_domain_min;
mod value_selector;

pub use in_domain_min::*;
pub use value_selector::ValueSelector;
