//! Provides the [`VariableSelector`] trait which is required for variable selectors to implement;
//! the main method in this trait is the [`VariableSelector::select_variable`] method.
//!
//! Variable selectors receive feedback from the search through two hooks: the scope of every
//! failing propagator ([`VariableSelector::on_conflict`]) and the variables narrowed by each
//! round of propagation ([`VariableSelector::on_domains_narrowed`]).
mod activity;
mod dom_wdeg;
mod input_order;
mod variable_selector;

use std::fmt::Display;

pub use activity::*;
pub use dom_wdeg::*;
pub use input_order::*;
pub use variable_selector::VariableSelector;

use crate::variables::DomainId;

/// The variable selection heuristics which the [`crate::Solver`] can be configured with.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum VariableSelection {
    /// Smallest domain size divided by the failure weight; see [`DomWDeg`].
    #[default]
    DomWDeg,
    /// Most active variable; see [`Activity`].
    Activity,
    /// First unfixed variable; see [`InputOrder`].
    InputOrder,
}

impl VariableSelection {
    /// Creates the selector over the given variables.
    pub fn create(self, variables: &[DomainId]) -> Box<dyn VariableSelector<DomainId>> {
        match self {
            VariableSelection::DomWDeg => Box::new(DomWDeg::new(variables)),
            VariableSelection::Activity => Box::new(Activity::new(variables)),
            VariableSelection::InputOrder => Box::new(InputOrder::new(variables)),
        }
    }
}

impl Display for VariableSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VariableSelection::DomWDeg => write!(f, "dom-w-deg"),
            VariableSelection::Activity => write!(f, "activity"),
            VariableSelection::InputOrder => write!(f, "input-order"),
        }
    }
}
