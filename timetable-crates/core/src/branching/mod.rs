//! Contains structures and traits to define the decision making procedure of the [`crate::Solver`].
//!
//! In general, it provides 3 traits:
//! - The [`Brancher`] which defines how a branching procedure (which selects an unfixed variable
//!   and splits the domain in some way, see [Section 4.3.1 of \[1\]](http://www.cse.unsw.com.au/~tw/brwhkr08.pdf)
//!   for more information) should operate; the main method of this trait is the
//!   [`Brancher::next_decision`] method.
//! - The [`VariableSelector`] which defines the method required of a variable selector (including
//!   the hooks into the solver); the main method of this trait is the
//!   [`VariableSelector::select_variable`] method.
//! - The [`ValueSelector`] which defines the method required of a value selector (including the
//!   hooks into the solver); the main method of this trait is the
//!   [`ValueSelector::select_value`] method.
//!
//! A [`Brancher`] is expected to be passed to [`crate::Solver::satisfy`]:
//! ```rust
//! # use timetable_core::Solver;
//! # use timetable_core::branching::branchers::independent_variable_value_brancher::IndependentVariableValueBrancher;
//! # use timetable_core::branching::variable_selection::DomWDeg;
//! # use timetable_core::branching::value_selection::InDomainMin;
//! # use timetable_core::termination::Indefinite;
//! # use timetable_core::results::SatisfactionResult;
//! let mut solver = Solver::default();
//!
//! let variables = vec![solver.new_bounded_integer(0, 10), solver.new_bounded_integer(2, 3)];
//!
//! let mut termination = Indefinite;
//! let mut brancher =
//!     IndependentVariableValueBrancher::new(DomWDeg::new(&variables), InDomainMin);
//! let result = solver.satisfy(&mut brancher, &mut termination);
//! if let SatisfactionResult::Solved(solution) = result {
//!     // Getting the value of the first variable in the solution
//!     let value_first_variable = solution.get_integer_value(variables[0]);
//!     assert_eq!(0, value_first_variable);
//! } else {
//!     panic!("Expected a solution, got {result:?}")
//! }
//! ```
//!
//! # Bibliography
//! \[1\] F. Rossi, P. Van Beek, and T. Walsh, ‘Handbook of Constraint Programming’, Elsevier,
//! 2006, pp. 85–134.
mod brancher;
pub mod branchers;
mod selection_context;
pub mod tie_breaking;
pub mod value_selection;
pub mod variable_selection;

pub use brancher::Brancher;
pub use selection_context::SelectionContext;
