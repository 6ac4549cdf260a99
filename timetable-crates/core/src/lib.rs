//! # Timetable core
//! The finite-domain constraint engine used by the training timetable solver.
//!
//! Variables are created on a [`Solver`] and live in a trailed domain store. Constraints are
//! posted with [`Solver::add_constraint`]; each one is compiled into one or more propagators
//! which the propagation engine runs to a fixed point after every domain change. The search
//! explores the remaining assignments by binary branching on `[x == min(x)]`, guided by a
//! [`branching::Brancher`], and restarts according to [`options::RestartOptions`].
//!
//! ```rust
//! # use timetable_core::Solver;
//! # use timetable_core::constraints;
//! # use timetable_core::constraints::Relation;
//! # use timetable_core::results::SatisfactionResult;
//! # use timetable_core::termination::Indefinite;
//! let mut solver = Solver::default();
//!
//! let x = solver.new_bounded_integer(0, 5);
//! let y = solver.new_bounded_integer(0, 5);
//! let total = solver.new_constant(7);
//!
//! solver
//!     .add_constraint(constraints::sum(vec![x, y], Relation::Equal, total))
//!     .expect("the sum is satisfiable at the root");
//! solver
//!     .add_constraint(constraints::distance(x, y, Relation::GreaterEqual, 3))
//!     .expect("the distance is satisfiable at the root");
//!
//! let mut brancher = solver.default_brancher();
//! match solver.satisfy(&mut brancher, &mut Indefinite) {
//!     SatisfactionResult::Solved(solution) => {
//!         let x = solution.get_integer_value(x);
//!         let y = solution.get_integer_value(y);
//!         assert_eq!(x + y, 7);
//!         assert!((x - y).abs() >= 3);
//!     }
//!     other => panic!("expected a solution, got {other:?}"),
//! }
//! ```
pub(crate) mod asserts;
pub(crate) mod basic_types;
pub mod branching;
pub mod constraints;
pub mod containers;
pub(crate) mod engine;
pub(crate) mod math;
pub(crate) mod propagators;
pub mod statistics;

pub use convert_case;
pub use rand;

// All exports from `api` are exports directly from the crate root.
mod api;

pub use api::*;
