//! # Timetable solver
//! Plans the training sessions of teams over a horizon of days, assigning an instructor and a
//! room to every session.
//!
//! An instance is read from semicolon-separated files ([`input`]), turned into a constraint
//! model on a [`timetable_core::Solver`] ([`model`]) and, once solved, written out as one
//! listing per team, instructor and room ([`report`]).
//!
//! ```rust,no_run
//! # use std::path::PathBuf;
//! # use timetable_core::Solver;
//! # use timetable_core::termination::Indefinite;
//! # use timetable_solver::input::AvailabilityConvention;
//! # use timetable_solver::input::InputFiles;
//! # use timetable_solver::input::PlanningHorizon;
//! # use timetable_solver::input::parse_date;
//! # use timetable_solver::model::ModelOptions;
//! # use timetable_solver::model::TimetableModel;
//! # use timetable_solver::report::write_result;
//! let files = InputFiles {
//!     availability: PathBuf::from("availability.csv"),
//!     requirements: PathBuf::from("requirements.csv"),
//!     courses: PathBuf::from("courses.csv"),
//!     rooms: PathBuf::from("rooms.csv"),
//!     leaves: None,
//! };
//! let horizon = PlanningHorizon {
//!     start_date: parse_date("2024-01-08").ok_or("invalid start date")?,
//!     days: 14,
//!     slots_per_day: 4,
//!     days_per_week: 7,
//! };
//! let instance = files.read_instance(horizon, &AvailabilityConvention::default(), 3)?;
//!
//! let mut solver = Solver::default();
//! let model = TimetableModel::build(&instance, ModelOptions::default(), &mut solver)?;
//! let mut brancher = solver.brancher_for_variables(&model.decision_variables());
//! let result = solver.satisfy(&mut brancher, &mut Indefinite);
//!
//! write_result(&result, &instance, &model, std::io::stdout())?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
pub mod input;
pub mod model;
pub mod report;
