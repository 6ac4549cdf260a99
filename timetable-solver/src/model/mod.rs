//! The training timetable as a constraint model.
//!
//! A [`TimetableInstance`] describes the teams, courses, rooms and instructors to plan for.
//! [`TimetableModel::build`] turns it into variables and constraints of a
//! [`timetable_core::Solver`]: one grid of slot variables per kind of entity, where every cell
//! holds the course taught in that slot, [`NO_SESSION`] or [`UNAVAILABLE`].
mod builder;

use chrono::NaiveDate;
use thiserror::Error;
use timetable_core::ConstraintOperationError;

pub use builder::TimetableModel;

use crate::input::PlanningHorizon;

/// The value of a slot in which the team, instructor or room cannot be scheduled.
pub const UNAVAILABLE: i32 = -1;
/// The value of a slot in which the team, instructor or room has no session.
pub const NO_SESSION: i32 = -2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    pub name: String,
    /// The length of one session, in slots.
    pub duration: u32,
    /// The maximum number of sessions of the course on a single day.
    pub max_per_day: u32,
}

/// A requirement written as `whole.tenths`: `whole` full sessions of the course plus `tenths`
/// tenths of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequirementValue {
    pub whole: u32,
    pub tenths: u32,
}

impl RequirementValue {
    /// The number of slots the requirement amounts to for a course of `duration` slots, rounded
    /// up to whole slots.
    pub fn slot_volume(&self, duration: u32) -> u32 {
        ((self.whole * 10 + self.tenths) * duration).div_ceil(10)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    pub name: String,
    /// Whether the team can be trained on each day of the horizon.
    pub available_days: Vec<bool>,
    /// The requirement for every course, indexed like [`TimetableInstance::courses`].
    pub requirements: Vec<RequirementValue>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub name: String,
    /// Whether the room can host each course, indexed like [`TimetableInstance::courses`].
    pub compatible_courses: Vec<bool>,
}

/// An instructor is unavailable from `first_day` up to and including `last_day`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Leave {
    pub instructor: usize,
    pub first_day: NaiveDate,
    pub last_day: NaiveDate,
}

/// Everything needed to build a timetable; courses are identified by their index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimetableInstance {
    pub horizon: PlanningHorizon,
    pub courses: Vec<Course>,
    pub teams: Vec<Team>,
    pub rooms: Vec<Room>,
    pub num_instructors: usize,
    pub leaves: Vec<Leave>,
}

impl TimetableInstance {
    /// The number of slots team `team` has to spend on course `course`.
    pub fn required_volume(&self, team: usize, course: usize) -> u32 {
        self.teams[team].requirements[course].slot_volume(self.courses[course].duration)
    }
}

/// Optional parts of the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelOptions {
    /// The largest allowed difference between the number of days worked by any two
    /// instructors; `None` leaves the workload unbalanced.
    pub fairness_spread: Option<u32>,
    /// Whether every course of a team is taught in consecutive weeks.
    pub week_contiguity: bool,
}

impl Default for ModelOptions {
    fn default() -> Self {
        ModelOptions {
            fairness_spread: None,
            week_contiguity: true,
        }
    }
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Cannot build the {grid} slots of {entity}: {reason}")]
    DomainConstruction {
        grid: &'static str,
        entity: String,
        reason: String,
    },
    #[error("A timetable constraint could not be posted: {0}")]
    Constraint(#[from] ConstraintOperationError),
}
