//! Turning the outcome of a search into text.
//!
//! A solved timetable is written as one listing per grid, one line `entity;date;slot;course`
//! per session, followed by a `----------` line. Slots which are [`UNAVAILABLE`] or have
//! [`NO_SESSION`] are left out. A failed search is written as a [`FailureReport`].
use std::fmt::Display;
use std::io::Write;

use chrono::NaiveDate;
use timetable_core::containers::VariableGrid;
use timetable_core::results::SatisfactionResult;
use timetable_core::results::Solution;

use crate::model::TimetableInstance;
use crate::model::TimetableModel;
use crate::model::NO_SESSION;
use crate::model::UNAVAILABLE;

const MSG_SOLUTION_END: &str = "----------";
const MSG_INFEASIBLE: &str = "=====INFEASIBLE=====";
const MSG_SEARCH_EXHAUSTED: &str = "=====SEARCH EXHAUSTED=====";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridKind {
    Team,
    Instructor,
    Room,
}

impl Display for GridKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GridKind::Team => write!(f, "teams"),
            GridKind::Instructor => write!(f, "instructors"),
            GridKind::Room => write!(f, "rooms"),
        }
    }
}

/// The assigned values of one grid; `values[row][slot]` as in [`TimetableModel`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    pub kind: GridKind,
    pub names: Vec<String>,
    pub values: Vec<Vec<i32>>,
}

/// One slot of one entity in which a course is taught.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session<'a> {
    pub entity: &'a str,
    pub date: NaiveDate,
    /// The position of the slot within its day.
    pub slot: usize,
    pub course: &'a str,
}

/// A solved timetable, detached from the solver it was found by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timetable {
    instance: TimetableInstance,
    schedules: [Schedule; 3],
}

impl Timetable {
    pub fn from_solution(
        instance: &TimetableInstance,
        model: &TimetableModel,
        solution: &Solution,
    ) -> Timetable {
        let schedule = |kind, grid: &VariableGrid, names: Vec<String>| Schedule {
            kind,
            names,
            values: TimetableModel::values(grid, solution),
        };

        Timetable {
            instance: instance.clone(),
            schedules: [
                schedule(
                    GridKind::Team,
                    model.team_slots(),
                    instance.teams.iter().map(|team| team.name.clone()).collect(),
                ),
                schedule(
                    GridKind::Instructor,
                    model.instructor_slots(),
                    (0..instance.num_instructors)
                        .map(|instructor| instructor.to_string())
                        .collect(),
                ),
                schedule(
                    GridKind::Room,
                    model.room_slots(),
                    instance.rooms.iter().map(|room| room.name.clone()).collect(),
                ),
            ],
        }
    }

    pub fn schedule(&self, kind: GridKind) -> &Schedule {
        match kind {
            GridKind::Team => &self.schedules[0],
            GridKind::Instructor => &self.schedules[1],
            GridKind::Room => &self.schedules[2],
        }
    }

    /// The sessions of the grid in row-major order.
    pub fn sessions(&self, kind: GridKind) -> impl Iterator<Item = Session<'_>> + '_ {
        let schedule = self.schedule(kind);
        let horizon = self.instance.horizon;

        schedule
            .values
            .iter()
            .zip(schedule.names.iter())
            .flat_map(move |(row, name)| {
                row.iter()
                    .enumerate()
                    .filter(|&(_, &value)| value != UNAVAILABLE && value != NO_SESSION)
                    .map(move |(slot, &course)| Session {
                        entity: name,
                        date: horizon.date_of_day(horizon.day_of_slot(slot)),
                        slot: horizon.slot_in_day(slot),
                        course: &self.instance.courses[course as usize].name,
                    })
            })
    }

    pub fn write(&self, mut writer: impl Write) -> std::io::Result<()> {
        for kind in [GridKind::Team, GridKind::Instructor, GridKind::Room] {
            writeln!(writer, "# {kind}")?;
            for session in self.sessions(kind) {
                writeln!(
                    writer,
                    "{};{};{};{}",
                    session.entity,
                    session.date.format("%Y-%m-%d"),
                    session.slot,
                    session.course
                )?;
            }
        }
        writeln!(writer, "{MSG_SOLUTION_END}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// No timetable exists.
    Infeasible,
    /// The search was stopped before a timetable was found or ruled out.
    SearchExhausted,
}

/// Why no timetable was written, and the size of the instance that was searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FailureReport {
    pub kind: FailureKind,
    pub num_teams: usize,
    pub num_instructors: usize,
    pub num_rooms: usize,
    pub num_slots: usize,
}

impl FailureReport {
    pub fn new(kind: FailureKind, instance: &TimetableInstance) -> FailureReport {
        FailureReport {
            kind,
            num_teams: instance.teams.len(),
            num_instructors: instance.num_instructors,
            num_rooms: instance.rooms.len(),
            num_slots: instance.horizon.num_slots(),
        }
    }
}

impl Display for FailureReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (header, reason) = match self.kind {
            FailureKind::Infeasible => (MSG_INFEASIBLE, "no timetable satisfies every constraint"),
            FailureKind::SearchExhausted => (
                MSG_SEARCH_EXHAUSTED,
                "the search budget ran out before a timetable was found",
            ),
        };
        writeln!(f, "{header}")?;
        write!(
            f,
            "{reason} ({} teams, {} instructors, {} rooms, {} slots)",
            self.num_teams, self.num_instructors, self.num_rooms, self.num_slots
        )
    }
}

/// Writes the timetable or the failure report for `result`.
pub fn write_result(
    result: &SatisfactionResult,
    instance: &TimetableInstance,
    model: &TimetableModel,
    mut writer: impl Write,
) -> std::io::Result<()> {
    let kind = match result {
        SatisfactionResult::Solved(solution) => {
            return Timetable::from_solution(instance, model, solution).write(writer);
        }
        SatisfactionResult::Infeasible => FailureKind::Infeasible,
        SatisfactionResult::SearchExhausted => FailureKind::SearchExhausted,
    };
    writeln!(writer, "{}", FailureReport::new(kind, instance))
}

#[cfg(test)]
mod tests {
    use timetable_core::termination::Indefinite;
    use timetable_core::Solver;

    use super::*;
    use crate::input::PlanningHorizon;
    use crate::model::Course;
    use crate::model::ModelOptions;
    use crate::model::RequirementValue;
    use crate::model::Room;
    use crate::model::Team;

    fn instance(whole: u32) -> TimetableInstance {
        TimetableInstance {
            horizon: PlanningHorizon {
                start_date: NaiveDate::from_ymd_opt(2024, 1, 8).expect("valid date"),
                days: 2,
                slots_per_day: 1,
                days_per_week: 7,
            },
            courses: vec![Course {
                name: "first-aid".to_owned(),
                duration: 1,
                max_per_day: 1,
            }],
            teams: vec![Team {
                name: "blue".to_owned(),
                available_days: vec![false, true],
                requirements: vec![RequirementValue { whole, tenths: 0 }],
            }],
            rooms: vec![Room {
                name: "hall".to_owned(),
                compatible_courses: vec![true],
            }],
            num_instructors: 1,
            leaves: vec![],
        }
    }

    fn render(instance: &TimetableInstance) -> String {
        let mut solver = Solver::default();
        let model = TimetableModel::build(instance, ModelOptions::default(), &mut solver)
            .expect("valid instance");
        let mut brancher = solver.brancher_for_variables(&model.decision_variables());
        let result = solver.satisfy(&mut brancher, &mut Indefinite);

        let mut output = Vec::new();
        write_result(&result, instance, &model, &mut output).expect("writing to memory");
        String::from_utf8(output).expect("utf-8 output")
    }

    #[test]
    fn sessions_are_listed_per_grid() {
        let output = render(&instance(1));

        assert_eq!(
            "# teams\n\
             blue;2024-01-09;0;first-aid\n\
             # instructors\n\
             0;2024-01-09;0;first-aid\n\
             # rooms\n\
             hall;2024-01-09;0;first-aid\n\
             ----------\n",
            output
        );
    }

    #[test]
    fn infeasible_instances_get_a_failure_report() {
        let output = render(&instance(2));

        assert!(output.starts_with(MSG_INFEASIBLE));
        assert!(output.contains("1 teams, 1 instructors, 1 rooms, 2 slots"));
    }

    #[test]
    fn exhausted_searches_are_reported_separately() {
        let report = FailureReport::new(FailureKind::SearchExhausted, &instance(1));

        assert!(report.to_string().starts_with(MSG_SEARCH_EXHAUSTED));
    }
}
