//! Reading a [`TimetableInstance`] from semicolon-separated files.
//!
//! Every file starts with a header row; the first column of each row names the entity the row
//! is about:
//! - availability: `team;day1;day2;...` with one availability marker per planning day,
//! - requirements: `team;course0;course1;...` with a `whole.tenths` requirement per course,
//! - courses: `course;duration;max_per_day`,
//! - rooms: `room;course0;course1;...` with `1` when the room can host the course,
//! - leaves: `instructor;start;end` with the instructor index and an inclusive date range.
//!
//! Any problem is reported as an [`InputError`] naming the file and line.
mod horizon;
mod table;

use std::path::PathBuf;

use fnv::FnvHashMap;
use log::debug;
use log::warn;
use thiserror::Error;

pub use horizon::parse_date;
pub use horizon::PlanningHorizon;
pub(crate) use table::Table;

use crate::model::Course;
use crate::model::Leave;
use crate::model::RequirementValue;
use crate::model::Room;
use crate::model::Team;
use crate::model::TimetableInstance;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("Could not read {file}: {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{file}, line {line}: {reason}")]
    MalformedInput {
        file: String,
        line: usize,
        reason: String,
    },
}

impl InputError {
    pub(crate) fn malformed(file: &str, line: usize, reason: impl Into<String>) -> InputError {
        InputError::MalformedInput {
            file: file.to_owned(),
            line,
            reason: reason.into(),
        }
    }
}

/// How the cells of the availability file are read.
///
/// A cell equal to `available_marker` means the team is available on that day when
/// `marker_means_available` holds and unavailable otherwise; every other cell means the
/// opposite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityConvention {
    pub available_marker: String,
    pub marker_means_available: bool,
}

impl Default for AvailabilityConvention {
    fn default() -> Self {
        AvailabilityConvention {
            available_marker: "J".to_owned(),
            marker_means_available: true,
        }
    }
}

impl AvailabilityConvention {
    pub fn is_available(&self, cell: &str) -> bool {
        (cell.trim() == self.available_marker) == self.marker_means_available
    }
}

/// The files describing one instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFiles {
    pub availability: PathBuf,
    pub requirements: PathBuf,
    pub courses: PathBuf,
    pub rooms: PathBuf,
    pub leaves: Option<PathBuf>,
}

impl InputFiles {
    /// Reads and checks every file.
    pub fn read_instance(
        &self,
        horizon: PlanningHorizon,
        convention: &AvailabilityConvention,
        num_instructors: usize,
    ) -> Result<TimetableInstance, InputError> {
        let courses = parse_courses(&Table::read(&self.courses)?)?;
        let availability =
            parse_availability(&Table::read(&self.availability)?, &horizon, convention)?;
        let requirements = parse_requirements(
            &Table::read(&self.requirements)?,
            &availability,
            courses.len(),
        )?;
        let rooms = parse_rooms(&Table::read(&self.rooms)?, courses.len())?;
        let leaves = match &self.leaves {
            Some(path) => parse_leaves(&Table::read(path)?, num_instructors)?,
            None => Vec::new(),
        };

        let teams = availability
            .into_iter()
            .zip(requirements)
            .map(|((name, available_days), requirements)| Team {
                name,
                available_days,
                requirements,
            })
            .collect::<Vec<_>>();

        debug!(
            "Read {} teams, {} courses, {} rooms and {} leaves",
            teams.len(),
            courses.len(),
            rooms.len(),
            leaves.len()
        );

        Ok(TimetableInstance {
            horizon,
            courses,
            teams,
            rooms,
            num_instructors,
            leaves,
        })
    }
}

pub(crate) fn parse_courses(table: &Table) -> Result<Vec<Course>, InputError> {
    if table.header.len() != 3 {
        return Err(table.header_error("expected the columns course;duration;max_per_day"));
    }

    table
        .rows
        .iter()
        .map(|row| {
            let duration = parse_positive(&row.cells[1])
                .ok_or_else(|| table.error(row, format!("invalid duration '{}'", row.cells[1])))?;
            let max_per_day = parse_positive(&row.cells[2]).ok_or_else(|| {
                table.error(row, format!("invalid sessions per day '{}'", row.cells[2]))
            })?;

            Ok(Course {
                name: row.name().to_owned(),
                duration,
                max_per_day,
            })
        })
        .collect()
}

/// Returns the name and per-day availability of every team, in file order.
pub(crate) fn parse_availability(
    table: &Table,
    horizon: &PlanningHorizon,
    convention: &AvailabilityConvention,
) -> Result<Vec<(String, Vec<bool>)>, InputError> {
    if table.num_value_columns() < horizon.days {
        return Err(table.header_error(format!(
            "the planning horizon has {} days but only {} are listed",
            horizon.days,
            table.num_value_columns()
        )));
    }
    if table.num_value_columns() > horizon.days {
        warn!(
            "{} lists {} days; only the first {} are planned",
            table.file,
            table.num_value_columns(),
            horizon.days
        );
    }

    let mut seen = FnvHashMap::default();
    table
        .rows
        .iter()
        .map(|row| {
            if let Some(previous) = seen.insert(row.name().to_owned(), row.line) {
                return Err(table.error(
                    row,
                    format!("team '{}' is already listed on line {previous}", row.name()),
                ));
            }

            let available_days = row.values()[..horizon.days]
                .iter()
                .map(|cell| convention.is_available(cell))
                .collect();
            Ok((row.name().to_owned(), available_days))
        })
        .collect()
}

/// Returns the requirements of every team of `teams`, in the same order. Teams without a row
/// require nothing.
pub(crate) fn parse_requirements(
    table: &Table,
    teams: &[(String, Vec<bool>)],
    num_courses: usize,
) -> Result<Vec<Vec<RequirementValue>>, InputError> {
    if table.num_value_columns() != num_courses {
        return Err(table.header_error(format!(
            "expected one column per course ({num_courses}), found {}",
            table.num_value_columns()
        )));
    }

    let team_indices = teams
        .iter()
        .enumerate()
        .map(|(index, (name, _))| (name.as_str(), index))
        .collect::<FnvHashMap<_, _>>();

    let mut requirements = vec![None; teams.len()];
    for row in table.rows.iter() {
        let Some(&team) = team_indices.get(row.name()) else {
            return Err(table.error(
                row,
                format!("team '{}' has no availability row", row.name()),
            ));
        };

        let values = row
            .values()
            .iter()
            .map(|cell| {
                parse_requirement_value(cell)
                    .ok_or_else(|| table.error(row, format!("invalid requirement '{cell}'")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        requirements[team] = Some(values);
    }

    Ok(requirements
        .into_iter()
        .zip(teams)
        .map(|(values, (name, _))| {
            values.unwrap_or_else(|| {
                warn!("Team '{name}' has no requirements row; it requires no training");
                vec![RequirementValue::default(); num_courses]
            })
        })
        .collect())
}

/// Parses `whole`, `whole.tenths` or `whole,tenths` where `tenths` is a single digit.
pub(crate) fn parse_requirement_value(text: &str) -> Option<RequirementValue> {
    let text = text.trim();
    let (whole, tenths) = match text.split_once(['.', ',']) {
        Some((whole, tenths)) => (whole, tenths),
        None => (text, "0"),
    };

    if tenths.len() != 1 {
        return None;
    }

    Some(RequirementValue {
        whole: whole.parse().ok()?,
        tenths: tenths.parse().ok()?,
    })
}

pub(crate) fn parse_rooms(table: &Table, num_courses: usize) -> Result<Vec<Room>, InputError> {
    if table.num_value_columns() != num_courses {
        return Err(table.header_error(format!(
            "expected one column per course ({num_courses}), found {}",
            table.num_value_columns()
        )));
    }

    table
        .rows
        .iter()
        .map(|row| {
            let compatible_courses = row
                .values()
                .iter()
                .map(|cell| match cell.as_str() {
                    "1" => Ok(true),
                    "0" => Ok(false),
                    other => Err(table.error(
                        row,
                        format!("expected 1 or 0 for room compatibility, found '{other}'"),
                    )),
                })
                .collect::<Result<Vec<_>, _>>()?;

            Ok(Room {
                name: row.name().to_owned(),
                compatible_courses,
            })
        })
        .collect()
}

pub(crate) fn parse_leaves(table: &Table, num_instructors: usize) -> Result<Vec<Leave>, InputError> {
    if table.header.len() != 3 {
        return Err(table.header_error("expected the columns instructor;start;end"));
    }

    table
        .rows
        .iter()
        .map(|row| {
            let instructor = row
                .name()
                .parse::<usize>()
                .ok()
                .filter(|&instructor| instructor < num_instructors)
                .ok_or_else(|| {
                    table.error(
                        row,
                        format!(
                            "'{}' is not an instructor index below {num_instructors}",
                            row.name()
                        ),
                    )
                })?;
            let first_day = parse_date(&row.cells[1])
                .ok_or_else(|| table.error(row, format!("invalid date '{}'", row.cells[1])))?;
            let last_day = parse_date(&row.cells[2])
                .ok_or_else(|| table.error(row, format!("invalid date '{}'", row.cells[2])))?;

            if last_day < first_day {
                return Err(table.error(row, "the leave ends before it starts"));
            }

            Ok(Leave {
                instructor,
                first_day,
                last_day,
            })
        })
        .collect()
}

fn parse_positive(text: &str) -> Option<u32> {
    text.parse::<u32>().ok().filter(|&value| value > 0)
}
