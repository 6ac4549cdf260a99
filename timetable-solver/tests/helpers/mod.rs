//! Runs the timetable solver binary on the instances in `tests/instances` and reads back its
//! output.
#![allow(
    dead_code,
    reason = "is used in integration tests but unable to find a way to silence these warnings"
)]

use std::collections::BTreeMap;
use std::fs::File;
use std::path::PathBuf;
use std::process::Command;
use std::process::ExitStatus;
use std::process::Stdio;
use std::time::Duration;

use regex::Regex;
use wait_timeout::ChildExt;

const TEST_TIMEOUT: Duration = Duration::from_secs(60);

pub(crate) const MSG_INFEASIBLE: &str = "=====INFEASIBLE=====";
pub(crate) const MSG_SEARCH_EXHAUSTED: &str = "=====SEARCH EXHAUSTED=====";

/// The shape of the planning horizon passed on the command line.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Horizon {
    pub(crate) days: usize,
    pub(crate) slots_per_day: usize,
    pub(crate) days_per_week: usize,
    pub(crate) instructors: usize,
}

#[derive(Debug)]
pub(crate) struct Run {
    pub(crate) status: ExitStatus,
    pub(crate) stdout: String,
}

impl Run {
    /// The lines which are not log messages.
    pub(crate) fn output_lines(&self) -> Vec<&str> {
        self.stdout
            .lines()
            .filter(|line| !line.starts_with('%'))
            .collect()
    }

    pub(crate) fn timetable(&self) -> Timetable {
        Timetable::parse(&self.output_lines())
    }
}

/// One session line: `(entity, date, slot, course)`.
pub(crate) type Session = (String, String, usize, String);

/// The sessions per grid, keyed by the section name (`teams`, `instructors`, `rooms`).
#[derive(Debug, Default)]
pub(crate) struct Timetable {
    pub(crate) sections: BTreeMap<String, Vec<Session>>,
}

impl Timetable {
    fn parse(lines: &[&str]) -> Timetable {
        let header = Regex::new(r"^# (\w+)$").unwrap();
        let session = Regex::new(r"^([^;]+);(\d{4}-\d{2}-\d{2});(\d+);([^;]+)$").unwrap();

        let mut timetable = Timetable::default();
        let mut current = None;
        let mut complete = false;
        for line in lines {
            if let Some(captures) = header.captures(line) {
                let name = captures[1].to_owned();
                let _ = timetable.sections.insert(name.clone(), Vec::new());
                current = Some(name);
            } else if let Some(captures) = session.captures(line) {
                let section = current.as_ref().expect("session before a section header");
                timetable
                    .sections
                    .get_mut(section)
                    .unwrap()
                    .push((
                        captures[1].to_owned(),
                        captures[2].to_owned(),
                        captures[3].parse().unwrap(),
                        captures[4].to_owned(),
                    ));
            } else if *line == "----------" {
                complete = true;
            } else {
                panic!("unexpected output line '{line}'");
            }
        }

        assert!(complete, "the timetable is not terminated");
        timetable
    }

    pub(crate) fn sessions(&self, section: &str) -> &[Session] {
        self.sections
            .get(section)
            .unwrap_or_else(|| panic!("no section '{section}'"))
    }

    /// The number of sessions of `entity` in `section`, per course.
    pub(crate) fn volumes(&self, section: &str, entity: &str) -> BTreeMap<String, usize> {
        let mut volumes = BTreeMap::new();
        for (_, _, _, course) in self
            .sessions(section)
            .iter()
            .filter(|(name, _, _, _)| name == entity)
        {
            *volumes.entry(course.clone()).or_insert(0) += 1;
        }
        volumes
    }

    /// The number of sessions of each course in each `(date, slot)`.
    pub(crate) fn slot_counts(&self, section: &str) -> BTreeMap<(String, usize, String), usize> {
        let mut counts = BTreeMap::new();
        for (_, date, slot, course) in self.sessions(section) {
            *counts
                .entry((date.clone(), *slot, course.clone()))
                .or_insert(0) += 1;
        }
        counts
    }
}

pub(crate) fn instance_path(instance: &str, file: &str) -> PathBuf {
    PathBuf::from(format!(
        "{}/tests/instances/{instance}/{file}",
        env!("CARGO_MANIFEST_DIR")
    ))
}

pub(crate) fn run_solver(instance: &str, horizon: Horizon) -> Run {
    run_solver_with_options(instance, horizon, std::iter::empty::<String>())
}

pub(crate) fn run_solver_with_options(
    instance: &str,
    horizon: Horizon,
    args: impl IntoIterator<Item = impl Into<String>>,
) -> Run {
    let solver = PathBuf::from(env!("CARGO_BIN_EXE_timetable-solver"));
    let log_file_path = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join(format!(
        "{instance}-{}.log",
        std::process::id()
    ));

    let mut command = Command::new(solver);
    for file in ["availability", "requirements", "courses", "rooms"] {
        let _ = command
            .arg(format!("--{file}"))
            .arg(instance_path(instance, &format!("{file}.csv")));
    }
    let leaves = instance_path(instance, "leaves.csv");
    if leaves.is_file() {
        let _ = command.arg("--leaves").arg(leaves);
    }
    let _ = command
        .args(["--start-date", "2024-01-08"])
        .args(["--days", &horizon.days.to_string()])
        .args(["--slots-per-day", &horizon.slots_per_day.to_string()])
        .args(["--days-per-week", &horizon.days_per_week.to_string()])
        .args(["--instructors", &horizon.instructors.to_string()]);
    for arg in args {
        let _ = command.arg(arg.into());
    }

    let mut child = command
        .stdout(File::create(&log_file_path).expect("Failed to create log file."))
        .stderr(Stdio::null())
        .stdin(Stdio::null())
        .spawn()
        .expect("Failed to run solver.");

    let status = match child.wait_timeout(TEST_TIMEOUT) {
        Ok(None) => {
            let _ = child.kill();
            panic!("solver took more than {} seconds", TEST_TIMEOUT.as_secs())
        }
        Ok(Some(status)) => status,
        Err(e) => panic!("error starting solver: {e}"),
    };

    let stdout = std::fs::read_to_string(&log_file_path).expect("Failed to read log file.");
    std::fs::remove_file(&log_file_path).expect("Failed to remove log file.");

    Run { status, stdout }
}
