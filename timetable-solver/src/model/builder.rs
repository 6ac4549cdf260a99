use log::debug;
use log::info;
use timetable_core::constraints;
use timetable_core::constraints::Constraint;
use timetable_core::constraints::Relation;
use timetable_core::containers::VariableGrid;
use timetable_core::results::Solution;
use timetable_core::variables::DomainId;
use timetable_core::ConstraintOperationError;
use timetable_core::Solver;

use super::ModelError;
use super::ModelOptions;
use super::TimetableInstance;
use super::NO_SESSION;
use super::UNAVAILABLE;

/// The variables of a timetable inside a [`Solver`].
///
/// Every grid has one row per team, instructor or room and one column per slot of the
/// planning horizon.
#[derive(Debug, Clone)]
pub struct TimetableModel {
    team_slots: VariableGrid,
    instructor_slots: VariableGrid,
    room_slots: VariableGrid,
    /// The number of days each instructor works; only present when the workload is balanced.
    instructor_days_worked: Vec<DomainId>,
}

impl TimetableModel {
    /// Creates the variables and posts the constraints of `instance`.
    ///
    /// A model which is infeasible at the root is not an error: the solver is left in its
    /// infeasible state and the search reports it.
    pub fn build(
        instance: &TimetableInstance,
        options: ModelOptions,
        solver: &mut Solver,
    ) -> Result<TimetableModel, ModelError> {
        check_domains(instance)?;

        let mut builder = ModelBuilder {
            instance,
            one: solver.new_constant(1),
            solver,
        };

        let model = TimetableModel {
            team_slots: builder.team_slots(),
            instructor_slots: builder.instructor_slots(),
            room_slots: builder.room_slots(),
            instructor_days_worked: Vec::new(),
        };

        builder.post_session_agreement(&model)?;
        builder.post_team_volumes(&model.team_slots)?;
        builder.post_daily_bounds(&model.team_slots)?;
        if options.week_contiguity {
            builder.post_week_contiguity(&model.team_slots)?;
        }
        let instructor_days_worked = match options.fairness_spread {
            Some(spread) => builder.post_workload_fairness(&model.instructor_slots, spread)?,
            None => Vec::new(),
        };

        info!(
            "Built a model with {} variables{}",
            builder.solver.num_variables(),
            if builder.solver.is_infeasible() {
                " which is infeasible at the root"
            } else {
                ""
            }
        );

        Ok(TimetableModel {
            instructor_days_worked,
            ..model
        })
    }

    pub fn team_slots(&self) -> &VariableGrid {
        &self.team_slots
    }

    pub fn instructor_slots(&self) -> &VariableGrid {
        &self.instructor_slots
    }

    pub fn room_slots(&self) -> &VariableGrid {
        &self.room_slots
    }

    pub fn instructor_days_worked(&self) -> &[DomainId] {
        &self.instructor_days_worked
    }

    /// The slot variables of every grid; the auxiliary variables follow from them.
    pub fn decision_variables(&self) -> Vec<DomainId> {
        self.team_slots
            .cells()
            .iter()
            .chain(self.instructor_slots.cells())
            .chain(self.room_slots.cells())
            .copied()
            .collect()
    }

    /// Reads the value of every cell of `grid` from `solution`, one row per entity.
    pub fn values(grid: &VariableGrid, solution: &Solution) -> Vec<Vec<i32>> {
        (0..grid.num_rows())
            .map(|row| {
                grid.row(row)
                    .iter()
                    .map(|&cell| solution.get_integer_value(cell))
                    .collect()
            })
            .collect()
    }
}

/// Rejects instances for which some slot variable could never take a course it must take.
fn check_domains(instance: &TimetableInstance) -> Result<(), ModelError> {
    for room in instance.rooms.iter() {
        if !room.compatible_courses.iter().any(|&compatible| compatible) {
            return Err(ModelError::DomainConstruction {
                grid: "room",
                entity: room.name.clone(),
                reason: "the room cannot host any course".to_owned(),
            });
        }
    }

    for (team_index, team) in instance.teams.iter().enumerate() {
        for (course_index, course) in instance.courses.iter().enumerate() {
            let hosted = instance
                .rooms
                .iter()
                .any(|room| room.compatible_courses[course_index]);
            if instance.required_volume(team_index, course_index) > 0 && !hosted {
                return Err(ModelError::DomainConstruction {
                    grid: "team",
                    entity: team.name.clone(),
                    reason: format!("no room can host the required course '{}'", course.name),
                });
            }
        }
    }

    Ok(())
}

struct ModelBuilder<'a> {
    instance: &'a TimetableInstance,
    solver: &'a mut Solver,
    /// The constant 1, the target of "at least one" sums.
    one: DomainId,
}

// Variables
impl ModelBuilder<'_> {
    fn team_slots(&mut self) -> VariableGrid {
        let instance = self.instance;
        let horizon = instance.horizon;

        VariableGrid::new(instance.teams.len(), horizon.num_slots(), |team, slot| {
            let name = format!("team[{}][{slot}]", instance.teams[team].name);
            if !instance.teams[team].available_days[horizon.day_of_slot(slot)] {
                return self
                    .solver
                    .new_named_bounded_integer(UNAVAILABLE, UNAVAILABLE, name);
            }

            let values = std::iter::once(NO_SESSION)
                .chain(self.required_courses(team).map(|course| course as i32))
                .collect::<Vec<_>>();
            self.solver.new_named_sparse_integer(values, name)
        })
    }

    fn instructor_slots(&mut self) -> VariableGrid {
        let instance = self.instance;
        let horizon = instance.horizon;

        let mut on_leave = vec![vec![false; horizon.days]; instance.num_instructors];
        for leave in instance.leaves.iter() {
            for day in horizon.days_between(leave.first_day, leave.last_day) {
                on_leave[leave.instructor][day] = true;
            }
        }

        VariableGrid::new(instance.num_instructors, horizon.num_slots(), |instructor, slot| {
            let name = format!("instructor[{instructor}][{slot}]");
            if on_leave[instructor][horizon.day_of_slot(slot)] {
                return self
                    .solver
                    .new_named_bounded_integer(UNAVAILABLE, UNAVAILABLE, name);
            }

            let values = std::iter::once(NO_SESSION)
                .chain(0..instance.courses.len() as i32)
                .collect::<Vec<_>>();
            self.solver.new_named_sparse_integer(values, name)
        })
    }

    fn room_slots(&mut self) -> VariableGrid {
        let instance = self.instance;

        VariableGrid::new(instance.rooms.len(), instance.horizon.num_slots(), |room, slot| {
            let room = &instance.rooms[room];
            let values = [UNAVAILABLE, NO_SESSION]
                .into_iter()
                .chain(
                    room.compatible_courses
                        .iter()
                        .enumerate()
                        .filter(|&(_, &compatible)| compatible)
                        .map(|(course, _)| course as i32),
                )
                .collect::<Vec<_>>();
            self.solver
                .new_named_sparse_integer(values, format!("room[{}][{slot}]", room.name))
        })
    }

    fn required_courses(&self, team: usize) -> impl Iterator<Item = usize> + '_ {
        (0..self.instance.courses.len())
            .filter(move |&course| self.instance.required_volume(team, course) > 0)
    }
}

// Constraints
impl ModelBuilder<'_> {
    /// Posts the constraint; infeasibility at the root is left to the search to report.
    fn post(&mut self, constraint: Constraint) -> Result<(), ModelError> {
        match self.solver.add_constraint(constraint) {
            Ok(()) => Ok(()),
            Err(
                ConstraintOperationError::InfeasiblePropagator
                | ConstraintOperationError::InfeasibleState,
            ) => Ok(()),
            Err(error) => Err(error.into()),
        }
    }

    /// In every slot, each course is taken by as many teams as instructors and rooms.
    fn post_session_agreement(&mut self, model: &TimetableModel) -> Result<(), ModelError> {
        let instance = self.instance;
        let max_sessions = instance
            .teams
            .len()
            .min(instance.num_instructors)
            .min(instance.rooms.len()) as i32;

        for slot in 0..instance.horizon.num_slots() {
            let teams = model.team_slots.column(slot);
            let instructors = model.instructor_slots.column(slot);
            let rooms = model.room_slots.column(slot);

            for course in 0..instance.courses.len() as i32 {
                let sessions = self.solver.new_named_bounded_integer(
                    0,
                    max_sessions,
                    format!("sessions[{slot}][{course}]"),
                );

                self.post(constraints::count(course, teams.clone(), sessions))?;
                self.post(constraints::count(course, instructors.clone(), sessions))?;
                self.post(constraints::count(course, rooms.clone(), sessions))?;
            }
        }

        Ok(())
    }

    /// Every team takes each course for exactly its required number of slots.
    fn post_team_volumes(&mut self, team_slots: &VariableGrid) -> Result<(), ModelError> {
        for team in 0..self.instance.teams.len() {
            for course in 0..self.instance.courses.len() {
                let volume = self.instance.required_volume(team, course);
                if volume == 0 {
                    continue;
                }

                let volume = self.solver.new_constant(volume as i32);
                self.post(constraints::count(
                    course as i32,
                    team_slots.row(team),
                    volume,
                ))?;
            }
        }

        Ok(())
    }

    /// On every day, a team spends at most `max_per_day` sessions on each course.
    fn post_daily_bounds(&mut self, team_slots: &VariableGrid) -> Result<(), ModelError> {
        let instance = self.instance;
        let horizon = instance.horizon;

        for team in 0..instance.teams.len() {
            let courses = self.required_courses(team).collect::<Vec<_>>();
            if courses.is_empty() {
                continue;
            }

            for day in 0..horizon.days {
                if !instance.teams[team].available_days[day] {
                    continue;
                }

                let values = std::iter::once(NO_SESSION)
                    .chain(courses.iter().map(|&course| course as i32))
                    .collect::<Vec<_>>();
                let mut counts = vec![self
                    .solver
                    .new_bounded_integer(0, horizon.slots_per_day as i32)];
                for &course in courses.iter() {
                    let course = &instance.courses[course];
                    let bound = (course.max_per_day * course.duration) as i32;
                    counts.push(self.solver.new_bounded_integer(0, bound));
                }

                self.post(constraints::global_cardinality_closed(
                    team_slots.window(team, day * horizon.slots_per_day, horizon.slots_per_day),
                    values,
                    counts,
                ))?;
            }
        }

        Ok(())
    }

    /// Every course of a team is taught in one block of consecutive weeks, as few as its volume
    /// allows. Weeks in which the team is never available neither count nor break the block.
    fn post_week_contiguity(&mut self, team_slots: &VariableGrid) -> Result<(), ModelError> {
        let instance = self.instance;
        let horizon = instance.horizon;

        for team in 0..instance.teams.len() {
            let available_weeks = (0..horizon.num_weeks())
                .filter(|&week| {
                    horizon
                        .days_of_week(week)
                        .any(|day| instance.teams[team].available_days[day])
                })
                .collect::<Vec<_>>();
            if available_weeks.is_empty() {
                continue;
            }

            let courses = self.required_courses(team).collect::<Vec<_>>();
            for course in courses {
                let capacities = available_weeks
                    .iter()
                    .map(|&week| self.weekly_capacity(team, course, week))
                    .collect::<Vec<_>>();
                let weeks = weeks_required(instance.required_volume(team, course), &capacities);

                let occurs = available_weeks
                    .iter()
                    .map(|&week| self.occurs_in_week(team_slots, team, course, week))
                    .collect::<Result<Vec<_>, _>>()?;

                let num_weeks = self.solver.new_constant(weeks as i32);
                self.post(constraints::sum(occurs.clone(), Relation::Equal, num_weeks))?;

                // a block starts in week w when the course occurs in w but not in the previous
                // available week
                let mut starts = vec![occurs[0]];
                for week in 1..occurs.len() {
                    let starts_here = self.solver.new_boolean();
                    self.post(constraints::reify(
                        constraints::binary_equals(occurs[week], occurs[week - 1], 1),
                        starts_here,
                    ))?;
                    starts.push(starts_here);
                }
                self.post(constraints::sum(starts, Relation::LessEqual, self.one))?;

                debug!(
                    "Course {course} of team {} spans {} weeks",
                    instance.teams[team].name, weeks
                );
            }
        }

        Ok(())
    }

    /// The number of slots the team can spend on the course in the week: the daily capacity on
    /// every day of the week the team is available. A partial week at the end of the horizon
    /// only counts its days inside the horizon.
    fn weekly_capacity(&self, team: usize, course: usize, week: usize) -> u32 {
        let horizon = self.instance.horizon;
        let details = &self.instance.courses[course];
        let daily_capacity =
            (horizon.slots_per_day as u32).min(details.max_per_day * details.duration);

        let available_days = horizon
            .days_of_week(week)
            .filter(|&day| self.instance.teams[team].available_days[day])
            .count() as u32;
        available_days * daily_capacity
    }

    /// A 0-1 variable which is 1 exactly when the team takes the course in the week.
    fn occurs_in_week(
        &mut self,
        team_slots: &VariableGrid,
        team: usize,
        course: usize,
        week: usize,
    ) -> Result<DomainId, ModelError> {
        let instance = self.instance;
        let horizon = instance.horizon;
        let available_days = &instance.teams[team].available_days;

        let mut taken = Vec::new();
        for day in horizon.days_of_week(week) {
            if !available_days[day] {
                continue;
            }
            for slot in day * horizon.slots_per_day..(day + 1) * horizon.slots_per_day {
                let is_course = self.solver.new_boolean();
                self.post(constraints::reify(
                    constraints::equals(team_slots.get(team, slot), course as i32),
                    is_course,
                ))?;
                taken.push(is_course);
            }
        }

        if taken.is_empty() {
            return Ok(self.solver.new_constant(0));
        }

        let occurs = self.solver.new_boolean();
        self.post(constraints::reify(
            constraints::sum(taken, Relation::GreaterEqual, self.one),
            occurs,
        ))?;
        Ok(occurs)
    }

    /// The numbers of days worked by any two instructors differ by at most `spread`.
    fn post_workload_fairness(
        &mut self,
        instructor_slots: &VariableGrid,
        spread: u32,
    ) -> Result<Vec<DomainId>, ModelError> {
        let horizon = self.instance.horizon;

        let mut days_worked = Vec::with_capacity(self.instance.num_instructors);
        for instructor in 0..self.instance.num_instructors {
            let mut works = Vec::with_capacity(horizon.days);
            for day in 0..horizon.days {
                let slots = instructor_slots.window(
                    instructor,
                    day * horizon.slots_per_day,
                    horizon.slots_per_day,
                );

                let mut teaches = Vec::with_capacity(slots.len());
                for &slot in slots {
                    let teaches_in_slot = self.solver.new_boolean();
                    self.post(constraints::reify(
                        constraints::greater_equal(slot, 0),
                        teaches_in_slot,
                    ))?;
                    teaches.push(teaches_in_slot);
                }

                let works_on_day = self.solver.new_boolean();
                self.post(constraints::reify(
                    constraints::sum(teaches, Relation::GreaterEqual, self.one),
                    works_on_day,
                ))?;
                works.push(works_on_day);
            }

            let total = self.solver.new_named_bounded_integer(
                0,
                horizon.days as i32,
                format!("days_worked[{instructor}]"),
            );
            self.post(constraints::sum(works, Relation::Equal, total))?;
            days_worked.push(total);
        }

        for (index, &first) in days_worked.iter().enumerate() {
            for &second in &days_worked[index + 1..] {
                self.post(constraints::distance(
                    first,
                    second,
                    Relation::LessEqual,
                    spread as i32,
                ))?;
            }
        }

        Ok(days_worked)
    }
}

/// The fewest consecutive weeks whose capacities together cover `volume`, or all the weeks when
/// no block does.
///
/// `capacities` holds one entry per week in which the team is available, in order. A partial
/// week at either edge of the horizon carries only the capacity of its days inside the horizon.
fn weeks_required(volume: u32, capacities: &[u32]) -> u32 {
    (1..=capacities.len())
        .find(|&length| {
            capacities
                .windows(length)
                .any(|block| block.iter().sum::<u32>() >= volume)
        })
        .unwrap_or(capacities.len()) as u32
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use timetable_core::results::SatisfactionResult;
    use timetable_core::termination::Indefinite;

    use super::*;
    use crate::input::PlanningHorizon;
    use crate::model::Course;
    use crate::model::Leave;
    use crate::model::RequirementValue;
    use crate::model::Room;
    use crate::model::Team;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 8).expect("valid date")
    }

    /// One course of one slot, at most once a day, one room and `num_instructors` instructors
    /// over a horizon of `days` days with `slots_per_day` slots.
    fn instance(
        days: usize,
        slots_per_day: usize,
        requirements: &[u32],
        num_instructors: usize,
    ) -> TimetableInstance {
        TimetableInstance {
            horizon: PlanningHorizon {
                start_date: start(),
                days,
                slots_per_day,
                days_per_week: 7,
            },
            courses: vec![Course {
                name: "navigation".to_owned(),
                duration: 1,
                max_per_day: 1,
            }],
            teams: requirements
                .iter()
                .enumerate()
                .map(|(index, &whole)| Team {
                    name: format!("T{index}"),
                    available_days: vec![true; days],
                    requirements: vec![RequirementValue { whole, tenths: 0 }],
                })
                .collect(),
            rooms: vec![Room {
                name: "hall".to_owned(),
                compatible_courses: vec![true],
            }],
            num_instructors,
            leaves: vec![],
        }
    }

    fn solve(
        instance: &TimetableInstance,
        options: ModelOptions,
    ) -> (TimetableModel, SatisfactionResult) {
        let mut solver = Solver::default();
        let model =
            TimetableModel::build(instance, options, &mut solver).expect("valid instance");
        let mut brancher = solver.brancher_for_variables(&model.decision_variables());
        let result = solver.satisfy(&mut brancher, &mut Indefinite);
        (model, result)
    }

    #[test]
    fn two_teams_share_the_room_and_instructor_in_turn() {
        let instance = instance(1, 2, &[1, 1], 1);
        let (model, result) = solve(&instance, ModelOptions::default());

        let SatisfactionResult::Solved(solution) = result else {
            panic!("expected a timetable, got {result:?}");
        };
        let teams = TimetableModel::values(model.team_slots(), &solution);
        let instructors = TimetableModel::values(model.instructor_slots(), &solution);
        let rooms = TimetableModel::values(model.room_slots(), &solution);

        assert_eq!(1, teams[0].iter().filter(|&&value| value == 0).count());
        assert_eq!(1, teams[1].iter().filter(|&&value| value == 0).count());
        for slot in 0..2 {
            let sessions = teams.iter().filter(|row| row[slot] == 0).count();
            assert_eq!(1, sessions, "one team per slot");
            assert_eq!(0, instructors[0][slot]);
            assert_eq!(0, rooms[0][slot]);
        }
    }

    #[test]
    fn a_volume_larger_than_the_horizon_is_infeasible() {
        let instance = instance(1, 2, &[3, 1], 1);
        let (_, result) = solve(&instance, ModelOptions::default());

        assert_eq!(SatisfactionResult::Infeasible, result);
    }

    #[test]
    fn instructors_on_leave_are_unavailable_for_the_whole_range() {
        let mut instance = instance(2, 1, &[1], 2);
        instance.leaves.push(Leave {
            instructor: 0,
            first_day: start(),
            last_day: start() + chrono::Duration::days(5),
        });

        let (model, result) = solve(&instance, ModelOptions::default());

        let SatisfactionResult::Solved(solution) = result else {
            panic!("expected a timetable, got {result:?}");
        };
        let instructors = TimetableModel::values(model.instructor_slots(), &solution);
        assert_eq!(vec![UNAVAILABLE, UNAVAILABLE], instructors[0]);
        assert_eq!(1, instructors[1].iter().filter(|&&value| value == 0).count());
    }

    #[test]
    fn the_only_instructor_on_leave_makes_the_timetable_infeasible() {
        let mut instance = instance(2, 1, &[1], 1);
        instance.leaves.push(Leave {
            instructor: 0,
            first_day: start(),
            last_day: start() + chrono::Duration::days(1),
        });

        let (_, result) = solve(&instance, ModelOptions::default());

        assert_eq!(SatisfactionResult::Infeasible, result);
    }

    #[test]
    fn unavailable_days_are_fixed() {
        let mut instance = instance(2, 1, &[1], 1);
        instance.teams[0].available_days[0] = false;

        let (model, result) = solve(&instance, ModelOptions::default());

        let solution = result.solution().expect("feasible").clone();
        let teams = TimetableModel::values(model.team_slots(), &solution);
        assert_eq!(vec![UNAVAILABLE, 0], teams[0]);
    }

    #[test]
    fn sessions_of_a_course_are_bounded_per_day() {
        // two sessions at most once a day need two days
        let (_, result) = solve(&instance(1, 2, &[2], 1), ModelOptions::default());
        assert_eq!(SatisfactionResult::Infeasible, result);

        let (model, result) = solve(&instance(2, 2, &[2], 1), ModelOptions::default());
        let solution = result.solution().expect("feasible").clone();
        let teams = TimetableModel::values(model.team_slots(), &solution);
        assert_eq!(1, teams[0][0..2].iter().filter(|&&value| value == 0).count());
        assert_eq!(1, teams[0][2..4].iter().filter(|&&value| value == 0).count());
    }

    #[test]
    fn fairness_spreads_the_workload_over_instructors() {
        let instance = instance(4, 1, &[1, 1, 1, 1], 2);
        let options = ModelOptions {
            fairness_spread: Some(0),
            week_contiguity: false,
        };

        let (model, result) = solve(&instance, options);

        let solution = result.solution().expect("feasible").clone();
        let days_worked = model
            .instructor_days_worked()
            .iter()
            .map(|&days| solution.get_integer_value(days))
            .collect::<Vec<_>>();
        assert_eq!(vec![2, 2], days_worked);
    }

    #[test]
    fn a_course_is_taught_in_consecutive_weeks() {
        // three weeks of two days; three sessions at most once a day need two weeks
        let mut instance = instance(6, 1, &[3], 1);
        instance.horizon.days_per_week = 2;

        let (model, result) = solve(&instance, ModelOptions::default());

        let solution = result.solution().expect("feasible").clone();
        let teams = TimetableModel::values(model.team_slots(), &solution);
        let weeks = (0..3)
            .map(|week| teams[0][2 * week..2 * week + 2].contains(&0))
            .collect::<Vec<_>>();
        assert!(
            weeks == [true, true, false] || weeks == [false, true, true],
            "weeks taught: {weeks:?}"
        );
    }

    #[test]
    fn weeks_are_counted_from_the_capacity_of_each_week() {
        assert_eq!(1, weeks_required(3, &[7, 7]));
        assert_eq!(2, weeks_required(2, &[1, 1]));
        assert_eq!(1, weeks_required(3, &[1, 3, 1]));
        assert_eq!(3, weeks_required(4, &[2, 1, 1]));
        assert_eq!(2, weeks_required(9, &[2, 3]));
    }

    #[test]
    fn contiguity_follows_the_weeks_the_team_is_available() {
        // one available day in each of two weeks; two sessions need both weeks
        let mut instance = instance(14, 1, &[2], 1);
        instance.teams[0].available_days = (0..14).map(|day| day == 0 || day == 7).collect();

        let (model, result) = solve(&instance, ModelOptions::default());

        let solution = result.solution().expect("feasible").clone();
        let teams = TimetableModel::values(model.team_slots(), &solution);
        assert_eq!(0, teams[0][0]);
        assert_eq!(0, teams[0][7]);
    }

    #[test]
    fn a_week_without_availability_does_not_break_the_block() {
        let mut instance = instance(21, 1, &[2], 1);
        instance.teams[0].available_days = (0..21).map(|day| day == 0 || day == 14).collect();

        let (model, result) = solve(&instance, ModelOptions::default());

        let solution = result.solution().expect("feasible").clone();
        let teams = TimetableModel::values(model.team_slots(), &solution);
        assert_eq!(0, teams[0][0]);
        assert_eq!(0, teams[0][14]);
    }

    #[test]
    fn a_partial_last_week_counts_only_its_days() {
        // weeks of three days over five days: the last week holds two days
        let mut instance = instance(5, 1, &[3], 1);
        instance.horizon.days_per_week = 3;
        instance.teams[0].available_days = vec![false, false, true, true, true];

        let (model, result) = solve(&instance, ModelOptions::default());

        let solution = result.solution().expect("feasible").clone();
        let teams = TimetableModel::values(model.team_slots(), &solution);
        assert_eq!(vec![UNAVAILABLE, UNAVAILABLE, 0, 0, 0], teams[0]);
    }

    #[test]
    fn fairness_holds_when_teams_have_gaps() {
        // T0 trains on the first two days only, T1 on the last day only
        let mut instance = instance(4, 1, &[2, 1], 2);
        instance.teams[0].available_days = vec![true, true, false, false];
        instance.teams[1].available_days = vec![false, false, false, true];

        let strict = ModelOptions {
            fairness_spread: Some(0),
            ..ModelOptions::default()
        };
        let (_, result) = solve(&instance, strict);
        assert_eq!(SatisfactionResult::Infeasible, result);

        let loose = ModelOptions {
            fairness_spread: Some(1),
            ..ModelOptions::default()
        };
        let (model, result) = solve(&instance, loose);
        let solution = result.solution().expect("feasible").clone();
        let mut days_worked = model
            .instructor_days_worked()
            .iter()
            .map(|&days| solution.get_integer_value(days))
            .collect::<Vec<_>>();
        days_worked.sort_unstable();
        assert_eq!(vec![1, 2], days_worked);
    }

    #[test]
    fn rooms_without_courses_are_rejected() {
        let mut instance = instance(1, 1, &[1], 1);
        instance.rooms.push(Room {
            name: "storage".to_owned(),
            compatible_courses: vec![false],
        });

        let error =
            TimetableModel::build(&instance, ModelOptions::default(), &mut Solver::default())
                .expect_err("empty room domain");

        assert!(matches!(
            error,
            ModelError::DomainConstruction { grid: "room", ref entity, .. } if entity == "storage"
        ));
    }

    #[test]
    fn courses_no_room_can_host_are_rejected() {
        let mut instance = instance(1, 1, &[1], 1);
        instance.courses.push(Course {
            name: "diving".to_owned(),
            duration: 1,
            max_per_day: 1,
        });
        instance.rooms[0].compatible_courses.push(false);
        instance.teams[0]
            .requirements
            .push(RequirementValue { whole: 1, tenths: 0 });

        let error =
            TimetableModel::build(&instance, ModelOptions::default(), &mut Solver::default())
                .expect_err("course without room");

        assert!(matches!(
            error,
            ModelError::DomainConstruction { grid: "team", ref entity, .. } if entity == "T0"
        ));
    }
}
