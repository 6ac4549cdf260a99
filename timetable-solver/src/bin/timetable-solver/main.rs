mod os_signal_termination;
mod result;

use std::fs::File;
use std::io::BufWriter;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use log::error;
use log::info;
use log::warn;
use log::LevelFilter;
use os_signal_termination::OsSignal;
use result::TimetableError;
use result::TimetableResult;
use timetable_core::convert_case::Case;
use timetable_core::options::*;
use timetable_core::rand::rngs::SmallRng;
use timetable_core::rand::SeedableRng;
use timetable_core::statistics::configure_statistic_logging;
use timetable_core::termination::Combinator;
use timetable_core::termination::TimeBudget;
use timetable_core::Solver;
use timetable_solver::input::parse_date;
use timetable_solver::input::AvailabilityConvention;
use timetable_solver::input::InputFiles;
use timetable_solver::input::PlanningHorizon;
use timetable_solver::model::ModelOptions;
use timetable_solver::model::TimetableModel;
use timetable_solver::report::write_result;

#[derive(Debug, Parser)]
#[command(
    help_template = "\
{before-help}{name} {version}
Authors: {author}
About: {about}

{usage-heading}\n{tab}{usage}

{all-args}{after-help}
",
    author,
    version,
    about,
    arg_required_else_help = true
)]
struct Args {
    /// The availability of every team: a header row `team;day1;day2;...` followed by one row
    /// per team with an availability marker for each day of the planning horizon.
    #[arg(long, verbatim_doc_comment)]
    availability: PathBuf,

    /// The requirements of every team: a header row `team;course0;course1;...` followed by
    /// one row per team with a `whole.tenths` requirement for every course.
    #[arg(long, verbatim_doc_comment)]
    requirements: PathBuf,

    /// The course catalogue: `course;duration;max_per_day`, with the duration of a session in
    /// slots and the largest number of sessions a team may take on one day.
    #[arg(long, verbatim_doc_comment)]
    courses: PathBuf,

    /// The rooms: `room;course0;course1;...` with `1` when the room can host the course and
    /// `0` otherwise.
    #[arg(long, verbatim_doc_comment)]
    rooms: PathBuf,

    /// The leaves of the instructors: `instructor;start;end` with the index of the
    /// instructor and an inclusive range of dates.
    ///
    /// Possible values: path (Optional)
    #[arg(long, verbatim_doc_comment)]
    leaves: Option<PathBuf>,

    /// The first day of the planning horizon, as `YYYY-MM-DD` or `DD/MM/YYYY`.
    #[arg(long = "start-date", verbatim_doc_comment)]
    start_date: String,

    /// The number of days in the planning horizon.
    ///
    /// Possible values: usize
    #[arg(long, verbatim_doc_comment)]
    days: usize,

    /// The number of time slots in a day.
    ///
    /// Possible values: usize
    #[arg(long = "slots-per-day", verbatim_doc_comment)]
    slots_per_day: usize,

    /// The number of consecutive days which make up a week, counted from the start date.
    ///
    /// Possible values: usize
    #[arg(long = "days-per-week", default_value_t = 7, verbatim_doc_comment)]
    days_per_week: usize,

    /// The number of instructors; they are identified by their index.
    ///
    /// Possible values: usize
    #[arg(long, verbatim_doc_comment)]
    instructors: usize,

    /// The marker in the availability file which means that a team is available.
    #[arg(long = "available-marker", default_value = "J", verbatim_doc_comment)]
    available_marker: String,

    /// Reads the "--available-marker" as unavailable instead, and every other cell as
    /// available.
    ///
    /// Possible values: bool
    #[arg(long = "marker-means-unavailable", verbatim_doc_comment)]
    marker_means_unavailable: bool,

    /// Decides the sequence based on which the restarts are performed.
    ///
    /// - The "constant" approach uses a constant number of failures before another restart is
    ///   triggered
    /// - The "geometric" approach uses a geometrically increasing sequence
    /// - The "luby" approach uses a recursive sequence of the form 1, 1, 2, 1, 1, 2, 4, 1, 1, 2,
    ///   1, 1, 2, 4, 8, 1, 1, 2.... (see "Optimal speedup of Las Vegas algorithms - Luby et al.
    ///   (1993)")
    ///
    /// To be used in combination with "--restart-base-interval".
    #[arg(long, value_enum, default_value_t)]
    restart_sequence_generator_type: SequenceGeneratorType,

    /// The base interval length is used as a multiplier to the restart sequence.
    /// - In the case of the "constant" restart sequence this argument indicates the constant which
    ///   is used to determine when a restart occurs
    /// - For the "geometric" approach this argument indicates the starting value of the sequence
    /// - For the "luby" approach, the sequence is multiplied by this value
    ///
    /// For example, constant restarts with base interval 50 means a restart is triggered every 50
    /// failures.
    ///
    /// Possible values: u64
    #[arg(
        long = "restart-base-interval",
        default_value_t = 100,
        verbatim_doc_comment
    )]
    restart_base_interval: u64,

    /// The coefficient in the geometric sequence `x_i = x_{i-1} * "--restart-geometric-coef"`
    /// where `x_1 = "--restart-base-interval"`. Used only if "--restart-sequence-generator-type"
    /// is assigned to "geometric".
    ///
    /// Possible values: f64 (Optional)
    #[arg(long = "restart-geometric-coef", verbatim_doc_comment)]
    restart_geometric_coef: Option<f64>,

    /// Determines that no restarts are allowed by the solver.
    ///
    /// Possible values: bool
    #[arg(long = "no-restarts", verbatim_doc_comment)]
    no_restarts: bool,

    /// The largest allowed difference between the number of days worked by any two
    /// instructors. Without it the workload is not balanced.
    ///
    /// Possible values: u32 (Optional)
    #[arg(long = "fairness-spread", verbatim_doc_comment)]
    fairness_spread: Option<u32>,

    /// Allows a course of a team to be spread over weeks which are not consecutive.
    ///
    /// Possible values: bool
    #[arg(long = "no-week-contiguity", verbatim_doc_comment)]
    no_week_contiguity: bool,

    /// The heuristic which picks the next slot variable to branch on.
    #[arg(long = "variable-selection", value_enum, default_value_t)]
    variable_selection: VariableSelection,

    /// The number of failures after which the search gives up.
    ///
    /// Possible values: u64 (Optional)
    #[arg(long = "max-failures", verbatim_doc_comment)]
    max_failures: Option<u64>,

    /// The number of decisions after which the search gives up.
    ///
    /// Possible values: u64 (Optional)
    #[arg(long = "max-decisions", verbatim_doc_comment)]
    max_decisions: Option<u64>,

    /// The time budget for the solver, given in milliseconds.
    ///
    /// Possible values: u64 (Optional)
    #[arg(short = 't', long = "time-limit", verbatim_doc_comment)]
    time_limit: Option<u64>,

    /// The random seed to use for the Pseudo Random Number Generator.
    ///
    /// Randomisation is used to break ties in the variable selection.
    ///
    /// Possible values: u64
    #[arg(
        short = 'r',
        long = "random-seed",
        default_value_t = 42,
        verbatim_doc_comment
    )]
    random_seed: u64,

    /// The file the timetable is written to; the standard output when absent.
    ///
    /// Possible values: path (Optional)
    #[arg(short = 'o', long = "output", verbatim_doc_comment)]
    output: Option<PathBuf>,

    /// Enables log message output from the solver.
    ///
    /// Possible values: bool
    #[arg(short = 'v', long = "verbose", verbatim_doc_comment)]
    verbose: bool,

    /// Enables logging of statistics from the solver.
    ///
    /// Possible values: bool
    #[arg(short = 's', long = "log-statistics", verbatim_doc_comment)]
    log_statistics: bool,
}

fn configure_logging(verbose: bool, log_statistics: bool) {
    if log_statistics {
        configure_statistic_logging("%% stat:", None, Some(Case::Snake), None);
    }
    let level_filter = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .format(move |buf, record| {
            write!(buf, "% ")?;

            writeln!(buf, "{}", record.args())
        })
        .filter_level(level_filter)
        .target(env_logger::Target::Stdout)
        .init();
    info!("Logging successfully configured");
}

fn main() {
    match run() {
        Ok(()) => {}
        Err(e) => {
            error!("Execution failed, error: {e}");
            std::process::exit(1);
        }
    }
}

fn run() -> TimetableResult<()> {
    let args = Args::parse();

    configure_logging(args.verbose, args.log_statistics);

    let start_date = parse_date(&args.start_date)
        .ok_or_else(|| TimetableError::InvalidStartDate(args.start_date.clone()))?;
    if args.days == 0 || args.slots_per_day == 0 || args.days_per_week == 0 {
        return Err(TimetableError::InvalidHorizon(
            "the days, slots per day and days per week must be positive",
        ));
    }
    let horizon = PlanningHorizon {
        start_date,
        days: args.days,
        slots_per_day: args.slots_per_day,
        days_per_week: args.days_per_week,
    };

    let convention = AvailabilityConvention {
        available_marker: args.available_marker,
        marker_means_available: !args.marker_means_unavailable,
    };
    let files = InputFiles {
        availability: args.availability,
        requirements: args.requirements,
        courses: args.courses,
        rooms: args.rooms,
        leaves: args.leaves,
    };
    let instance = files.read_instance(horizon, &convention, args.instructors)?;

    if args.restart_geometric_coef.is_some()
        && args.restart_sequence_generator_type != SequenceGeneratorType::Geometric
    {
        warn!(
            "The geometric coefficient is ignored by the {} restart sequence",
            args.restart_sequence_generator_type
        );
    }
    let restart_options = RestartOptions {
        sequence_generator_type: args.restart_sequence_generator_type,
        base_interval: args.restart_base_interval,
        geometric_coef: args.restart_geometric_coef,
        no_restarts: args.no_restarts,
    };
    let solver_options = SolverOptions {
        restart_options,
        random_generator: SmallRng::seed_from_u64(args.random_seed),
        variable_selection: args.variable_selection,
        search_budget: SearchBudget {
            max_failures: args.max_failures,
            max_decisions: args.max_decisions,
        },
    };

    let mut solver = Solver::with_options(solver_options);
    let model_options = ModelOptions {
        fairness_spread: args.fairness_spread,
        week_contiguity: !args.no_week_contiguity,
    };
    let model = TimetableModel::build(&instance, model_options, &mut solver)?;

    let mut brancher = solver.brancher_for_variables(&model.decision_variables());
    let time_limit = args
        .time_limit
        .map(|milliseconds| TimeBudget::starting_now(Duration::from_millis(milliseconds)));
    let mut termination = Combinator::new(OsSignal::install(), time_limit);

    let result = solver.satisfy(&mut brancher, &mut termination);
    solver.log_statistics();

    match args.output {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            write_result(&result, &instance, &model, &mut writer)?;
            writer.flush()?;
        }
        None => write_result(&result, &instance, &model, std::io::stdout().lock())?,
    }

    Ok(())
}
