use thiserror::Error;
use timetable_solver::input::InputError;
use timetable_solver::model::ModelError;

pub(crate) type TimetableResult<T> = Result<T, TimetableError>;

#[derive(Error, Debug)]
pub(crate) enum TimetableError {
    #[error("IO error, more details: {0}")]
    IOError(#[from] std::io::Error),
    #[error("The instance could not be read: {0}")]
    Input(#[from] InputError),
    #[error("The timetable could not be modelled: {0}")]
    Model(#[from] ModelError),
    #[error("Invalid start date '{0}', expected YYYY-MM-DD or DD/MM/YYYY")]
    InvalidStartDate(String),
    #[error("Invalid planning horizon: {0}")]
    InvalidHorizon(&'static str),
}
