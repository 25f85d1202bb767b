//! Error types for timetable scheduling.
//!
//! Only genuine failures live here. A section with no meeting blocks and a
//! requirement with no candidate sections are both valid input: the first
//! never conflicts, the second makes the formula unsatisfiable and yields
//! zero schedules.

use thiserror::Error;

use crate::cnf::Var;
use crate::validation::ValidationError;

/// Result type for timetable operations.
pub type Result<T> = std::result::Result<T, ScheduleError>;

/// Errors surfaced by the scheduling pipeline.
#[derive(Error, Debug)]
pub enum ScheduleError {
    /// Section data was rejected at ingestion.
    #[error("Invalid input: {}", join_messages(.0))]
    InvalidInput(Vec<ValidationError>),

    /// A model referenced a variable that was never registered.
    ///
    /// The registry and the formula must come from the same run; this
    /// indicates a construction bug, not bad input.
    #[error("Unknown variable: {0}")]
    UnknownVariable(Var),

    /// The request names more distinct courses than the configured cap.
    #[error("Too many courses: {count} requested, at most {max} allowed")]
    TooManyCourses {
        /// Distinct course ids in the request.
        count: usize,
        /// Configured cap.
        max: usize,
    },

    /// The satisfiability backend failed while searching.
    #[error("Solver error: {0}")]
    Solver(String),

    /// Configuration could not be parsed.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ScheduleError {
    /// Validation errors carried by an `InvalidInput` error.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            ScheduleError::InvalidInput(errors) => errors,
            _ => &[],
        }
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<Vec<ValidationError>> for ScheduleError {
    fn from(errors: Vec<ValidationError>) -> Self {
        ScheduleError::InvalidInput(errors)
    }
}

impl From<toml::de::Error> for ScheduleError {
    fn from(err: toml::de::Error) -> Self {
        ScheduleError::Config(err.to_string())
    }
}
