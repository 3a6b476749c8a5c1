//! Error types for timetable-engine operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TimetableError {
    #[error("Malformed time: {0}")]
    MalformedTime(String),

    #[error("Malformed date: {0}")]
    MalformedDate(String),

    #[error("Invalid period catalog: {0}")]
    InvalidCatalog(String),

    #[error("Invalid decision: {0}")]
    InvalidDecision(String),

    #[error("Repository error: {0}")]
    Repository(String),
}

pub type Result<T> = std::result::Result<T, TimetableError>;
