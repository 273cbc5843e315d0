use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("invalid skip-branches pattern '{pattern}': {source}")]
    InvalidIgnorePattern {
        pattern: String,
        source: regex::Error,
    },
    #[error("issue tracker error: {0}")]
    IssueTracker(String),
    #[error("ticket {0} not found in the issue tracker")]
    TicketNotFound(String),
    #[error("source control error: {0}")]
    SourceControl(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
