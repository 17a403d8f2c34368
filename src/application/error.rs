//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("tree not found: {0}")]
    TreeNotFound(String),

    #[error("build session not found: {0}")]
    SessionNotFound(String),

    #[error("build of '{name}' still has {remaining} pending node(s)")]
    SessionIncomplete { name: String, remaining: usize },

    #[error("build of '{0}' has no pending nodes")]
    NothingPending(String),

    #[error("config error: {message}")]
    Config { message: String },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
