//! Application-level errors (wraps domain and infrastructure errors)

use thiserror::Error;

use crate::domain::DomainError;
use crate::infrastructure::InfraError;

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("fetch failed for content id {content_id}")]
    Fetch {
        content_id: String,
        #[source]
        source: InfraError,
    },

    #[error("config error: {message}")]
    Config { message: String },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
