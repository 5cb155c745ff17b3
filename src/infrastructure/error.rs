//! Infrastructure-level errors raised by publishing service collaborators

use thiserror::Error;

/// Errors from fetching records through a [`PublishingApi`](super::traits::PublishingApi).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InfraError {
    #[error("{resource} not found for content id {content_id}")]
    NotFound {
        resource: &'static str,
        content_id: String,
    },

    #[error("publishing service unavailable: {message}")]
    Unavailable { message: String },
}

impl InfraError {
    pub fn not_found(resource: &'static str, content_id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            content_id: content_id.into(),
        }
    }
}

/// Result type for infrastructure layer operations.
pub type InfraResult<T> = Result<T, InfraError>;
