//! Error conversion helpers for publishing service calls
//!
//! Provides an extension trait for attaching the requested content id.

use crate::application::{ApplicationError, ApplicationResult};
use crate::infrastructure::InfraResult;

/// Extension trait for converting `InfraResult` to `ApplicationResult` with context.
pub trait FetchResultExt<T> {
    /// Add the requested content id to a fetch error.
    ///
    /// # Example
    /// ```ignore
    /// api.get_content(content_id)
    ///     .with_content_id(content_id)?;
    /// ```
    fn with_content_id(self, content_id: &str) -> ApplicationResult<T>;
}

impl<T> FetchResultExt<T> for InfraResult<T> {
    fn with_content_id(self, content_id: &str) -> ApplicationResult<T> {
        self.map_err(|source| ApplicationError::Fetch {
            content_id: content_id.to_string(),
            source,
        })
    }
}
