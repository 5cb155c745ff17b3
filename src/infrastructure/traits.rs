//! I/O boundary traits for testability
//!
//! These traits abstract the publishing service, allowing services
//! to be tested with in-memory implementations.

use std::collections::HashMap;

use serde_json::Value;
use tracing::instrument;

use crate::infrastructure::error::{InfraError, InfraResult};

/// Read side of the content-publishing service.
pub trait PublishingApi: Send + Sync {
    /// Content item record for `content_id` (title, base path, details, ...).
    fn get_content(&self, content_id: &str) -> InfraResult<Value>;

    /// Expanded-links record for `content_id`; its link categories sit under
    /// `expanded_links`.
    fn get_expanded_links(&self, content_id: &str) -> InfraResult<Value>;
}

// ============================================================
// IN-MEMORY IMPLEMENTATION
// ============================================================

/// Map-backed publishing service, for fixtures and captured responses.
#[derive(Debug, Default, Clone)]
pub struct InMemoryPublishingApi {
    content: HashMap<String, Value>,
    expanded_links: HashMap<String, Value>,
}

impl InMemoryPublishingApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_content(&mut self, content_id: impl Into<String>, record: Value) {
        self.content.insert(content_id.into(), record);
    }

    pub fn insert_expanded_links(&mut self, content_id: impl Into<String>, record: Value) {
        self.expanded_links.insert(content_id.into(), record);
    }

    /// Registers both responses for one content id.
    pub fn with_item(
        mut self,
        content_id: impl Into<String>,
        content: Value,
        expanded_links: Value,
    ) -> Self {
        let content_id = content_id.into();
        self.insert_content(content_id.clone(), content);
        self.insert_expanded_links(content_id, expanded_links);
        self
    }
}

impl PublishingApi for InMemoryPublishingApi {
    #[instrument(level = "trace", skip(self))]
    fn get_content(&self, content_id: &str) -> InfraResult<Value> {
        self.content
            .get(content_id)
            .cloned()
            .ok_or_else(|| InfraError::not_found("content item", content_id))
    }

    #[instrument(level = "trace", skip(self))]
    fn get_expanded_links(&self, content_id: &str) -> InfraResult<Value> {
        self.expanded_links
            .get(content_id)
            .cloned()
            .ok_or_else(|| InfraError::not_found("expanded links", content_id))
    }
}
