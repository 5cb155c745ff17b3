//! Taxonomy service
//!
//! Fetches content items through the publishing service boundary and turns
//! them into linked trees.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, instrument};

use crate::application::{ApplicationResult, FetchResultExt};
use crate::config::Settings;
use crate::domain::{LinkedTree, NodeData, TreeBuilder};
use crate::infrastructure::traits::PublishingApi;

/// Service for building linked trees from publishing service responses.
pub struct TaxonomyService {
    api: Arc<dyn PublishingApi>,
    settings: Settings,
}

impl TaxonomyService {
    /// Create a new taxonomy service.
    pub fn new(api: Arc<dyn PublishingApi>, settings: Settings) -> Self {
        Self { api, settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    fn builder(&self) -> TreeBuilder {
        self.settings.builder()
    }

    /// Fetch a content item and its expanded links, then build its tree.
    #[instrument(level = "debug", skip(self))]
    pub fn linked_content_item(&self, content_id: &str) -> ApplicationResult<LinkedTree> {
        let content_item = self.api.get_content(content_id).with_content_id(content_id)?;
        let expanded_links = self
            .api
            .get_expanded_links(content_id)
            .with_content_id(content_id)?;
        self.from_responses(&content_item, &expanded_links)
    }

    /// Build from already fetched `get_content` and `get_expanded_links` responses.
    pub fn from_responses(
        &self,
        content_item: &Value,
        expanded_links: &Value,
    ) -> ApplicationResult<LinkedTree> {
        Ok(self.builder().build(content_item, expanded_links)?)
    }

    /// Build from a downstream message that merges both responses.
    pub fn from_message(&self, message: &Value) -> ApplicationResult<LinkedTree> {
        Ok(self.builder().build_from_message(message)?)
    }

    /// Taxons the content item can be found in: each tagged taxon with its
    /// ancestors, aggregated per `Settings::taxon_aggregation`.
    #[instrument(level = "debug", skip(self))]
    pub fn tagged_taxons(&self, content_id: &str) -> ApplicationResult<Vec<NodeData>> {
        let tree = self.linked_content_item(content_id)?;
        let taxons: Vec<NodeData> = tree
            .item()
            .taxons_with_ancestors(self.settings.taxon_aggregation)
            .into_iter()
            .filter_map(|node| node.data().cloned())
            .collect();
        debug!("tagged_taxons: {} taxons for {}", taxons.len(), content_id);
        Ok(taxons)
    }
}
