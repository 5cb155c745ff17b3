//! Tree builder for publishing service responses.
//!
//! Walks a content item and its expanded links and produces a [`LinkedTree`]:
//! - child links are followed downwards and attached in payload order
//! - only the first parent link is followed, recursively, to rebuild the
//!   item's ancestor chain
//! - each directly tagged taxon gets its own, independently rebuilt,
//!   ancestor chain and is recorded as a linked taxon of the item

use generational_arena::Index;
use serde_json::Value;
use tracing::{debug, instrument, trace};

use crate::domain::arena::{NodeData, TreeArena};
use crate::domain::cursor::LinkedTree;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::fields::{
    describe, internal_name, link_entries, required_str, BASE_PATH, CHILD_TAXONS, CONTENT_ID,
    DEFAULT_NAME_FIELD, EXPANDED_LINKS, LINKS, PARENT_TAXONS, TAXONS,
};

/// Default limit on how many levels a single chain may span.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Result type for tree operations.
pub type TreeResult<T> = DomainResult<T>;

/// Constructs linked trees from content item and expanded-links records.
pub struct TreeBuilder {
    name_field: String,
    max_depth: usize,
    arena: TreeArena,
    /// Content ids on the current recursion path, for cycle detection
    visited_ids: Vec<Option<String>>,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            name_field: DEFAULT_NAME_FIELD.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
            arena: TreeArena::new(),
            visited_ids: Vec::new(),
        }
    }

    /// Reads display names from `name_field` instead of `title`.
    pub fn with_name_field(mut self, name_field: impl Into<String>) -> Self {
        self.name_field = name_field.into();
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn name_field(&self) -> &str {
        &self.name_field
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Build from a `get_content` record and a `get_expanded_links` record.
    #[instrument(level = "debug", skip_all, fields(content_id = %describe(content_item)))]
    pub fn build(&mut self, content_item: &Value, expanded_links: &Value) -> TreeResult<LinkedTree> {
        self.build_linked(content_item, expanded_links.get(EXPANDED_LINKS))
    }

    /// Build from a single record that carries its own links, under
    /// `expanded_links` or, failing that, under `links`.
    #[instrument(level = "debug", skip_all, fields(content_id = %describe(message)))]
    pub fn build_from_message(&mut self, message: &Value) -> TreeResult<LinkedTree> {
        let links = message
            .get(EXPANDED_LINKS)
            .filter(|links| !links.is_null())
            .or_else(|| message.get(LINKS));
        self.build_linked(message, links)
    }

    fn build_linked(&mut self, record: &Value, links: Option<&Value>) -> TreeResult<LinkedTree> {
        // Reset state for a fresh build
        self.arena = TreeArena::new();
        self.visited_ids.clear();

        let result = self.link_item(record, links);

        let arena = std::mem::take(&mut self.arena);
        self.visited_ids.clear();
        let item = result?;

        debug!(nodes = arena.len(), roots = arena.roots().len(), "built linked tree");
        LinkedTree::new(arena, item)
    }

    fn link_item(&mut self, record: &Value, links: Option<&Value>) -> TreeResult<Index> {
        let item = self.enter(record)?;

        for entry in link_entries(record, links, CHILD_TAXONS)? {
            let child = self.parse_child(entry)?;
            self.arena.attach(item, child)?;
        }

        // Assume no taxon has multiple parents: the rest are discarded
        if let Some(entry) = link_entries(record, links, PARENT_TAXONS)?.first() {
            let parent = self.parse_parent(entry)?;
            self.arena.attach(parent, item)?;
        }
        self.visited_ids.pop();

        // Taxon chains are rebuilt independently, starting from an empty path
        for entry in link_entries(record, links, TAXONS)? {
            let taxon = self.parse_parent(entry)?;
            self.arena.add_taxon(item, taxon)?;
        }

        Ok(item)
    }

    /// Builds `entry` and its whole child subtree; returns the subtree root.
    fn parse_child(&mut self, entry: &Value) -> TreeResult<Index> {
        let node = self.enter(entry)?;

        for child_entry in link_entries(entry, entry.get(LINKS), CHILD_TAXONS)? {
            let child = self.parse_child(child_entry)?;
            self.arena.attach(node, child)?;
        }

        self.visited_ids.pop();
        Ok(node)
    }

    /// Builds `entry` below its first-parent chain; returns `entry`'s node,
    /// not the top of the chain.
    fn parse_parent(&mut self, entry: &Value) -> TreeResult<Index> {
        let node = self.enter(entry)?;

        if let Some(parent_entry) = link_entries(entry, entry.get(LINKS), PARENT_TAXONS)?.first() {
            let parent = self.parse_parent(parent_entry)?;
            self.arena.attach(parent, node)?;
        }

        self.visited_ids.pop();
        Ok(node)
    }

    /// Inserts the node for `record` and pushes its id onto the recursion path.
    fn enter(&mut self, record: &Value) -> TreeResult<Index> {
        let data = self.node_data(record)?;

        if self.visited_ids.len() >= self.max_depth {
            return Err(DomainError::NestingTooDeep {
                content_id: describe(record),
                limit: self.max_depth,
            });
        }
        // records without a content id cannot be recognised as revisits
        if let Some(content_id) = &data.content_id {
            if self.visited_ids.contains(&data.content_id) {
                return Err(DomainError::CyclicPayload(content_id.clone()));
            }
        }

        trace!(content_id = %describe(record), depth = self.visited_ids.len(), "enter");
        self.visited_ids.push(data.content_id.clone());
        Ok(self.arena.insert_node(data))
    }

    fn node_data(&self, record: &Value) -> TreeResult<NodeData> {
        Ok(NodeData {
            content_id: required_str(record, CONTENT_ID)?,
            name: required_str(record, &self.name_field)?,
            base_path: required_str(record, BASE_PATH)?,
            internal_name: internal_name(record),
        })
    }
}
