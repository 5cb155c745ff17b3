use std::fmt;

use generational_arena::{Arena, Index};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::domain::error::{DomainError, DomainResult};

/// Data payload for tree nodes representing taxons or tagged content items.
///
/// Values are taken from the source record as they are: a required field
/// that the record carries as `null` stays `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeData {
    /// Display label
    pub name: Option<String>,
    /// Stable external identifier
    pub content_id: Option<String>,
    /// Canonical location, e.g. `/education/school-curriculum`
    pub base_path: Option<String>,
    /// Editorial label, absent on most payloads
    pub internal_name: Option<String>,
}

impl NodeData {
    pub fn new(
        name: impl Into<String>,
        content_id: impl Into<String>,
        base_path: impl Into<String>,
        internal_name: Option<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            content_id: Some(content_id.into()),
            base_path: Some(base_path.into()),
            internal_name,
        }
    }
}

impl fmt::Display for NodeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({})",
            self.name.as_deref().unwrap_or_default(),
            self.base_path.as_deref().unwrap_or_default()
        )
    }
}

/// Tree node in the arena-based hierarchy structure.
#[derive(Debug)]
pub struct TreeNode {
    /// Taxon or content item data for this node
    pub data: NodeData,
    /// Index of parent node in the arena, None for root nodes
    pub parent: Option<Index>,
    /// Indices of child nodes in the arena, in payload order
    pub children: Vec<Index>,
    /// Directly tagged taxons; may point anywhere in the arena
    pub linked_taxons: Vec<Index>,
}

/// How `taxons_with_ancestors` treats taxons reached more than once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxonAggregation {
    /// Every breadcrumb trail in full, repeated ancestors included
    #[default]
    All,
    /// First occurrence of each content id only, order preserved
    Unique,
}

/// Arena-based tree structure for taxonomy hierarchies.
///
/// Uses generational arena for memory-safe node references and O(1) lookups.
/// One arena holds everything produced by a single parse: the primary item,
/// its descendants, its ancestor chain and the ancestor chain of every tagged
/// taxon. Each of those chains may have its own root.
///
/// Edges are append-only. [`TreeArena::attach`] is the only way to create a
/// parent/child edge and it keeps both directions consistent.
#[derive(Debug, Default)]
pub struct TreeArena {
    /// Arena storage for all tree nodes
    arena: Arena<TreeNode>,
}

impl TreeArena {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Inserts a detached node. It stays a root until attached under a parent.
    #[instrument(level = "trace", skip(self))]
    pub fn insert_node(&mut self, data: NodeData) -> Index {
        self.arena.insert(TreeNode {
            data,
            parent: None,
            children: Vec::new(),
            linked_taxons: Vec::new(),
        })
    }

    #[instrument(level = "trace", skip(self))]
    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    pub fn node_data(&self, idx: Index) -> Option<&NodeData> {
        self.get_node(idx).map(|node| &node.data)
    }

    pub fn parent(&self, idx: Index) -> Option<Index> {
        self.get_node(idx).and_then(|node| node.parent)
    }

    pub fn children(&self, idx: Index) -> &[Index] {
        self.get_node(idx)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn linked_taxons(&self, idx: Index) -> &[Index] {
        self.get_node(idx)
            .map(|node| node.linked_taxons.as_slice())
            .unwrap_or(&[])
    }

    /// Makes `child` the last child of `parent` and sets its parent link.
    ///
    /// The child must currently be a root, and must not be `parent` itself or
    /// one of its ancestors.
    #[instrument(level = "trace", skip(self))]
    pub fn attach(&mut self, parent: Index, child: Index) -> DomainResult<()> {
        if !self.arena.contains(parent) {
            return Err(DomainError::NodeNotFound(parent));
        }
        let child_node = self
            .arena
            .get(child)
            .ok_or(DomainError::NodeNotFound(child))?;
        if child_node.parent.is_some() {
            return Err(DomainError::AlreadyAttached(child));
        }
        if parent == child || self.parent_chain(parent).any(|a| a == child) {
            return Err(DomainError::WouldCycle { parent, child });
        }

        if let Some(node) = self.arena.get_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.arena.get_mut(parent) {
            node.children.push(child);
        }
        Ok(())
    }

    /// Records a direct taxon association. Duplicates are kept.
    #[instrument(level = "trace", skip(self))]
    pub fn add_taxon(&mut self, item: Index, taxon: Index) -> DomainResult<()> {
        if !self.arena.contains(taxon) {
            return Err(DomainError::NodeNotFound(taxon));
        }
        let node = self
            .arena
            .get_mut(item)
            .ok_or(DomainError::NodeNotFound(item))?;
        node.linked_taxons.push(taxon);
        Ok(())
    }

    #[instrument(level = "trace", skip(self))]
    pub fn iter_pre_order(&self, start: Index) -> PreOrderIterator {
        PreOrderIterator::new(self, start)
    }

    /// `start` followed by the pre-order of each child, left to right.
    pub fn pre_order(&self, start: Index) -> Vec<Index> {
        self.iter_pre_order(start).map(|(idx, _)| idx).collect()
    }

    pub fn descendants(&self, start: Index) -> Vec<Index> {
        self.iter_pre_order(start).skip(1).map(|(idx, _)| idx).collect()
    }

    pub fn count(&self, start: Index) -> usize {
        self.iter_pre_order(start).count()
    }

    pub fn is_root(&self, idx: Index) -> bool {
        self.get_node(idx).is_some_and(|node| node.parent.is_none())
    }

    /// Parent links walked upwards, nearest ancestor first.
    pub fn parent_chain(&self, idx: Index) -> ParentChain {
        ParentChain {
            arena: self,
            current: self.parent(idx),
        }
    }

    /// Distance to the root of the node's chain; 0 for a root.
    pub fn depth(&self, idx: Index) -> usize {
        self.parent_chain(idx).count()
    }

    /// Root-first path to the parent, excluding the node itself.
    pub fn ancestors(&self, idx: Index) -> Vec<Index> {
        let mut ancestors: Vec<Index> = self.parent_chain(idx).collect();
        ancestors.reverse();
        ancestors
    }

    /// Root-first path including the node itself.
    pub fn breadcrumb_trail(&self, idx: Index) -> Vec<Index> {
        if !self.arena.contains(idx) {
            return Vec::new();
        }
        let mut trail = self.ancestors(idx);
        trail.push(idx);
        trail
    }

    pub fn root_of(&self, idx: Index) -> Index {
        self.parent_chain(idx).last().unwrap_or(idx)
    }

    /// Breadcrumb trail of every linked taxon, concatenated in taxon order.
    #[instrument(level = "debug", skip(self))]
    pub fn taxons_with_ancestors(&self, item: Index, aggregation: TaxonAggregation) -> Vec<Index> {
        let trails = self
            .linked_taxons(item)
            .iter()
            .flat_map(|&taxon| self.breadcrumb_trail(taxon));

        match aggregation {
            TaxonAggregation::All => trails.collect(),
            TaxonAggregation::Unique => trails
                // nodes without a content id are never merged
                .unique_by(|&idx| {
                    match self.node_data(idx).and_then(|data| data.content_id.as_deref()) {
                        Some(content_id) => Ok(content_id),
                        None => Err(idx),
                    }
                })
                .collect(),
        }
    }

    /// Every parentless node, in insertion order.
    pub fn roots(&self) -> Vec<Index> {
        self.arena
            .iter()
            .filter(|(_, node)| node.parent.is_none())
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Number of levels in the subtree below `start`, counting `start` itself.
    #[instrument(level = "debug", skip(self))]
    pub fn height(&self, start: Index) -> usize {
        self.calculate_height(start)
    }

    #[instrument(level = "trace", skip(self))]
    fn calculate_height(&self, node_idx: Index) -> usize {
        if let Some(node) = self.get_node(node_idx) {
            1 + node
                .children
                .iter()
                .map(|&child| self.calculate_height(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Collects all leaf nodes (nodes with no children) below `start`, in pre-order.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_nodes(&self, start: Index) -> Vec<Index> {
        self.iter_pre_order(start)
            .filter(|(_, node)| node.children.is_empty())
            .map(|(idx, _)| idx)
            .collect()
    }
}

pub struct PreOrderIterator<'a> {
    arena: &'a TreeArena,
    stack: Vec<Index>,
}

impl<'a> PreOrderIterator<'a> {
    fn new(arena: &'a TreeArena, start: Index) -> Self {
        Self {
            arena,
            stack: vec![start],
        }
    }
}

impl<'a> Iterator for PreOrderIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}

pub struct ParentChain<'a> {
    arena: &'a TreeArena,
    current: Option<Index>,
}

impl<'a> Iterator for ParentChain<'a> {
    type Item = Index;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;
        self.current = self.arena.parent(current);
        Some(current)
    }
}
