//! Read-only views over a parsed tree.

use std::fmt;

use generational_arena::Index;

use crate::domain::arena::{NodeData, TaxonAggregation, TreeArena};
use crate::domain::error::{DomainError, DomainResult};

/// A borrowed handle on one node of a [`TreeArena`].
///
/// Exposes the node's query surface without handing out the arena's
/// internals. Two handles are equal when they address the same node of the
/// same arena; nodes rebuilt from separate payload chains are distinct even
/// when their data matches.
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    arena: &'a TreeArena,
    index: Index,
}

impl<'a> NodeRef<'a> {
    pub fn new(arena: &'a TreeArena, index: Index) -> Option<Self> {
        arena.get_node(index).map(|_| Self { arena, index })
    }

    /// Indices handed out by the arena itself address live nodes.
    fn wrap(&self, indices: impl IntoIterator<Item = Index>) -> Vec<NodeRef<'a>> {
        indices
            .into_iter()
            .map(|index| NodeRef {
                arena: self.arena,
                index,
            })
            .collect()
    }

    pub fn index(&self) -> Index {
        self.index
    }

    pub fn data(&self) -> Option<&'a NodeData> {
        self.arena.node_data(self.index)
    }

    pub fn name(&self) -> Option<&'a str> {
        self.data().and_then(|data| data.name.as_deref())
    }

    pub fn content_id(&self) -> Option<&'a str> {
        self.data().and_then(|data| data.content_id.as_deref())
    }

    pub fn base_path(&self) -> Option<&'a str> {
        self.data().and_then(|data| data.base_path.as_deref())
    }

    pub fn internal_name(&self) -> Option<&'a str> {
        self.data().and_then(|data| data.internal_name.as_deref())
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.arena
            .parent(self.index)
            .and_then(|idx| NodeRef::new(self.arena, idx))
    }

    pub fn children(&self) -> Vec<NodeRef<'a>> {
        self.wrap(self.arena.children(self.index).iter().copied())
    }

    pub fn linked_taxons(&self) -> Vec<NodeRef<'a>> {
        self.wrap(self.arena.linked_taxons(self.index).iter().copied())
    }

    pub fn pre_order(&self) -> Vec<NodeRef<'a>> {
        self.wrap(self.arena.pre_order(self.index))
    }

    pub fn descendants(&self) -> Vec<NodeRef<'a>> {
        self.wrap(self.arena.descendants(self.index))
    }

    pub fn count(&self) -> usize {
        self.arena.count(self.index)
    }

    pub fn is_root(&self) -> bool {
        self.arena.is_root(self.index)
    }

    pub fn depth(&self) -> usize {
        self.arena.depth(self.index)
    }

    pub fn ancestors(&self) -> Vec<NodeRef<'a>> {
        self.wrap(self.arena.ancestors(self.index))
    }

    pub fn breadcrumb_trail(&self) -> Vec<NodeRef<'a>> {
        self.wrap(self.arena.breadcrumb_trail(self.index))
    }

    pub fn taxons_with_ancestors(&self, aggregation: TaxonAggregation) -> Vec<NodeRef<'a>> {
        self.wrap(self.arena.taxons_with_ancestors(self.index, aggregation))
    }

    pub fn leaf_nodes(&self) -> Vec<NodeRef<'a>> {
        self.wrap(self.arena.leaf_nodes(self.index))
    }

    pub fn height(&self) -> usize {
        self.arena.height(self.index)
    }

    pub fn root(&self) -> NodeRef<'a> {
        NodeRef {
            arena: self.arena,
            index: self.arena.root_of(self.index),
        }
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.arena, other.arena) && self.index == other.index
    }
}

impl Eq for NodeRef<'_> {}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("index", &self.index)
            .field("name", &self.name())
            .field("content_id", &self.content_id())
            .field("base_path", &self.base_path())
            .finish()
    }
}

impl fmt::Display for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.data() {
            Some(data) => fmt::Display::fmt(data, f),
            None => write!(f, "<missing node {:?}>", self.index),
        }
    }
}

/// A fully linked tree produced by one parse, anchored at the primary item.
#[derive(Debug)]
pub struct LinkedTree {
    arena: TreeArena,
    item: Index,
}

impl LinkedTree {
    /// Anchors `arena` at `item`, which must be one of its nodes.
    pub fn new(arena: TreeArena, item: Index) -> DomainResult<Self> {
        if arena.get_node(item).is_none() {
            return Err(DomainError::NodeNotFound(item));
        }
        Ok(Self { arena, item })
    }

    pub fn item(&self) -> NodeRef<'_> {
        NodeRef {
            arena: &self.arena,
            index: self.item,
        }
    }

    pub fn item_index(&self) -> Index {
        self.item
    }

    pub fn arena(&self) -> &TreeArena {
        &self.arena
    }

    pub fn node(&self, index: Index) -> Option<NodeRef<'_>> {
        NodeRef::new(&self.arena, index)
    }

    pub fn into_parts(self) -> (TreeArena, Index) {
        (self.arena, self.item)
    }
}
