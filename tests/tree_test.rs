//! Tests for TreeArena and NodeRef queries on hand-built trees

use generational_arena::Index;
use rstest::{fixture, rstest};

use taxonomy_tree::domain::{
    DomainError, LinkedTree, NodeData, NodeRef, TaxonAggregation, TreeArena,
};
use taxonomy_tree::util::testing;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

fn node(arena: &mut TreeArena, title: &str) -> Index {
    arena.insert_node(NodeData::new(
        title,
        format!("{title}-id"),
        format!("/{title}"),
        None,
    ))
}

fn names(nodes: &[NodeRef<'_>]) -> Vec<String> {
    nodes
        .iter()
        .map(|n| n.name().unwrap_or_default().to_string())
        .collect()
}

struct Taxonomy {
    arena: TreeArena,
    root: Index,
    child_1: Index,
    child_2: Index,
    grandchild: Index,
}

// root-id
// ├── child-1-id
// │   └── grandchild-id
// └── child-2-id
#[fixture]
fn taxonomy() -> Taxonomy {
    let mut arena = TreeArena::new();
    let root = node(&mut arena, "root-id");
    let child_1 = node(&mut arena, "child-1-id");
    let child_2 = node(&mut arena, "child-2-id");
    let grandchild = node(&mut arena, "grandchild-id");
    arena.attach(root, child_1).unwrap();
    arena.attach(child_1, grandchild).unwrap();
    arena.attach(root, child_2).unwrap();
    Taxonomy {
        arena,
        root,
        child_1,
        child_2,
        grandchild,
    }
}

// ============================================================
// Attach
// ============================================================

#[rstest]
fn given_two_nodes_when_attaching_then_links_both_directions() {
    let mut arena = TreeArena::new();
    let parent = node(&mut arena, "parent");
    let existing = node(&mut arena, "existing");
    let child = node(&mut arena, "child");
    arena.attach(parent, existing).unwrap();

    arena.attach(parent, child).unwrap();

    let parent_ref = NodeRef::new(&arena, parent).unwrap();
    let child_ref = NodeRef::new(&arena, child).unwrap();
    assert_eq!(child_ref.parent(), Some(parent_ref));
    assert_eq!(names(&parent_ref.children()), ["existing", "child"]);
    assert!(parent_ref.pre_order().contains(&child_ref));
}

// ============================================================
// Traversal
// ============================================================

#[rstest]
fn given_tree_when_pre_order_then_visits_depth_first_left_to_right(taxonomy: Taxonomy) {
    let root = NodeRef::new(&taxonomy.arena, taxonomy.root).unwrap();

    assert_eq!(
        names(&root.pre_order()),
        ["root-id", "child-1-id", "grandchild-id", "child-2-id"]
    );
    assert_eq!(root.pre_order().first(), Some(&root));

    let child_1 = NodeRef::new(&taxonomy.arena, taxonomy.child_1).unwrap();
    assert_eq!(names(&child_1.pre_order()), ["child-1-id", "grandchild-id"]);
}

#[rstest]
fn given_tree_when_descendants_then_excludes_self(taxonomy: Taxonomy) {
    let root = NodeRef::new(&taxonomy.arena, taxonomy.root).unwrap();
    assert_eq!(
        names(&root.descendants()),
        ["child-1-id", "grandchild-id", "child-2-id"]
    );
}

#[rstest]
fn given_tree_when_counting_then_matches_pre_order_and_children(taxonomy: Taxonomy) {
    for (idx, _) in taxonomy.arena.iter_pre_order(taxonomy.root) {
        let n = NodeRef::new(&taxonomy.arena, idx).unwrap();
        assert_eq!(n.count(), n.pre_order().len());
        assert_eq!(
            n.count(),
            1 + n.children().iter().map(|c| c.count()).sum::<usize>()
        );
    }
}

// ============================================================
// Depth, ancestors, breadcrumbs
// ============================================================

#[rstest]
fn given_tree_when_depth_then_counts_edges_to_root(taxonomy: Taxonomy) {
    let arena = &taxonomy.arena;
    assert_eq!(arena.depth(taxonomy.root), 0);
    assert_eq!(arena.depth(taxonomy.child_1), 1);
    assert_eq!(arena.depth(taxonomy.child_2), 1);
    assert_eq!(arena.depth(taxonomy.grandchild), 2);

    for (idx, _) in arena.iter_pre_order(taxonomy.root) {
        let n = NodeRef::new(arena, idx).unwrap();
        assert_eq!(n.depth(), n.ancestors().len());
    }
}

#[rstest]
fn given_tree_when_root_check_then_only_root_is_root(taxonomy: Taxonomy) {
    let root = NodeRef::new(&taxonomy.arena, taxonomy.root).unwrap();
    let child = NodeRef::new(&taxonomy.arena, taxonomy.child_1).unwrap();
    assert!(root.is_root());
    assert!(!child.is_root());
}

#[rstest]
fn given_grandchild_when_ancestors_then_root_first_without_self(taxonomy: Taxonomy) {
    let grandchild = NodeRef::new(&taxonomy.arena, taxonomy.grandchild).unwrap();
    assert_eq!(names(&grandchild.ancestors()), ["root-id", "child-1-id"]);

    // every ancestor has the node among its descendants
    for ancestor in grandchild.ancestors() {
        assert!(ancestor.descendants().contains(&grandchild));
    }
}

#[rstest]
fn given_root_when_ancestors_then_empty(taxonomy: Taxonomy) {
    let root = NodeRef::new(&taxonomy.arena, taxonomy.root).unwrap();
    assert!(root.ancestors().is_empty());
    assert_eq!(root.breadcrumb_trail(), vec![root]);
}

#[rstest]
fn given_any_node_when_breadcrumb_trail_then_ancestors_plus_self(taxonomy: Taxonomy) {
    for (idx, _) in taxonomy.arena.iter_pre_order(taxonomy.root) {
        let n = NodeRef::new(&taxonomy.arena, idx).unwrap();
        let mut expected = n.ancestors();
        expected.push(n);
        assert_eq!(n.breadcrumb_trail(), expected);
    }
    let grandchild = NodeRef::new(&taxonomy.arena, taxonomy.grandchild).unwrap();
    assert_eq!(
        names(&grandchild.breadcrumb_trail()),
        ["root-id", "child-1-id", "grandchild-id"]
    );
}

// ============================================================
// Linked taxons
// ============================================================

#[rstest]
fn given_content_item_when_adding_taxon_then_only_direct_taxons_listed(taxonomy: Taxonomy) {
    let mut arena = taxonomy.arena;
    let content = node(&mut arena, "content");
    arena.add_taxon(content, taxonomy.child_2).unwrap();

    let content_ref = NodeRef::new(&arena, content).unwrap();
    assert_eq!(names(&content_ref.linked_taxons()), ["child-2-id"]);
    // taxons are not children
    assert!(content_ref.children().is_empty());
    assert!(content_ref.is_root());
}

#[rstest]
fn given_tagged_taxons_when_aggregating_all_then_repeats_shared_ancestors(taxonomy: Taxonomy) {
    let mut arena = taxonomy.arena;
    let content = node(&mut arena, "content");
    arena.add_taxon(content, taxonomy.child_2).unwrap();
    arena.add_taxon(content, taxonomy.grandchild).unwrap();

    let content_ref = NodeRef::new(&arena, content).unwrap();
    assert_eq!(
        names(&content_ref.taxons_with_ancestors(TaxonAggregation::All)),
        ["root-id", "child-2-id", "root-id", "child-1-id", "grandchild-id"]
    );
}

#[rstest]
fn given_tagged_taxons_when_aggregating_unique_then_first_occurrence_kept(taxonomy: Taxonomy) {
    let mut arena = taxonomy.arena;
    let content = node(&mut arena, "content");
    arena.add_taxon(content, taxonomy.child_2).unwrap();
    arena.add_taxon(content, taxonomy.grandchild).unwrap();
    arena.add_taxon(content, taxonomy.child_2).unwrap();

    let content_ref = NodeRef::new(&arena, content).unwrap();
    assert_eq!(content_ref.linked_taxons().len(), 3);
    assert_eq!(
        names(&content_ref.taxons_with_ancestors(TaxonAggregation::Unique)),
        ["root-id", "child-2-id", "child-1-id", "grandchild-id"]
    );
}

#[rstest]
fn given_no_taxons_when_aggregating_then_empty(taxonomy: Taxonomy) {
    let root = NodeRef::new(&taxonomy.arena, taxonomy.root).unwrap();
    assert!(root.taxons_with_ancestors(TaxonAggregation::All).is_empty());
    assert!(root.taxons_with_ancestors(TaxonAggregation::Unique).is_empty());
}

// ============================================================
// Subtree shape
// ============================================================

#[rstest]
fn given_tree_when_leaves_and_height_then_reflect_shape(taxonomy: Taxonomy) {
    let root = NodeRef::new(&taxonomy.arena, taxonomy.root).unwrap();
    assert_eq!(names(&root.leaf_nodes()), ["grandchild-id", "child-2-id"]);
    assert_eq!(root.height(), 3);

    let grandchild = NodeRef::new(&taxonomy.arena, taxonomy.grandchild).unwrap();
    assert_eq!(grandchild.height(), 1);
    assert_eq!(grandchild.root(), root);
}

// ============================================================
// LinkedTree
// ============================================================

#[rstest]
fn given_node_of_arena_when_anchoring_linked_tree_then_item_addresses_it(taxonomy: Taxonomy) {
    let tree = LinkedTree::new(taxonomy.arena, taxonomy.grandchild).unwrap();

    let item = tree.item();
    assert_eq!(item.index(), taxonomy.grandchild);
    assert_eq!(item.name(), Some("grandchild-id"));
    assert_eq!(item.to_string(), "grandchild-id (/grandchild-id)");
    assert_eq!(names(&item.ancestors()), ["root-id", "child-1-id"]);
}

#[rstest]
fn given_index_outside_arena_when_anchoring_linked_tree_then_node_not_found() {
    let stale = Index::from_raw_parts(42, 0);

    let result = LinkedTree::new(TreeArena::new(), stale);

    assert!(matches!(result, Err(DomainError::NodeNotFound(idx)) if idx == stale));
    assert!(NodeRef::new(&TreeArena::new(), stale).is_none());
}
