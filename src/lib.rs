//! taxonomy-tree: linked taxonomy trees from publishing service responses
//!
//! A content item's record and its expanded links are parsed into an
//! arena-backed tree ([`domain::LinkedTree`]) that can be queried for
//! descendants, ancestors, breadcrumb trails and tagged taxons.
//!
//! # Architecture
//! - `domain`: tree arena, node cursor, payload builder (pure, no I/O)
//! - `application`: services that fetch and build
//! - `infrastructure`: publishing service boundary trait
//! - `config`: parser settings
//!
//! ```ignore
//! use serde_json::json;
//! use taxonomy_tree::domain::{TaxonAggregation, TreeBuilder};
//!
//! let content = json!({ "content_id": "c1", "title": "Taxon", "base_path": "/taxon" });
//! let links = json!({ "expanded_links": { "child_taxons": [] } });
//! let tree = TreeBuilder::new().build(&content, &links)?;
//! let trail = tree.item().taxons_with_ancestors(TaxonAggregation::All);
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod util;

pub use application::{ApplicationError, ApplicationResult};
pub use config::Settings;
pub use domain::{LinkedTree, NodeData, NodeRef, TaxonAggregation, TreeBuilder};
