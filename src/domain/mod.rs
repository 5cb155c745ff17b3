//! Domain layer: tree model and payload parsing
//!
//! This layer is independent of external concerns (no I/O, no config loading).

pub mod arena;
pub mod builder;
pub mod cursor;
pub mod error;
pub mod fields;

pub use arena::{NodeData, TaxonAggregation, TreeArena, TreeNode};
pub use builder::{TreeBuilder, TreeResult, DEFAULT_MAX_DEPTH};
pub use cursor::{LinkedTree, NodeRef};
pub use error::{DomainError, DomainResult};
