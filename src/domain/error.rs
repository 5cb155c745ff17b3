//! Domain-level errors (no external dependencies)

use generational_arena::Index;
use thiserror::Error;

/// Domain errors represent malformed payloads and tree invariant violations.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("missing required field `{field}` in record {record}")]
    MissingField { field: String, record: String },

    #[error("field `{field}` in record {record} is not {expected}")]
    InvalidFieldType {
        field: String,
        record: String,
        expected: &'static str,
    },

    #[error("cyclic payload: content item {0} is its own ancestor or descendant")]
    CyclicPayload(String),

    #[error("payload nesting exceeds {limit} levels at content item {content_id}")]
    NestingTooDeep { content_id: String, limit: usize },

    #[error("node not found in arena: {0:?}")]
    NodeNotFound(Index),

    #[error("node already has a parent: {0:?}")]
    AlreadyAttached(Index),

    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    WouldCycle { parent: Index, child: Index },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
