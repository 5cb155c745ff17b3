//! Field keys and lookups for publishing service records.

use serde_json::Value;

use crate::domain::error::{DomainError, DomainResult};

pub const CONTENT_ID: &str = "content_id";
pub const BASE_PATH: &str = "base_path";
pub const DEFAULT_NAME_FIELD: &str = "title";
pub const DETAILS: &str = "details";
pub const INTERNAL_NAME: &str = "internal_name";

/// Links of a nested entry
pub const LINKS: &str = "links";
/// Links of a top-level expanded-links response or merged message
pub const EXPANDED_LINKS: &str = "expanded_links";

pub const CHILD_TAXONS: &str = "child_taxons";
pub const PARENT_TAXONS: &str = "parent_taxons";
pub const TAXONS: &str = "taxons";

/// Short label for error messages: the record's content id when it has one.
pub fn describe(record: &Value) -> String {
    match record.get(CONTENT_ID).and_then(Value::as_str) {
        Some(id) => id.to_string(),
        None => "<without content_id>".to_string(),
    }
}

/// A string field whose key must be present. A `null` value passes through
/// as `None`.
pub fn required_str(record: &Value, field: &str) -> DomainResult<Option<String>> {
    match record.get(field) {
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Null) => Ok(None),
        Some(_) => Err(DomainError::InvalidFieldType {
            field: field.to_string(),
            record: describe(record),
            expected: "a string or null",
        }),
        None => Err(DomainError::MissingField {
            field: field.to_string(),
            record: describe(record),
        }),
    }
}

/// `details.internal_name`, or None when any part of the path is missing.
pub fn internal_name(record: &Value) -> Option<String> {
    record
        .get(DETAILS)
        .and_then(|details| details.get(INTERNAL_NAME))
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Entries of one link category inside `links`.
///
/// A missing or `null` links object or category is an empty list.
pub fn link_entries<'a>(
    record: &Value,
    links: Option<&'a Value>,
    category: &str,
) -> DomainResult<&'a [Value]> {
    match links.and_then(|links| links.get(category)) {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::Array(entries)) => Ok(entries.as_slice()),
        Some(_) => Err(DomainError::InvalidFieldType {
            field: category.to_string(),
            record: describe(record),
            expected: "an array",
        }),
    }
}
