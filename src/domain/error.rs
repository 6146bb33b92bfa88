//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors report layout lists that break the section invariants.
///
/// The move engine never raises these; they come from [`validate_items`].
///
/// [`validate_items`]: crate::domain::validate_items
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("duplicate item id: {0}")]
    DuplicateId(String),

    #[error("item {item} references unknown section: {section}")]
    UnknownSection { item: String, section: String },

    #[error("section {section} is nested inside: {parent}")]
    NestedSection { section: String, parent: String },

    #[error("section {section} has stale childIds: expected {expected:?}, found {found:?}")]
    ChildIdsMismatch {
        section: String,
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("item {item} has order {found}, expected {expected}")]
    OrderMismatch {
        item: String,
        expected: usize,
        found: usize,
    },
}
