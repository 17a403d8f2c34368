//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the tree's structural rules.
/// All of them are recoverable; callers turn them into an `Outcome`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("node not found: {0}")]
    NodeNotFound(String),

    #[error("parent node not found: {0}")]
    ParentNotFound(String),

    #[error("node '{parent}' already has the maximum of {max} children")]
    CapacityExceeded { parent: String, max: usize },

    #[error("value already exists in tree: {0}")]
    DuplicateValue(String),

    #[error("cannot delete root '{0}' while promoting its children")]
    RootDeletionUnsupported(String),

    #[error("node value must not be empty")]
    EmptyValue,

    #[error("tree is empty")]
    EmptyTree,

    #[error("corrupt tree data: {0}")]
    CorruptData(String),
}

/// Result type for tree operations.
pub type DomainResult<T> = Result<T, DomainError>;
