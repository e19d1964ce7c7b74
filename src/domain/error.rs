//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::CommentId;

/// Domain errors represent malformed threads or selections that break
/// the thread's structural rules.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("duplicate comment id: {0}")]
    DuplicateId(CommentId),

    #[error("comment {id} not found in thread")]
    UnknownId { id: CommentId },

    #[error("comment {id} is at depth {depth}, beyond limit {limit}")]
    DepthExceeded {
        id: CommentId,
        depth: usize,
        limit: usize,
    },

    #[error("comment {id} selected without its parent {parent}")]
    MissingAncestor { id: CommentId, parent: CommentId },

    #[error("comment {id} is out of document order")]
    OrderViolation { id: CommentId },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
