//! Structural checks for a proposed selection.

use std::collections::HashSet;

use tracing::instrument;

use crate::domain::arena::ThreadArena;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::CommentId;

/// Check that `ids` is a valid display sequence for `thread`.
///
/// Every id must exist, sit at depth `<= depth_limit`, have its parent
/// selected, and appear in pre-order. The first violation found is returned.
#[instrument(level = "debug", skip(thread, ids), fields(selected = ids.len()))]
pub fn verify_selection(thread: &ThreadArena, ids: &[CommentId], depth_limit: usize) -> DomainResult<()> {
    let positions = thread.preorder_positions();
    let selected: HashSet<CommentId> = ids.iter().copied().collect();
    let mut last_position: Option<usize> = None;

    for &id in ids {
        let position = *positions.get(&id).ok_or(DomainError::UnknownId { id })?;

        if let Some(depth) = thread.depth_of(id) {
            if depth > depth_limit {
                return Err(DomainError::DepthExceeded {
                    id,
                    depth,
                    limit: depth_limit,
                });
            }
        }

        if let Some(parent) = thread.parent_id(id) {
            if !selected.contains(&parent) {
                return Err(DomainError::MissingAncestor { id, parent });
            }
        }

        // Strictly increasing positions also rules out repeated ids
        if last_position.is_some_and(|last| position <= last) {
            return Err(DomainError::OrderViolation { id });
        }
        last_position = Some(position);
    }

    Ok(())
}
