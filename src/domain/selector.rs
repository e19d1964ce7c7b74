//! Selection entry points: pick the winning regime, then restore document order.

use std::collections::HashSet;

use tracing::{debug, instrument};

use crate::domain::scorer::Scorer;
use crate::domain::{CommentId, CommentNode, Selection};

/// Select the best-scoring, depth-bounded, parent-consistent subset of `thread`.
///
/// Ids come back in pre-order. A thread with nothing worth showing yields an
/// empty vector.
pub fn select_optimal_comments(thread: &CommentNode, depth_limit: usize) -> Vec<CommentId> {
    select(thread, depth_limit).ids
}

/// Like [`select_optimal_comments`], also reporting the winning score.
#[instrument(level = "debug", skip(thread), fields(root = thread.id))]
pub fn select(thread: &CommentNode, depth_limit: usize) -> Selection {
    let mut scorer = Scorer::new(depth_limit);
    let root = scorer.evaluate(thread, 0);
    let chosen = root.best_at_root();
    debug!(
        included = root.included.score,
        excluded = root.excluded.score,
        evaluated = scorer.memo_len(),
        "root evaluated"
    );

    let selected: HashSet<CommentId> = chosen.ids.iter().copied().collect();
    let mut ids = Vec::with_capacity(selected.len());
    collect_ordered_ids(thread, &selected, &mut ids);

    Selection {
        ids,
        score: chosen.score,
    }
}

fn collect_ordered_ids(node: &CommentNode, selected: &HashSet<CommentId>, out: &mut Vec<CommentId>) {
    if selected.contains(&node.id) {
        out.push(node.id);
    }
    for child in &node.children {
        collect_ordered_ids(child, selected, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_single_negative_root_when_selecting_then_returns_empty() {
        let selection = select(&CommentNode::new(1, -1.0), 5);

        assert!(selection.is_empty());
        assert_eq!(selection.score, 0.0);
    }

    #[test]
    fn given_zero_score_root_when_selecting_then_root_is_kept() {
        assert_eq!(select_optimal_comments(&CommentNode::new(1, 0.0), 0), vec![1]);
    }
}
