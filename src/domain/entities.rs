//! Domain entities: core data structures

use serde::{Deserialize, Serialize};

/// Stable identity of a comment within one thread.
pub type CommentId = i64;

/// A comment and its replies.
///
/// `children` keeps document order; selection output relies on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentNode {
    pub id: CommentId,
    /// Engagement weight, e.g. likes minus dislikes (may be negative)
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub children: Vec<CommentNode>,
}

impl CommentNode {
    pub fn new(id: CommentId, score: f64) -> Self {
        Self {
            id,
            score,
            children: Vec::new(),
        }
    }

    /// Builder-style helper for assembling threads in code.
    pub fn with_children(mut self, children: Vec<CommentNode>) -> Self {
        self.children = children;
        self
    }

    /// Number of nodes in this subtree, including self.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(CommentNode::node_count).sum::<usize>()
    }

    /// Ids of this subtree in pre-order (node, then each child in order).
    pub fn preorder_ids(&self) -> Vec<CommentId> {
        let mut ids = Vec::with_capacity(self.node_count());
        self.collect_preorder(&mut ids);
        ids
    }

    fn collect_preorder(&self, ids: &mut Vec<CommentId>) {
        ids.push(self.id);
        for child in &self.children {
            child.collect_preorder(ids);
        }
    }
}

/// Ordered outcome of a selection run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    /// Selected ids in document (pre-order) order
    pub ids: Vec<CommentId>,
    /// Score of the winning regime at the root
    pub score: f64,
}

impl Selection {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Expand `~` and `$VAR` in a path-like string, leaving it untouched on failure.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}
