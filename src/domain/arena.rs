//! Flattened, index-addressed view of a comment thread.

use std::collections::HashMap;
use std::fmt;

use generational_arena::{Arena, Index};
use termtree::Tree;
use tracing::instrument;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::{CommentId, CommentNode};

/// Data payload for arena nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeData {
    pub id: CommentId,
    pub score: f64,
    /// Edge count from the thread root
    pub depth: usize,
}

impl fmt::Display for NodeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} ({:+})", self.id, self.score)
    }
}

/// Node in the arena-based thread structure.
#[derive(Debug)]
pub struct ThreadNode {
    pub data: NodeData,
    /// Index of parent node in the arena, None for the root
    pub parent: Option<Index>,
    /// Indices of child nodes in document order
    pub children: Vec<Index>,
}

/// Arena-based thread with O(1) lookup by comment id.
#[derive(Debug)]
pub struct ThreadArena {
    arena: Arena<ThreadNode>,
    root: Option<Index>,
    by_id: HashMap<CommentId, Index>,
}

impl Default for ThreadArena {
    fn default() -> Self {
        Self::new()
    }
}

impl ThreadArena {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
            by_id: HashMap::new(),
        }
    }

    /// Flatten `thread`, rejecting duplicate ids.
    #[instrument(level = "debug", skip(thread), fields(root = thread.id))]
    pub fn from_thread(thread: &CommentNode) -> DomainResult<Self> {
        let mut tree = Self::new();
        let mut stack = vec![(thread, None, 0usize)];

        while let Some((node, parent_idx, depth)) = stack.pop() {
            let data = NodeData {
                id: node.id,
                score: node.score,
                depth,
            };
            let idx = tree.insert_node(data, parent_idx)?;
            // Reverse so children are inserted, and thus linked, in document order
            for child in node.children.iter().rev() {
                stack.push((child, Some(idx), depth + 1));
            }
        }

        Ok(tree)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn insert_node(&mut self, data: NodeData, parent: Option<Index>) -> DomainResult<Index> {
        if self.by_id.contains_key(&data.id) {
            return Err(DomainError::DuplicateId(data.id));
        }
        let id = data.id;
        let node_idx = self.arena.insert(ThreadNode {
            data,
            parent,
            children: Vec::new(),
        });
        self.by_id.insert(id, node_idx);

        if let Some(parent_idx) = parent {
            if let Some(parent) = self.arena.get_mut(parent_idx) {
                parent.children.push(node_idx);
            }
        } else {
            self.root = Some(node_idx);
        }

        Ok(node_idx)
    }

    pub fn get_node(&self, idx: Index) -> Option<&ThreadNode> {
        self.arena.get(idx)
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Look up a node by comment id.
    pub fn find(&self, id: CommentId) -> Option<&ThreadNode> {
        self.by_id.get(&id).and_then(|&idx| self.arena.get(idx))
    }

    pub fn depth_of(&self, id: CommentId) -> Option<usize> {
        self.find(id).map(|node| node.data.depth)
    }

    /// Parent comment id; None for the root or unknown ids.
    pub fn parent_id(&self, id: CommentId) -> Option<CommentId> {
        self.find(id)
            .and_then(|node| node.parent)
            .and_then(|idx| self.arena.get(idx))
            .map(|parent| parent.data.id)
    }

    /// Position of every id in a pre-order walk.
    pub fn preorder_positions(&self) -> HashMap<CommentId, usize> {
        self.iter()
            .enumerate()
            .map(|(pos, (_, node))| (node.data.id, pos))
            .collect()
    }

    /// Greatest node depth; 0 for a lone root or an empty arena.
    #[instrument(level = "debug", skip(self))]
    pub fn height(&self) -> usize {
        self.iter().map(|(_, node)| node.data.depth).max().unwrap_or(0)
    }

    /// Pre-order iterator (node, then children left to right).
    pub fn iter(&self) -> PreOrderIterator<'_> {
        PreOrderIterator::new(self)
    }

    /// Render as a `termtree`, labelling each node with `label`.
    pub fn to_tree<F>(&self, label: F) -> Tree<String>
    where
        F: Fn(&NodeData) -> String,
    {
        fn build<F: Fn(&NodeData) -> String>(arena: &ThreadArena, idx: Index, label: &F) -> Tree<String> {
            match arena.get_node(idx) {
                Some(node) => {
                    let leaves = node
                        .children
                        .iter()
                        .map(|&child| build(arena, child, label))
                        .collect::<Vec<_>>();
                    Tree::new(label(&node.data)).with_leaves(leaves)
                }
                None => Tree::new(String::new()),
            }
        }

        match self.root {
            Some(root_idx) => build(self, root_idx, &label),
            None => Tree::new("Empty thread".to_string()),
        }
    }
}

pub struct PreOrderIterator<'a> {
    arena: &'a ThreadArena,
    stack: Vec<Index>,
}

impl<'a> PreOrderIterator<'a> {
    fn new(arena: &'a ThreadArena) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = arena.root() {
            stack.push(root);
        }
        Self { arena, stack }
    }
}

impl<'a> Iterator for PreOrderIterator<'a> {
    type Item = (Index, &'a ThreadNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}
