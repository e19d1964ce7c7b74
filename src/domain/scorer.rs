//! Depth-bounded tree DP over a comment thread.
//!
//! Every node is evaluated under two hypotheses: the node is displayed
//! (included) or it is not (excluded). A hidden node hides its whole subtree,
//! so the excluded regime only ever accumulates the children's excluded
//! regimes. A displayed node lets each child pick its own better regime.

use std::collections::HashMap;

use tracing::{instrument, trace};

use crate::domain::{CommentId, CommentNode};

/// Best score and id set reachable under one hypothesis.
#[derive(Debug, Clone, PartialEq)]
pub struct Regime {
    pub score: f64,
    pub ids: Vec<CommentId>,
}

impl Regime {
    fn empty() -> Self {
        Self {
            score: 0.0,
            ids: Vec::new(),
        }
    }

    /// Marks a subtree that cannot be displayed at all.
    fn unreachable() -> Self {
        Self {
            score: f64::NEG_INFINITY,
            ids: Vec::new(),
        }
    }

    fn absorb(&mut self, other: &Regime) {
        self.score += other.score;
        self.ids.extend_from_slice(&other.ids);
    }
}

/// Evaluation of one subtree, rooted at the node it was computed for.
#[derive(Debug, Clone, PartialEq)]
pub struct EvalResult {
    pub included: Regime,
    pub excluded: Regime,
}

impl EvalResult {
    /// Child contribution to a displayed parent.
    ///
    /// Ties go to the excluded regime.
    pub fn best_for_parent(&self) -> &Regime {
        if self.included.score > self.excluded.score {
            &self.included
        } else {
            &self.excluded
        }
    }

    /// Regime chosen at the thread root.
    ///
    /// Ties go to the included regime.
    pub fn best_at_root(&self) -> &Regime {
        if self.included.score >= self.excluded.score {
            &self.included
        } else {
            &self.excluded
        }
    }
}

/// Memoizing evaluator, scoped to a single selection run.
#[derive(Debug)]
pub struct Scorer {
    depth_limit: usize,
    memo: HashMap<(CommentId, usize), EvalResult>,
}

impl Scorer {
    pub fn new(depth_limit: usize) -> Self {
        Self {
            depth_limit,
            memo: HashMap::new(),
        }
    }

    pub fn depth_limit(&self) -> usize {
        self.depth_limit
    }

    /// Number of (node, depth) pairs evaluated so far.
    pub fn memo_len(&self) -> usize {
        self.memo.len()
    }

    #[instrument(level = "trace", skip(self, node), fields(id = node.id))]
    pub fn evaluate(&mut self, node: &CommentNode, depth: usize) -> EvalResult {
        let key = (node.id, depth);
        if let Some(cached) = self.memo.get(&key) {
            return cached.clone();
        }

        if depth > self.depth_limit {
            return EvalResult {
                included: Regime::unreachable(),
                excluded: Regime::empty(),
            };
        }

        let mut included = Regime {
            score: node.score,
            ids: vec![node.id],
        };
        let mut excluded = Regime::empty();

        for child in &node.children {
            let child_result = self.evaluate(child, depth + 1);
            included.absorb(child_result.best_for_parent());
            excluded.absorb(&child_result.excluded);
        }

        trace!(
            included = included.score,
            excluded = excluded.score,
            "evaluated"
        );
        let result = EvalResult { included, excluded };
        self.memo.insert(key, result.clone());
        result
    }
}
