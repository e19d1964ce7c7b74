//! Selection service
//!
//! Loads a thread and runs the optimal-subset selection over it.

use std::path::Path;

use serde::Serialize;
use tracing::{info, instrument};

use crate::application::services::{LoadedThread, ThreadLoader};
use crate::application::ApplicationResult;
use crate::domain::{select, verify_selection, CommentId, Selection};

/// Summary of one selection run over a thread file.
#[derive(Debug, Clone, Serialize)]
pub struct SelectionReport {
    pub depth_limit: usize,
    /// Nodes in the input thread
    pub total_comments: usize,
    pub selected: Vec<CommentId>,
    pub score: f64,
}

impl SelectionReport {
    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }
}

/// Service running selections over loaded threads.
pub struct SelectionService {
    loader: ThreadLoader,
}

impl SelectionService {
    pub fn new(loader: ThreadLoader) -> Self {
        Self { loader }
    }

    pub fn loader(&self) -> &ThreadLoader {
        &self.loader
    }

    /// Load `path` and select its best subset at `depth_limit`.
    #[instrument(level = "debug", skip(self))]
    pub fn select_file(&self, path: &Path, depth_limit: usize) -> ApplicationResult<SelectionReport> {
        let thread = self.loader.load(path)?;
        self.select_loaded(&thread, depth_limit)
    }

    /// Select over an already loaded thread.
    ///
    /// The result is re-checked against the thread structure before it is
    /// reported.
    pub fn select_loaded(&self, thread: &LoadedThread, depth_limit: usize) -> ApplicationResult<SelectionReport> {
        let Selection { ids, score } = select(&thread.root, depth_limit);
        verify_selection(&thread.arena, &ids, depth_limit)?;
        info!(
            "selected {} of {} comments (score {})",
            ids.len(),
            thread.arena.len(),
            score
        );

        Ok(SelectionReport {
            depth_limit,
            total_comments: thread.arena.len(),
            selected: ids,
            score,
        })
    }

    /// Check a caller-supplied id sequence against the thread in `path`.
    pub fn check_file(&self, path: &Path, ids: &[CommentId], depth_limit: usize) -> ApplicationResult<()> {
        let thread = self.loader.load(path)?;
        verify_selection(&thread.arena, ids, depth_limit)?;
        Ok(())
    }
}
