//! Thread loading service
//!
//! Reads a JSON comment thread and checks it is fit for selection.

use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{CommentNode, ThreadArena};
use crate::infrastructure::traits::FileSystem;

/// A parsed thread together with its flattened view.
#[derive(Debug)]
pub struct LoadedThread {
    pub root: CommentNode,
    pub arena: ThreadArena,
}

/// Service for turning serialized threads into `CommentNode` trees.
pub struct ThreadLoader {
    fs: Arc<dyn FileSystem>,
}

impl ThreadLoader {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Load a thread from a JSON file.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path) -> ApplicationResult<LoadedThread> {
        if !self.fs.is_file(path) {
            return Err(ApplicationError::OperationFailed {
                context: format!("thread file not found: {}", path.display()),
                source: Box::new(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "file does not exist",
                )),
            });
        }
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read thread", path)?;
        self.parse(&content, path)
    }

    /// Parse JSON thread content; `origin` is only used in error messages.
    ///
    /// Missing `score` counts as 0 and missing `children` as none. Duplicate
    /// ids are rejected. Nesting depth is unbounded; deep threads grow the
    /// stack on the heap instead of hitting serde_json's recursion limit.
    pub fn parse(&self, content: &str, origin: &Path) -> ApplicationResult<LoadedThread> {
        let mut json = serde_json::Deserializer::from_str(content);
        json.disable_recursion_limit();
        let parsed = CommentNode::deserialize(serde_stacker::Deserializer::new(&mut json));
        let root = parsed
            .and_then(|root| json.end().map(|()| root))
            .map_err(|e| ApplicationError::Parse {
                path: origin.to_path_buf(),
                message: e.to_string(),
            })?;
        let arena = ThreadArena::from_thread(&root)?;
        debug!(
            "parsed thread: root={} nodes={} height={}",
            root.id,
            arena.len(),
            arena.height()
        );
        Ok(LoadedThread { root, arena })
    }
}
