//! Optimal comment selection for discussion threads.
//!
//! Given a rooted comment tree and a depth limit, [`select_optimal_comments`]
//! returns the ids of the best-scoring subset in which every selected comment's
//! parent is also selected, no comment is deeper than the limit, and ids keep
//! their document order.
//!
//! ```
//! use threadtrim::{select_optimal_comments, CommentNode};
//!
//! let thread = CommentNode::new(1, 10.0).with_children(vec![
//!     CommentNode::new(2, -4.0),
//!     CommentNode::new(3, 6.0),
//! ]);
//! assert_eq!(select_optimal_comments(&thread, 1), vec![1, 3]);
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use domain::{select, select_optimal_comments, CommentId, CommentNode, Selection};
