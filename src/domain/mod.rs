//! Domain layer: thread model and selection algorithm
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod entities;
pub mod error;
pub mod scorer;
pub mod selector;
pub mod verify;

pub use arena::{NodeData, ThreadArena, ThreadNode};
pub use entities::*;
pub use error::{DomainError, DomainResult};
pub use scorer::{EvalResult, Regime, Scorer};
pub use selector::{select, select_optimal_comments};
pub use verify::verify_selection;
