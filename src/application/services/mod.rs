//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem) but are themselves
//! concrete structs, not traits.

mod loader;
mod selection;

pub use loader::{LoadedThread, ThreadLoader};
pub use selection::{SelectionReport, SelectionService};
pub use self_test::{run_self_test, SelfTestOutcome};
