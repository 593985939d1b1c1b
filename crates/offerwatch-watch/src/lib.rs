//! Scan cycle orchestration.
//!
//! One cycle walks every configured search query in order: fetch the search
//! page, settle, extract candidates, normalize and filter, register survivors
//! against the dedup store, and notify for each genuinely new offer. Query
//! failures are isolated — a timed-out page skips that query for this cycle
//! and the walk continues. The repeat-forever loop lives with the caller
//! (the server's scheduler or the CLI); this crate owns exactly one pass.

pub mod error;
pub mod pipeline;
pub mod types;

pub use error::WatchError;
pub use pipeline::run_cycle;
pub use types::{CycleReport, WatchContext};
