//! Snapshot persistence module
//!
//! Keeps the previous run's counters so the next run has a baseline to
//! diff against.

mod backend;
mod snapshot_store;


pub use backend::*;
pub use snapshot_store::*;
