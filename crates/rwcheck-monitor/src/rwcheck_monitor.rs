//! rwcheck Monitor - read/write rate checking for database servers
//!
//! This crate provides the pieces of a single check run:
//! - Counter snapshots and their collection from server status
//! - Persistence of the previous run's snapshot, with restart detection
//! - Rate computation, threshold classification and plugin output

pub mod classify;
pub mod counters;
pub mod store;

pub use classify::*;
pub use counters::*;
pub use store::*;
