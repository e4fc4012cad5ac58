//! Server counter module
//!
//! Provides the counter snapshot type and its collection from a live
//! database connection.

mod collector;
mod snapshot;

#[cfg(test)]
mod tests;

pub use collector::*;
pub use snapshot::*;
