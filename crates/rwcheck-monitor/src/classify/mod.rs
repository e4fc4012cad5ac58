//! Rate classification module
//!
//! Turns two counter snapshots into per-second rates, grades them against
//! thresholds and renders the plugin status line.

mod classifier;
mod report;
mod severity;


pub use classifier::*;
pub use report::*;
pub use severity::*;
