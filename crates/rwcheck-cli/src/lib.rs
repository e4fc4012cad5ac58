//! rwcheck CLI - the `check_mysql_rw` monitoring plugin
//!
//! Wires flag parsing, logging and the check run together. The binary in
//! `main.rs` only maps the outcome to stdout and an exit code.

pub mod check;
pub mod config;
pub mod logging;

pub use check::run_check;
pub use config::{Args, CheckConfig};
