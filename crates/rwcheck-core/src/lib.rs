//! rwcheck core - shared abstractions for the MySQL read/write rate check
//!
//! This crate provides the types every other rwcheck crate depends on:
//!
//! - `Connection` - trait for a database connection able to run one query
//! - `ConnectionConfig` - where and how to connect, including the connect timeout
//! - `Value`, `Row`, `QueryResult` - the row model returned by a driver
//! - `Error` / `Result` - the error taxonomy shared by drivers and the monitor

mod config;
mod connection;
mod error;
mod types;


pub use config::*;
pub use connection::*;
pub use error::*;
pub use types::*;
