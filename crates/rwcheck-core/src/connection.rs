//! Connection and driver traits

use crate::{ConnectionConfig, QueryResult, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// A database connection
///
/// The check only ever runs a single read-only query per invocation, so the
/// surface is limited to querying and closing.
#[async_trait]
pub trait Connection: Send + Sync {
    /// Get the driver name (e.g., "mysql")
    fn driver_name(&self) -> &str;

    /// Execute a query that returns rows
    async fn query(&self, sql: &str) -> Result<QueryResult>;

    /// Close the connection
    async fn close(&self) -> Result<()>;
}

/// A database driver able to open a [`Connection`]
#[async_trait]
pub trait DatabaseDriver: Send + Sync {
    /// Open a connection, honouring `config.connect_timeout`
    async fn connect(&self, config: &ConnectionConfig) -> Result<Arc<dyn Connection>>;
}
