//! MySQL driver implementation

use async_trait::async_trait;
use rwcheck_core::{Connection, ConnectionConfig, DatabaseDriver, Result};
use std::sync::Arc;

use crate::MySqlConnection;

/// MySQL database driver
pub struct MySqlDriver;

impl MySqlDriver {
    /// Create a new MySQL driver instance
    pub fn new() -> Self {
        tracing::debug!("MySQL driver initialized");
        Self
    }
}

impl Default for MySqlDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DatabaseDriver for MySqlDriver {
    #[tracing::instrument(skip(self, config), fields(host = %config.host, port = config.get_port()))]
    async fn connect(&self, config: &ConnectionConfig) -> Result<Arc<dyn Connection>> {
        let conn = MySqlConnection::connect(config).await.map_err(|e| {
            tracing::error!(error = %e, "failed to connect to MySQL server");
            e
        })?;
        Ok(Arc::new(conn))
    }
}
