//! Counter collector
//!
//! Reads the cumulative status counters from a live connection.

use super::CounterSnapshot;
use rwcheck_core::{Connection, Error, Result};

/// Query builder for database-specific status counter queries
pub struct StatusQuery;

impl StatusQuery {
    /// Get the SQL query for MySQL/MariaDB status counters
    ///
    /// `SHOW GLOBAL STATUS` works across MySQL 5.x, 8.x and MariaDB, unlike
    /// `information_schema.global_status` (removed in MySQL 8) or
    /// `performance_schema.global_status` (absent on older MariaDB).
    pub fn mysql() -> &'static str {
        "SHOW GLOBAL STATUS WHERE Variable_name IN \
         ('Questions', 'Com_select', 'Com_insert', 'Com_update', 'Com_delete', 'Uptime')"
    }

    /// Get the appropriate query for a driver
    pub fn for_driver(driver_name: &str) -> Result<&'static str> {
        match driver_name {
            "mysql" | "mariadb" => Ok(Self::mysql()),
            _ => Err(Error::NotSupported(format!(
                "Status counter query not available for driver: {}",
                driver_name
            ))),
        }
    }
}

/// Collects a [`CounterSnapshot`] from a connection
#[derive(Debug, Default)]
pub struct CounterCollector;

impl CounterCollector {
    pub fn new() -> Self {
        Self
    }

    /// Run the status query and parse its rows
    pub async fn collect<C: Connection + ?Sized>(&self, conn: &C) -> Result<CounterSnapshot> {
        let driver_name = conn.driver_name();
        let query = StatusQuery::for_driver(driver_name)?;
        let result = conn.query(query).await?;

        let snapshot = CounterSnapshot::from_status_rows(&result);
        tracing::debug!(
            driver = %driver_name,
            rows = result.row_count(),
            uptime = snapshot.uptime,
            selects = snapshot.selects,
            writes = snapshot.total_writes(),
            "collected status counters"
        );
        Ok(snapshot)
    }
}
