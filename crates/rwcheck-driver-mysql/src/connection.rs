//! MySQL connection implementation

use async_trait::async_trait;
use mysql_async::{
    Conn, Opts, OptsBuilder, Pool, PoolConstraints, PoolOpts, Row as MySqlRow, consts::ColumnType,
    prelude::*,
};
use rwcheck_core::{Connection, ConnectionConfig, Error, QueryResult, Result, Row, Value};

/// MySQL connection wrapper
///
/// Backed by a pool pinned to a single connection; the check issues one
/// query per run and the pool only exists to hand out `Conn` from `&self`.
pub struct MySqlConnection {
    pool: Pool,
    address: String,
}

impl MySqlConnection {
    /// Connect to a MySQL server, failing with [`Error::Timeout`] if the
    /// connection is not established within `config.connect_timeout`.
    pub async fn connect(config: &ConnectionConfig) -> Result<Self> {
        let address = format!("{}:{}", config.host, config.get_port());
        tracing::info!(address = %address, user = ?config.username, "connecting to MySQL server");

        let opts = build_opts(config)?;
        let pool = Pool::new(opts);

        // Pool::new is lazy, so establishing the first connection is the
        // actual connectivity and credentials check.
        let conn = tokio::time::timeout(config.connect_timeout, pool.get_conn())
            .await
            .map_err(|_| {
                Error::Timeout(format!(
                    "no connection to {} within {}s",
                    address,
                    config.connect_timeout.as_secs()
                ))
            })?
            .map_err(|e| Error::Connection(format!("Failed to connect to MySQL at {}: {}", address, e)))?;
        drop(conn);

        tracing::info!(address = %address, "MySQL connection established");
        Ok(Self { pool, address })
    }

    async fn get_conn(&self) -> Result<Conn> {
        self.pool
            .get_conn()
            .await
            .map_err(|e| Error::Connection(format!("Failed to get MySQL connection: {}", e)))
    }
}

/// Translate a [`ConnectionConfig`] into `mysql_async` options
pub(crate) fn build_opts(config: &ConnectionConfig) -> Result<Opts> {
    if config.host.trim().is_empty() {
        return Err(Error::Configuration("MySQL host must not be empty".into()));
    }

    let constraints = PoolConstraints::new(1, 1).ok_or_else(|| {
        Error::Configuration("Failed to configure MySQL pool constraints (min=1, max=1)".into())
    })?;
    let pool_opts = PoolOpts::default()
        .with_constraints(constraints)
        .with_reset_connection(false);

    let opts_builder = OptsBuilder::default()
        .ip_or_hostname(config.host.clone())
        .tcp_port(config.get_port())
        .user(config.username.clone())
        .pass(config.password.clone())
        .pool_opts(pool_opts);

    Ok(opts_builder.into())
}

/// Convert mysql_async Value to our Value type, using column type metadata
/// to interpret byte strings from the text protocol.
pub(crate) fn mysql_value_to_value(val: mysql_async::Value, col_type: ColumnType) -> Value {
    match val {
        mysql_async::Value::NULL => Value::Null,
        mysql_async::Value::Bytes(bytes) => match String::from_utf8(bytes) {
            Ok(s) => match col_type {
                ColumnType::MYSQL_TYPE_TINY
                | ColumnType::MYSQL_TYPE_SHORT
                | ColumnType::MYSQL_TYPE_LONG
                | ColumnType::MYSQL_TYPE_LONGLONG
                | ColumnType::MYSQL_TYPE_INT24
                | ColumnType::MYSQL_TYPE_YEAR => {
                    s.parse::<i64>().map(Value::Int64).unwrap_or(Value::String(s))
                }
                ColumnType::MYSQL_TYPE_FLOAT
                | ColumnType::MYSQL_TYPE_DOUBLE
                | ColumnType::MYSQL_TYPE_DECIMAL
                | ColumnType::MYSQL_TYPE_NEWDECIMAL => {
                    s.parse::<f64>().map(Value::Float64).unwrap_or(Value::String(s))
                }
                _ => Value::String(s),
            },
            Err(e) => Value::Bytes(e.into_bytes()),
        },
        mysql_async::Value::Int(i) => Value::Int64(i),
        mysql_async::Value::UInt(u) => match i64::try_from(u) {
            Ok(i) => Value::Int64(i),
            Err(_) => Value::UInt64(u),
        },
        mysql_async::Value::Float(f) => Value::Float64(f as f64),
        mysql_async::Value::Double(d) => Value::Float64(d),
        // Only produced by the binary protocol; status queries use text.
        mysql_async::Value::Date(..) | mysql_async::Value::Time(..) => Value::Null,
    }
}

#[async_trait]
impl Connection for MySqlConnection {
    fn driver_name(&self) -> &str {
        "mysql"
    }

    #[tracing::instrument(skip(self, sql), fields(address = %self.address, sql_preview = %sql.chars().take(100).collect::<String>()))]
    async fn query(&self, sql: &str) -> Result<QueryResult> {
        let start_time = std::time::Instant::now();
        let mut conn = self.get_conn().await?;

        let mysql_rows: Vec<MySqlRow> = conn
            .query(sql)
            .await
            .map_err(|e| Error::Query(format!("Failed to execute query: {}", e)))?;

        let mut column_names = Vec::new();
        let mut column_types = Vec::new();
        if let Some(first_row) = mysql_rows.first() {
            for col in first_row.columns_ref().iter() {
                column_names.push(col.name_str().to_string());
                column_types.push(col.column_type());
            }
        }

        let mut rows = Vec::with_capacity(mysql_rows.len());
        for mysql_row in mysql_rows {
            let mut values = Vec::with_capacity(column_names.len());
            for (idx, col_type) in column_types.iter().enumerate() {
                let mysql_val: mysql_async::Value =
                    mysql_row.get(idx).unwrap_or(mysql_async::Value::NULL);
                values.push(mysql_value_to_value(mysql_val, *col_type));
            }
            rows.push(Row::new(values));
        }

        let execution_time_ms = start_time.elapsed().as_millis() as u64;
        tracing::debug!(
            row_count = rows.len(),
            execution_time_ms = execution_time_ms,
            "query executed successfully"
        );

        Ok(QueryResult {
            columns: column_names,
            rows,
            execution_time_ms,
        })
    }

    async fn close(&self) -> Result<()> {
        tracing::debug!(address = %self.address, "closing MySQL connection");
        self.pool
            .clone()
            .disconnect()
            .await
            .map_err(|e| Error::Connection(format!("Failed to close MySQL connection: {}", e)))
    }
}

#[cfg(test)]
mod tests;
