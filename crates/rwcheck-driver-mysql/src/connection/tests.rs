//! Tests for MySQL option building and value conversion

use super::*;
use pretty_assertions::assert_eq;
use std::time::Duration;

// =============================================================================
// Option Building Tests
// =============================================================================

#[test]
fn test_build_opts_maps_connection_config() {
    let config = ConnectionConfig::new_mysql("db.example.com", 3307)
        .with_username("monitor")
        .with_password("secret");
    let opts = build_opts(&config).unwrap();

    assert_eq!(opts.ip_or_hostname(), "db.example.com");
    assert_eq!(opts.tcp_port(), 3307);
    assert_eq!(opts.user(), Some("monitor"));
    assert_eq!(opts.pass(), Some("secret"));
}

#[test]
fn test_build_opts_uses_default_port() {
    let config = ConnectionConfig::new_mysql("localhost", 0);
    let opts = build_opts(&config).unwrap();
    assert_eq!(opts.tcp_port(), 3306);
    assert_eq!(opts.user(), None);
}

#[test]
fn test_build_opts_rejects_empty_host() {
    let config = ConnectionConfig::new_mysql("  ", 3306);
    assert!(matches!(build_opts(&config), Err(Error::Configuration(_))));
}

// =============================================================================
// Value Conversion Tests
// =============================================================================

#[test]
fn test_text_protocol_integer_columns() {
    let val = mysql_value_to_value(
        mysql_async::Value::Bytes(b"123456".to_vec()),
        ColumnType::MYSQL_TYPE_LONGLONG,
    );
    assert_eq!(val, Value::Int64(123456));
}

#[test]
fn test_status_values_stay_text() {
    // SHOW GLOBAL STATUS reports every value as VARCHAR
    let val = mysql_value_to_value(
        mysql_async::Value::Bytes(b"98765".to_vec()),
        ColumnType::MYSQL_TYPE_VAR_STRING,
    );
    assert_eq!(val, Value::String("98765".to_string()));
    assert_eq!(val.as_i64(), Some(98765));
}

#[test]
fn test_binary_values() {
    assert_eq!(
        mysql_value_to_value(mysql_async::Value::NULL, ColumnType::MYSQL_TYPE_LONG),
        Value::Null
    );
    assert_eq!(
        mysql_value_to_value(mysql_async::Value::Int(-5), ColumnType::MYSQL_TYPE_LONG),
        Value::Int64(-5)
    );
    assert_eq!(
        mysql_value_to_value(mysql_async::Value::UInt(u64::MAX), ColumnType::MYSQL_TYPE_LONGLONG),
        Value::UInt64(u64::MAX)
    );
    assert_eq!(
        mysql_value_to_value(mysql_async::Value::Double(0.5), ColumnType::MYSQL_TYPE_DOUBLE),
        Value::Float64(0.5)
    );
}

#[test]
fn test_temporal_binary_values_are_null() {
    assert_eq!(
        mysql_value_to_value(
            mysql_async::Value::Date(2024, 1, 2, 3, 4, 5, 0),
            ColumnType::MYSQL_TYPE_DATETIME
        ),
        Value::Null
    );
    assert_eq!(
        mysql_value_to_value(
            mysql_async::Value::Time(false, 0, 1, 2, 3, 0),
            ColumnType::MYSQL_TYPE_TIME
        ),
        Value::Null
    );
}

#[test]
fn test_invalid_utf8_kept_as_bytes() {
    let val = mysql_value_to_value(
        mysql_async::Value::Bytes(vec![0xff, 0xfe]),
        ColumnType::MYSQL_TYPE_BLOB,
    );
    assert_eq!(val, Value::Bytes(vec![0xff, 0xfe]));
}

// =============================================================================
// Connection Tests
// =============================================================================

#[tokio::test]
async fn test_connect_to_closed_port_fails_without_hanging() {
    // Port 1 on loopback is refused (or filtered, in which case the timeout fires)
    let config = ConnectionConfig::new_mysql("127.0.0.1", 1)
        .with_connect_timeout(Duration::from_secs(2));
    let result = MySqlConnection::connect(&config).await;
    match result {
        Err(err) => assert!(
            matches!(err, Error::Connection(_) | Error::Timeout(_)),
            "unexpected error: {err}"
        ),
        Ok(_) => panic!("connection to port 1 should not succeed"),
    }
}
