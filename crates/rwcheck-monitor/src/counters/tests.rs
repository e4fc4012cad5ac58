//! Unit tests for counter snapshots and collection

use super::*;
use async_trait::async_trait;
use rwcheck_core::{Connection, Error, QueryResult, Result, Value};

fn status_rows(rows: &[(&str, Value)]) -> QueryResult {
    QueryResult::from_rows(
        vec!["Variable_name".to_string(), "Value".to_string()],
        rows.iter()
            .map(|(name, value)| vec![Value::String(name.to_string()), value.clone()])
            .collect(),
    )
}

fn text(v: &str) -> Value {
    Value::String(v.to_string())
}

mod snapshot_tests {
    use super::*;

    #[test]
    fn test_snapshot_new_is_zero() {
        let snapshot = CounterSnapshot::new();
        assert!(snapshot.is_zero());
        assert_eq!(snapshot.total_writes(), 0);
    }

    #[test]
    fn test_total_writes() {
        let snapshot = CounterSnapshot::new()
            .with_selects(900)
            .with_inserts(15)
            .with_updates(10)
            .with_deletes(5);
        assert_eq!(snapshot.total_writes(), 30);
        assert!(!snapshot.is_zero());
    }

    #[test]
    fn test_total_writes_saturates() {
        let snapshot = CounterSnapshot::new()
            .with_inserts(i64::MAX)
            .with_updates(1);
        assert_eq!(snapshot.total_writes(), i64::MAX);
    }

    #[test]
    fn test_negative_counters_are_invalid() {
        assert!(CounterSnapshot::new().is_valid());
        assert!(CounterSnapshot::new().with_uptime(10).is_valid());
        assert!(!CounterSnapshot::new().with_selects(i64::MIN).is_valid());
        assert!(!CounterSnapshot::new().with_uptime(-1).is_valid());
    }

    #[test]
    fn test_from_status_rows() {
        let result = status_rows(&[
            ("Questions", text("5000")),
            ("Com_select", text("3000")),
            ("Com_insert", text("50")),
            ("Com_update", text("20")),
            ("Com_delete", text("5")),
            ("Uptime", text("1100")),
        ]);
        let snapshot = CounterSnapshot::from_status_rows(&result);
        assert_eq!(
            snapshot,
            CounterSnapshot::new()
                .with_queries(5000)
                .with_selects(3000)
                .with_inserts(50)
                .with_updates(20)
                .with_deletes(5)
                .with_uptime(1100)
        );
    }

    #[test]
    fn test_names_match_case_insensitively() {
        let result = status_rows(&[("COM_SELECT", Value::Int64(7)), ("UPTIME", Value::Int64(9))]);
        let snapshot = CounterSnapshot::from_status_rows(&result);
        assert_eq!(snapshot.selects, 7);
        assert_eq!(snapshot.uptime, 9);
    }

    #[test]
    fn test_unknown_rows_ignored_and_missing_rows_zero() {
        let result = status_rows(&[
            ("Threads_connected", text("12")),
            ("Com_insert", text("4")),
        ]);
        let snapshot = CounterSnapshot::from_status_rows(&result);
        assert_eq!(snapshot, CounterSnapshot::new().with_inserts(4));
    }

    #[test]
    fn test_non_integer_values_skipped() {
        let result = status_rows(&[("Uptime", text("soon")), ("Com_select", Value::Null)]);
        assert!(CounterSnapshot::from_status_rows(&result).is_zero());
    }

    #[test]
    fn test_apply_status_reports_recognition() {
        let mut snapshot = CounterSnapshot::new();
        assert!(snapshot.apply_status("Questions", 1));
        assert!(!snapshot.apply_status("Bytes_sent", 1));
        assert_eq!(snapshot.queries, 1);
    }

    #[test]
    fn test_snapshot_serialization() {
        let snapshot = CounterSnapshot::new().with_selects(10).with_uptime(20);
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"selects\":10"));
        assert!(json.contains("\"uptime\":20"));
    }

    #[test]
    fn test_deserialize_tolerates_missing_and_extra_fields() {
        let snapshot: CounterSnapshot =
            serde_json::from_str(r#"{"selects":3,"totals":99}"#).unwrap();
        assert_eq!(snapshot, CounterSnapshot::new().with_selects(3));
    }
}

mod collector_tests {
    use super::*;

    struct FakeConnection {
        driver: &'static str,
        result: QueryResult,
    }

    #[async_trait]
    impl Connection for FakeConnection {
        fn driver_name(&self) -> &str {
            self.driver
        }

        async fn query(&self, sql: &str) -> Result<QueryResult> {
            assert_eq!(sql, StatusQuery::mysql());
            Ok(self.result.clone())
        }

        async fn close(&self) -> Result<()> {
            Ok(())
        }
    }

    struct FailingConnection;

    #[async_trait]
    impl Connection for FailingConnection {
        fn driver_name(&self) -> &str {
            "mysql"
        }

        async fn query(&self, _sql: &str) -> Result<QueryResult> {
            Err(Error::Query("Access denied".into()))
        }

        async fn close(&self) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_status_query_lists_every_variable() {
        let sql = StatusQuery::mysql();
        for name in STATUS_VARIABLES {
            assert!(sql.contains(&format!("'{}'", name)), "missing {name}");
        }
    }

    #[test]
    fn test_status_query_for_driver() {
        assert!(StatusQuery::for_driver("mysql").is_ok());
        assert!(StatusQuery::for_driver("mariadb").is_ok());
        assert!(matches!(
            StatusQuery::for_driver("sqlite"),
            Err(Error::NotSupported(_))
        ));
    }

    #[tokio::test]
    async fn test_collect_parses_rows() {
        let conn = FakeConnection {
            driver: "mysql",
            result: status_rows(&[("Com_select", text("42")), ("Uptime", text("600"))]),
        };
        let snapshot = CounterCollector::new().collect(&conn).await.unwrap();
        assert_eq!(snapshot, CounterSnapshot::new().with_selects(42).with_uptime(600));
    }

    #[tokio::test]
    async fn test_collect_empty_result_is_zero() {
        let conn = FakeConnection {
            driver: "mysql",
            result: QueryResult::default(),
        };
        let snapshot = CounterCollector::new().collect(&conn).await.unwrap();
        assert!(snapshot.is_zero());
    }

    #[tokio::test]
    async fn test_collect_propagates_query_errors() {
        let result = CounterCollector::new().collect(&FailingConnection).await;
        assert!(matches!(result, Err(Error::Query(_))));
    }

    #[tokio::test]
    async fn test_collect_rejects_unsupported_driver() {
        let conn = FakeConnection {
            driver: "duckdb",
            result: QueryResult::default(),
        };
        let result = CounterCollector::new().collect(&conn).await;
        assert!(matches!(result, Err(Error::NotSupported(_))));
    }
}
