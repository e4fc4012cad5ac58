//! Counter snapshots
//!
//! A snapshot is the set of cumulative server counters read at one point in
//! time. Counters only grow while the server keeps running.

use rwcheck_core::QueryResult;
use serde::{Deserialize, Serialize};

/// Status variable names, as reported by `SHOW GLOBAL STATUS`
pub const QUESTIONS: &str = "Questions";
pub const COM_SELECT: &str = "Com_select";
pub const COM_INSERT: &str = "Com_insert";
pub const COM_UPDATE: &str = "Com_update";
pub const COM_DELETE: &str = "Com_delete";
pub const UPTIME: &str = "Uptime";

/// Every status variable a snapshot is built from
pub const STATUS_VARIABLES: [&str; 6] =
    [QUESTIONS, COM_SELECT, COM_INSERT, COM_UPDATE, COM_DELETE, UPTIME];

/// Cumulative server counters at one point in time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterSnapshot {
    /// Total statements received since server start
    pub queries: i64,
    /// SELECT statements since server start
    pub selects: i64,
    /// INSERT statements since server start
    pub inserts: i64,
    /// UPDATE statements since server start
    pub updates: i64,
    /// DELETE statements since server start
    pub deletes: i64,
    /// Seconds since server start
    pub uptime: i64,
}

impl CounterSnapshot {
    /// Create an all-zero snapshot
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_queries(mut self, count: i64) -> Self {
        self.queries = count;
        self
    }

    pub fn with_selects(mut self, count: i64) -> Self {
        self.selects = count;
        self
    }

    pub fn with_inserts(mut self, count: i64) -> Self {
        self.inserts = count;
        self
    }

    pub fn with_updates(mut self, count: i64) -> Self {
        self.updates = count;
        self
    }

    pub fn with_deletes(mut self, count: i64) -> Self {
        self.deletes = count;
        self
    }

    pub fn with_uptime(mut self, seconds: i64) -> Self {
        self.uptime = seconds;
        self
    }

    /// INSERT + UPDATE + DELETE, saturating at `i64::MAX`
    pub fn total_writes(&self) -> i64 {
        self.inserts
            .saturating_add(self.updates)
            .saturating_add(self.deletes)
    }

    /// False if any counter is negative, which no server reports
    pub fn is_valid(&self) -> bool {
        [
            self.queries,
            self.selects,
            self.inserts,
            self.updates,
            self.deletes,
            self.uptime,
        ]
        .iter()
        .all(|&v| v >= 0)
    }

    /// True for the baseline used on a first run or after a restart
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }

    /// Apply one `(name, value)` status row; unknown names are ignored.
    ///
    /// Returns whether the name was recognised.
    pub fn apply_status(&mut self, name: &str, value: i64) -> bool {
        let slot = match name.to_ascii_lowercase().as_str() {
            "questions" => &mut self.queries,
            "com_select" => &mut self.selects,
            "com_insert" => &mut self.inserts,
            "com_update" => &mut self.updates,
            "com_delete" => &mut self.deletes,
            "uptime" => &mut self.uptime,
            _ => return false,
        };
        *slot = value;
        true
    }

    /// Build a snapshot from `(name, value)` rows.
    ///
    /// The first column holds the variable name and the second its value.
    /// Rows with unknown names or non-integer values are skipped, and
    /// counters with no row stay at zero.
    pub fn from_status_rows(result: &QueryResult) -> Self {
        let mut snapshot = Self::new();
        for row in &result.rows {
            let Some(name) = row.get(0).and_then(|v| v.as_str()) else {
                continue;
            };
            match row.get(1).and_then(|v| v.as_i64()) {
                Some(value) => {
                    if !snapshot.apply_status(name, value) {
                        tracing::trace!(name = %name, "ignoring unrelated status row");
                    }
                }
                None => tracing::debug!(name = %name, "status value is not an integer"),
            }
        }
        snapshot
    }
}
