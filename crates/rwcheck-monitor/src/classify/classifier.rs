//! Rate classifier
//!
//! Computes read and write rates between two snapshots and grades each
//! against its warning and critical thresholds.

use super::Severity;
use crate::CounterSnapshot;

/// Rate thresholds, in operations per second
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdConfig {
    pub read_warning: i64,
    pub read_critical: i64,
    pub write_warning: i64,
    pub write_critical: i64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            read_warning: 1000,
            read_critical: 1500,
            write_warning: 50,
            write_critical: 100,
        }
    }
}

impl ThresholdConfig {
    pub fn new(
        read_warning: i64,
        read_critical: i64,
        write_warning: i64,
        write_critical: i64,
    ) -> Self {
        Self {
            read_warning,
            read_critical,
            write_warning,
            write_critical,
        }
    }

    /// Grade a read rate, critical checked first
    pub fn grade_reads(&self, rate: i64) -> Severity {
        grade(rate, self.read_warning, self.read_critical)
    }

    /// Grade a write rate, critical checked first
    pub fn grade_writes(&self, rate: i64) -> Severity {
        grade(rate, self.write_warning, self.write_critical)
    }
}

fn grade(rate: i64, warning: i64, critical: i64) -> Severity {
    if rate > critical {
        Severity::Critical
    } else if rate > warning {
        Severity::Warning
    } else {
        Severity::Ok
    }
}

/// Per-second rates over the interval between two snapshots
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rates {
    /// Seconds between the snapshots
    pub elapsed: i64,
    /// SELECTs per second
    pub reads: i64,
    /// INSERT/UPDATE/DELETE per second
    pub writes: i64,
}

impl Rates {
    /// Rates from `previous` to `current`, using truncating division.
    ///
    /// Both rates are 0 when no time has elapsed (or uptime went backwards
    /// without the baseline having been reset). A delta that does not fit
    /// in an `i64` also counts as a rate of 0.
    pub fn between(previous: &CounterSnapshot, current: &CounterSnapshot) -> Self {
        let Some(elapsed) = current.uptime.checked_sub(previous.uptime) else {
            return Self::default();
        };
        if elapsed <= 0 {
            return Self {
                elapsed,
                reads: 0,
                writes: 0,
            };
        }
        let per_second = |delta: Option<i64>| delta.map_or(0, |d| d / elapsed);
        Self {
            elapsed,
            reads: per_second(current.selects.checked_sub(previous.selects)),
            writes: per_second(current.total_writes().checked_sub(previous.total_writes())),
        }
    }
}

/// Result of classifying one interval
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub severity: Severity,
    pub message: String,
    pub read_rate: i64,
    pub write_rate: i64,
}

impl Verdict {
    pub fn exit_code(&self) -> i32 {
        self.severity.exit_code()
    }
}

/// Grades read/write rates against a fixed [`ThresholdConfig`]
#[derive(Debug, Clone, Default)]
pub struct RateClassifier {
    thresholds: ThresholdConfig,
}

impl RateClassifier {
    pub fn new(thresholds: ThresholdConfig) -> Self {
        Self { thresholds }
    }

    /// Classify the interval from `previous` to `current`.
    ///
    /// Overall severity is the worse of the read and write grades and the
    /// message names the dimension that produced it. On equal non-OK grades
    /// the write message is reported.
    pub fn classify(&self, previous: &CounterSnapshot, current: &CounterSnapshot) -> Verdict {
        let rates = Rates::between(previous, current);
        let reads = self.thresholds.grade_reads(rates.reads);
        let writes = self.thresholds.grade_writes(rates.writes);

        let message = if reads.is_ok() && writes.is_ok() {
            "Normal level of reads and writes".to_string()
        } else if writes >= reads {
            breach_message(
                "Writes",
                writes,
                rates.writes,
                self.thresholds.write_warning,
                self.thresholds.write_critical,
            )
        } else {
            breach_message(
                "Reads",
                reads,
                rates.reads,
                self.thresholds.read_warning,
                self.thresholds.read_critical,
            )
        };

        let verdict = Verdict {
            severity: reads.max(writes),
            message,
            read_rate: rates.reads,
            write_rate: rates.writes,
        };
        tracing::debug!(
            elapsed = rates.elapsed,
            read_rate = verdict.read_rate,
            write_rate = verdict.write_rate,
            read_severity = %reads,
            write_severity = %writes,
            severity = %verdict.severity,
            "classified interval"
        );
        verdict
    }
}

fn breach_message(
    dimension: &str,
    severity: Severity,
    rate: i64,
    warning: i64,
    critical: i64,
) -> String {
    let (level, threshold) = match severity {
        Severity::Critical => ("critical", critical),
        _ => ("warning", warning),
    };
    format!("{} above {} level ({}/s > {})", dimension, level, rate, threshold)
}
