//! Plugin output
//!
//! Renders the single status line read by the monitoring scheduler:
//! `LABEL: message | 'name'=value ...`.

use super::{Severity, Verdict};
use crate::CounterSnapshot;

/// One `'name'=value` performance data entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerfDatum {
    pub name: &'static str,
    pub value: i64,
}

impl std::fmt::Display for PerfDatum {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}'={}", self.name, self.value)
    }
}

/// The status line of one check run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub severity: Severity,
    pub message: String,
    pub perf_data: Vec<PerfDatum>,
}

impl Report {
    /// Report for a classified run, with the current counters and rates as
    /// performance data
    pub fn new(verdict: &Verdict, current: &CounterSnapshot) -> Self {
        let perf_data = [
            ("queries", current.queries),
            ("selects", current.selects),
            ("inserts", current.inserts),
            ("updates", current.updates),
            ("deletes", current.deletes),
            ("uptime", current.uptime),
            ("reads_per_second", verdict.read_rate),
            ("writes_per_second", verdict.write_rate),
        ]
        .into_iter()
        .map(|(name, value)| PerfDatum { name, value })
        .collect();

        Self {
            severity: verdict.severity,
            message: verdict.message.clone(),
            perf_data,
        }
    }

    /// Report for a run that could not be completed
    pub fn unknown(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Unknown,
            message: message.into(),
            perf_data: Vec::new(),
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.severity.exit_code()
    }
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // the status line must stay on one line
        let message = self.message.replace(['\n', '\r'], " ");
        write!(f, "{}: {}", self.severity, message)?;
        if !self.perf_data.is_empty() {
            f.write_str(" |")?;
            for datum in &self.perf_data {
                write!(f, " {}", datum)?;
            }
        }
        Ok(())
    }
}
