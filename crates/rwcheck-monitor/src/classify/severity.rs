//! Check severity

/// Outcome of a check, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Severity {
    #[default]
    Ok,
    Warning,
    Critical,
    /// The check could not be answered (server unreachable, bad flags).
    /// Never produced by rate classification.
    Unknown,
}

impl Severity {
    /// Plugin exit code: 0 OK, 1 WARNING, 2 CRITICAL, 3 UNKNOWN
    pub fn exit_code(&self) -> i32 {
        match self {
            Severity::Ok => 0,
            Severity::Warning => 1,
            Severity::Critical => 2,
            Severity::Unknown => 3,
        }
    }

    /// Prefix used on the status line
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Ok => "OK",
            Severity::Warning => "WARNING",
            Severity::Critical => "CRITICAL",
            Severity::Unknown => "UNKNOWN",
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Severity::Ok)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
