//! Snapshot store
//!
//! Loads and saves the one [`CounterSnapshot`] kept per (executable, host)
//! pair. Loading fails open: a missing or unreadable record yields the zero
//! snapshot, so the first run after deployment reports against a zero
//! baseline instead of erroring.

use super::{FileBackend, SnapshotBackend};
use crate::CounterSnapshot;
use rwcheck_core::Result;
use std::path::PathBuf;

/// Storage key for the snapshot of `host` as seen by `executable`.
///
/// Path separators in either part are replaced so the key always names a
/// single file.
pub fn snapshot_key(executable: &str, host: &str) -> String {
    let clean = |s: &str| s.replace(['/', '\\'], "_");
    format!("{}.{}.stats", clean(executable), clean(host))
}

/// Persists counter snapshots through a [`SnapshotBackend`]
#[derive(Debug)]
pub struct SnapshotStore<B: SnapshotBackend = FileBackend> {
    backend: B,
}

impl SnapshotStore<FileBackend> {
    /// Store backed by files in `dir`
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self::new(FileBackend::new(dir))
    }
}

impl<B: SnapshotBackend> SnapshotStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Load the snapshot saved under `key`, or the zero snapshot
    pub fn load(&self, key: &str) -> CounterSnapshot {
        let bytes = match self.backend.get(key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                tracing::debug!(key = %key, "no previous snapshot, using zero baseline");
                return CounterSnapshot::new();
            }
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "previous snapshot unreadable, using zero baseline");
                return CounterSnapshot::new();
            }
        };

        match serde_json::from_slice::<CounterSnapshot>(&bytes) {
            Ok(snapshot) if snapshot.is_valid() => snapshot,
            Ok(snapshot) => {
                tracing::warn!(key = %key, ?snapshot, "previous snapshot has negative counters, using zero baseline");
                CounterSnapshot::new()
            }
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "previous snapshot malformed, using zero baseline");
                CounterSnapshot::new()
            }
        }
    }

    /// Overwrite the snapshot saved under `key`
    pub fn save(&self, key: &str, snapshot: &CounterSnapshot) -> Result<()> {
        let bytes = serde_json::to_vec(snapshot)?;
        self.backend.put(key, &bytes)?;
        tracing::debug!(key = %key, uptime = snapshot.uptime, "snapshot saved");
        Ok(())
    }

    /// Baseline to diff `current` against.
    ///
    /// An uptime lower than last time means the server restarted and every
    /// counter started again from zero, so the zero snapshot is returned.
    pub fn detect_reset(
        &self,
        previous: &CounterSnapshot,
        current: &CounterSnapshot,
    ) -> CounterSnapshot {
        if current.uptime < previous.uptime {
            tracing::info!(
                previous_uptime = previous.uptime,
                current_uptime = current.uptime,
                "server restart detected, resetting baseline"
            );
            CounterSnapshot::new()
        } else {
            *previous
        }
    }
}
