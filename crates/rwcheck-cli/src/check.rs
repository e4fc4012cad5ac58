//! One check run: collect, compare, classify, persist

use crate::CheckConfig;
use anyhow::Context;
use rwcheck_core::DatabaseDriver;
use rwcheck_monitor::{CounterCollector, RateClassifier, Report, SnapshotStore, snapshot_key};

/// Run the check against the server described by `config`.
///
/// Connection and query failures are returned as errors for the caller to
/// report as UNKNOWN. A failure to persist the new snapshot is only logged:
/// it degrades the next run's baseline, not this run's answer.
#[tracing::instrument(skip_all, fields(host = %config.connection.host))]
pub async fn run_check<D: DatabaseDriver + ?Sized>(
    driver: &D,
    config: &CheckConfig,
) -> anyhow::Result<Report> {
    let address = format!("{}:{}", config.connection.host, config.connection.get_port());

    let conn = driver
        .connect(&config.connection)
        .await
        .with_context(|| format!("cannot connect to {}", address))?;

    let collected = CounterCollector::new().collect(&*conn).await;
    if let Err(e) = conn.close().await {
        tracing::debug!(error = %e, "error while closing connection");
    }
    let current = collected
        .with_context(|| format!("cannot read status counters from {}", address))?;

    let store = SnapshotStore::in_dir(&config.state_dir);
    let key = snapshot_key(&config.executable, &config.connection.host);

    let previous = store.load(&key);
    let baseline = store.detect_reset(&previous, &current);
    let verdict = RateClassifier::new(config.thresholds).classify(&baseline, &current);

    if let Err(e) = store.save(&key, &current) {
        tracing::warn!(
            key = %key,
            dir = %config.state_dir.display(),
            error = %e,
            "could not save snapshot, next run will use a stale baseline"
        );
    }

    Ok(Report::new(&verdict, &current))
}
