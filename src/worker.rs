// Background sampler: records this machine's usage into the store and prunes old samples.

use crate::models::RawSample;
use crate::sample_store::SampleStore;
use crate::sysinfo_repo::SysinfoRepo;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::time::{Duration, interval};
use tracing::Instrument;

const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Store, probe and shutdown for the worker.
pub struct WorkerDeps {
    pub sysinfo_repo: Arc<SysinfoRepo>,
    pub store: Arc<SampleStore>,
    /// Host label written on every local sample.
    pub host: String,
    pub samples_recorded_total: Arc<AtomicU64>,
    pub shutdown_rx: tokio::sync::oneshot::Receiver<()>,
}

/// Worker timing. Pruning and stats logging run on their own real-time intervals.
pub struct WorkerConfig {
    pub sample_interval_ms: u64,
    pub prune_interval_secs: u64,
    pub stats_log_interval_secs: u64,
    pub retention_days: u32,
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Oldest timestamp (epoch millis) kept after a prune at `now_ms`.
pub fn retention_cutoff(now_ms: i64, retention_days: u32) -> i64 {
    now_ms - i64::from(retention_days) * MS_PER_DAY
}

pub fn spawn(deps: WorkerDeps, config: WorkerConfig) -> tokio::task::JoinHandle<()> {
    let WorkerDeps {
        sysinfo_repo,
        store,
        host,
        samples_recorded_total,
        mut shutdown_rx,
    } = deps;
    let WorkerConfig {
        sample_interval_ms,
        prune_interval_secs,
        stats_log_interval_secs,
        retention_days,
    } = config;

    let worker_span = tracing::span!(tracing::Level::DEBUG, "worker", sample_interval_ms, host = %host);

    let task = async move {
        let mut tick = interval(Duration::from_millis(sample_interval_ms));
        tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        let mut prune_tick = interval(Duration::from_secs(prune_interval_secs));
        prune_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        let mut stats_log_tick = interval(Duration::from_secs(stats_log_interval_secs));
        stats_log_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        let mut samples_pruned_total: u64 = 0;

        loop {
            tokio::select! {
                _ = tick.tick() => {
                    let usage = match sysinfo_repo.get_host_usage().await {
                        Ok(u) => u,
                        Err(e) => {
                            tracing::warn!(
                                error = %e,
                                operation = "get_host_usage",
                                "host usage failed"
                            );
                            continue;
                        }
                    };
                    store.push(RawSample::new(
                        now_millis(),
                        &host,
                        usage.cpu_percent,
                        usage.memory_percent,
                    ));
                    samples_recorded_total.fetch_add(1, Ordering::Relaxed);
                }
                _ = &mut shutdown_rx => {
                    tracing::debug!("Worker shutting down");
                    break;
                }
                _ = prune_tick.tick() => {
                    let pruned = store.prune_older_than(retention_cutoff(now_millis(), retention_days));
                    samples_pruned_total += pruned as u64;
                    tracing::debug!(operation = "prune_samples", pruned, "Old samples pruned");
                }
                _ = stats_log_tick.tick() => {
                    tracing::info!(
                        stored_samples = store.len(),
                        samples_recorded_total = samples_recorded_total.load(Ordering::Relaxed),
                        samples_pruned_total,
                        "app stats"
                    );
                }
            }
        }
    };

    tokio::spawn(task.instrument(worker_span))
}
