// Worker test: spawn sampler, tick, shutdown, assert samples recorded for the configured host

use hostpulse::models::HostSelector;
use hostpulse::sample_store::SampleStore;
use hostpulse::sysinfo_repo::SysinfoRepo;
use hostpulse::worker::{WorkerConfig, WorkerDeps, retention_cutoff, spawn};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

#[tokio::test]
async fn worker_spawn_records_samples_and_shuts_down() {
    let store = Arc::new(SampleStore::new(1000));
    let recorded = Arc::new(AtomicU64::new(0));
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

    let handle = spawn(
        WorkerDeps {
            sysinfo_repo: Arc::new(SysinfoRepo::new()),
            store: store.clone(),
            host: "test-host".into(),
            samples_recorded_total: recorded.clone(),
            shutdown_rx,
        },
        WorkerConfig {
            sample_interval_ms: 25,
            prune_interval_secs: 3600,
            stats_log_interval_secs: 3600,
            retention_days: 30,
        },
    );
    tokio::time::sleep(tokio::time::Duration::from_millis(200)).await;
    let _ = shutdown_tx.send(());
    handle.await.unwrap();

    assert!(!store.is_empty(), "worker should have recorded at least one sample");
    assert_eq!(store.len() as u64, recorded.load(Ordering::Relaxed));
    let recent = store.recent(&HostSelector::parse("test-host"), 1);
    assert_eq!(recent.len(), 1);
}

#[test]
fn retention_cutoff_subtracts_whole_days() {
    assert_eq!(retention_cutoff(10 * 86_400_000, 3), 7 * 86_400_000);
}
