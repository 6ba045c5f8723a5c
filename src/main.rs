use anyhow::Result;
use hostpulse::*;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigterm =
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(s) => s,
                Err(_) => {
                    let _ = tokio::signal::ctrl_c().await;
                    return;
                }
            };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .init();

    let app_config = config::AppConfig::load()?;
    let store = Arc::new(sample_store::SampleStore::new(app_config.store.capacity));

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
    let worker_handle = if app_config.sampler.enabled {
        let sysinfo_repo = Arc::new(sysinfo_repo::SysinfoRepo::new());
        let host = app_config
            .sampler
            .host
            .clone()
            .or_else(|| sysinfo_repo.host_name())
            .unwrap_or_else(|| "localhost".into());
        tracing::info!(host = %host, "local sampler enabled");
        Some(worker::spawn(
            worker::WorkerDeps {
                sysinfo_repo,
                store: store.clone(),
                host,
                samples_recorded_total: Arc::new(AtomicU64::new(0)),
                shutdown_rx,
            },
            worker::WorkerConfig {
                sample_interval_ms: app_config.sampler.sample_interval_ms,
                prune_interval_secs: app_config.sampler.prune_interval_secs,
                stats_log_interval_secs: app_config.sampler.stats_log_interval_secs,
                retention_days: app_config.store.retention_days,
            },
        ))
    } else {
        None
    };

    let app = routes::app(store);
    let addr = format!("{}:{}", app_config.server.host, app_config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Received shutdown signal");
    let _ = shutdown_tx.send(());
    if let Some(handle) = worker_handle {
        let _ = handle.await;
    }

    Ok(())
}
