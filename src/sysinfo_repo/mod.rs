// Local host usage via sysinfo (feeds the built-in sampler)

use std::sync::Arc;
use std::time::Instant;
use sysinfo::System;
use tracing::instrument;

/// CPU and memory usage of the machine this service runs on, in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HostUsage {
    pub cpu_percent: f64,
    pub memory_percent: f64,
}

pub struct SysinfoRepo {
    sys: Arc<std::sync::Mutex<System>>,
    last_cpu_refresh: Arc<std::sync::Mutex<Option<(Instant, f64)>>>,
}

impl Default for SysinfoRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl SysinfoRepo {
    pub fn new() -> Self {
        let mut sys = System::new();
        sys.refresh_cpu_all();
        sys.refresh_memory();
        Self {
            sys: Arc::new(std::sync::Mutex::new(sys)),
            last_cpu_refresh: Arc::new(std::sync::Mutex::new(None)),
        }
    }

    /// Host name reported by the OS, if any.
    pub fn host_name(&self) -> Option<String> {
        System::host_name().filter(|h| !h.trim().is_empty())
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "get_host_usage"))]
    pub async fn get_host_usage(&self) -> anyhow::Result<HostUsage> {
        let sys = self.sys.clone();
        let last_cpu_refresh = self.last_cpu_refresh.clone();
        tokio::task::spawn_blocking(move || {
            let mut sys = sys
                .lock()
                .map_err(|e| anyhow::anyhow!("sysinfo lock poisoned: {}", e))?;

            let now = Instant::now();
            let mut guard = last_cpu_refresh
                .lock()
                .map_err(|e| anyhow::anyhow!("cpu refresh lock poisoned: {}", e))?;
            let cpu_percent = match *guard {
                // Too soon for a new reading; reuse the last one instead of blocking
                Some((prev_ts, prev_usage))
                    if now.duration_since(prev_ts) < sysinfo::MINIMUM_CPU_UPDATE_INTERVAL =>
                {
                    prev_usage
                }
                _ => {
                    sys.refresh_cpu_all();
                    let usage = sys.global_cpu_usage() as f64;
                    *guard = Some((now, usage));
                    usage
                }
            };

            sys.refresh_memory();
            let total = sys.total_memory();
            let used = total.saturating_sub(sys.available_memory());
            let memory_percent = if total > 0 {
                (used as f64 / total as f64) * 100.0
            } else {
                0.0
            };

            Ok(HostUsage {
                cpu_percent: cpu_percent.clamp(0.0, 100.0),
                memory_percent: memory_percent.clamp(0.0, 100.0),
            })
        })
        .await
        .map_err(|e| anyhow::anyhow!("sysinfo task join: {}", e))?
    }
}
