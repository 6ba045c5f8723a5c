use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub sampler: SamplerConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Max raw samples kept in memory; the oldest are evicted first.
    #[serde(default = "default_store_capacity")]
    pub capacity: usize,
    /// Samples older than this are pruned. Must cover the longest chart window (30 days).
    #[serde(default = "default_retention_days")]
    pub retention_days: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            capacity: default_store_capacity(),
            retention_days: default_retention_days(),
        }
    }
}

fn default_store_capacity() -> usize {
    100_000
}

fn default_retention_days() -> u32 {
    30
}

#[derive(Debug, Clone, Deserialize)]
pub struct SamplerConfig {
    /// Record this machine's own CPU/memory usage into the store.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Host label for local samples; the OS host name when omitted.
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default = "default_sample_interval_ms")]
    pub sample_interval_ms: u64,
    #[serde(default = "default_prune_interval_secs")]
    pub prune_interval_secs: u64,
    /// How often to log store stats at INFO level.
    #[serde(default = "default_stats_log_interval_secs")]
    pub stats_log_interval_secs: u64,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            host: None,
            sample_interval_ms: default_sample_interval_ms(),
            prune_interval_secs: default_prune_interval_secs(),
            stats_log_interval_secs: default_stats_log_interval_secs(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_sample_interval_ms() -> u64 {
    5000
}

fn default_prune_interval_secs() -> u64 {
    3600
}

fn default_stats_log_interval_secs() -> u64 {
    60
}

/// Rollups look back 30 calendar days; shorter retention would silently empty them.
const MIN_RETENTION_DAYS: u32 = 30;

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(
            !self.server.host.trim().is_empty(),
            "server.host must be non-empty"
        );
        anyhow::ensure!(
            self.store.capacity > 0,
            "store.capacity must be > 0, got {}",
            self.store.capacity
        );
        anyhow::ensure!(
            self.store.retention_days >= MIN_RETENTION_DAYS,
            "store.retention_days must be >= {}, got {}",
            MIN_RETENTION_DAYS,
            self.store.retention_days
        );
        if let Some(host) = &self.sampler.host {
            anyhow::ensure!(
                !host.trim().is_empty(),
                "sampler.host must be non-empty when set"
            );
        }
        anyhow::ensure!(
            self.sampler.sample_interval_ms > 0,
            "sampler.sample_interval_ms must be > 0, got {}",
            self.sampler.sample_interval_ms
        );
        anyhow::ensure!(
            self.sampler.prune_interval_secs > 0,
            "sampler.prune_interval_secs must be > 0, got {}",
            self.sampler.prune_interval_secs
        );
        anyhow::ensure!(
            self.sampler.stats_log_interval_secs > 0,
            "sampler.stats_log_interval_secs must be > 0, got {}",
            self.sampler.stats_log_interval_secs
        );
        Ok(())
    }
}
