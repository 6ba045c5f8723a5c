// Chart output: one point per non-empty bucket

use serde::{Deserialize, Serialize};

/// Per-bucket means, rounded to 2 decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedPoint {
    /// ISO instant (`2024-05-01T12:00:03.000Z`) in live mode, ISO date (`2024-05-01`) otherwise.
    pub label: String,
    pub cpu: f64,
    pub memory: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latency: Option<f64>,
}

/// Everything the chart needs for one render: the series and the host selector options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartView {
    pub mode: String,
    pub host: String,
    pub points: Vec<AggregatedPoint>,
    pub hosts: Vec<String>,
}
