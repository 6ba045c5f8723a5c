// Chart engine: raw samples -> time-ordered series for one mode and host selector.
// Pure and synchronous; normalize -> filter -> window/bucket -> aggregate -> sequence.

pub mod aggregate;
pub mod filter;
pub mod hosts;
pub mod normalize;
pub mod sequence;
pub mod window;

use chrono::{DateTime, Utc};
use tracing::instrument;

use crate::models::{AggregatedPoint, ChartMode, ChartView, HostSelector, RawSample};

pub use hosts::list_hosts;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChartError {
    #[error("invalid chart mode {0:?}: expected one of \"live\", \"7d\", \"1m\"")]
    InvalidMode(String),
}

/// Series for `mode`/`selector` as of `now`. Empty when nothing falls in the window.
#[instrument(level = "debug", skip_all, fields(samples = raws.len(), mode = %mode, host = selector.as_str()))]
pub fn build_series(
    raws: &[RawSample],
    mode: ChartMode,
    selector: &HostSelector,
    now: DateTime<Utc>,
) -> Vec<AggregatedPoint> {
    let samples = normalize::normalize_all(raws);
    let samples = filter::filter_by_host(samples, selector);
    let bucketed = window::assign_buckets(&samples, mode, now);
    let buckets = aggregate::reduce(bucketed);
    sequence::sequence(buckets, mode)
}

/// Like [`build_series`], with mode and host given as the selector strings a client sends.
pub fn chart_series(
    raws: &[RawSample],
    mode: &str,
    host: &str,
    now: DateTime<Utc>,
) -> Result<Vec<AggregatedPoint>, ChartError> {
    let mode: ChartMode = mode.parse()?;
    Ok(build_series(raws, mode, &HostSelector::parse(host), now))
}

/// Series plus host options for one render of the chart.
pub fn chart_view(
    raws: &[RawSample],
    explicit_hosts: &[String],
    mode: &str,
    host: &str,
    now: DateTime<Utc>,
) -> Result<ChartView, ChartError> {
    let mode: ChartMode = mode.parse()?;
    let selector = HostSelector::parse(host);
    let points = build_series(raws, mode, &selector, now);
    Ok(ChartView {
        mode: mode.to_string(),
        host: selector.as_str().to_string(),
        points,
        hosts: list_hosts(explicit_hosts, raws),
    })
}
