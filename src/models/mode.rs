// Chart mode (closed set) and host selector

use std::fmt;
use std::str::FromStr;

use chrono::TimeDelta;

use crate::chart::ChartError;

/// Bucket granularity for a mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    /// 1-second epoch alignment.
    Second,
    /// UTC calendar date.
    Day,
}

/// Per-mode window and bucketing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeConfig {
    /// Span covered by the window, ending at "now".
    pub window: TimeDelta,
    pub granularity: Granularity,
    /// Keep only the most recent `cap` buckets after sorting.
    pub cap: Option<usize>,
}

/// Rolling 5-minute live view, 7-day or 30-day daily rollup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartMode {
    Live,
    SevenDays,
    OneMonth,
}

const LIVE_WINDOW_MINUTES: i64 = 5;
const LIVE_POINT_CAP: usize = 60;

impl ChartMode {
    pub const ALL: [ChartMode; 3] = [ChartMode::Live, ChartMode::SevenDays, ChartMode::OneMonth];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartMode::Live => "live",
            ChartMode::SevenDays => "7d",
            ChartMode::OneMonth => "1m",
        }
    }

    pub fn config(&self) -> ModeConfig {
        match self {
            ChartMode::Live => ModeConfig {
                window: TimeDelta::minutes(LIVE_WINDOW_MINUTES),
                granularity: Granularity::Second,
                cap: Some(LIVE_POINT_CAP),
            },
            ChartMode::SevenDays => ModeConfig {
                window: TimeDelta::days(7),
                granularity: Granularity::Day,
                cap: None,
            },
            ChartMode::OneMonth => ModeConfig {
                window: TimeDelta::days(30),
                granularity: Granularity::Day,
                cap: None,
            },
        }
    }
}

impl FromStr for ChartMode {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "live" => Ok(ChartMode::Live),
            "7d" => Ok(ChartMode::SevenDays),
            "1m" => Ok(ChartMode::OneMonth),
            other => Err(ChartError::InvalidMode(other.to_string())),
        }
    }
}

impl fmt::Display for ChartMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which hosts contribute to the series. `"all"` and blank select every host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum HostSelector {
    #[default]
    All,
    Host(String),
}

impl HostSelector {
    pub const ALL_SENTINEL: &'static str = "all";

    /// Never fails: unknown hosts are legal and just match nothing.
    /// Trimmed the same way sample hosts are, so `" web "` selects `web`.
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() || s == Self::ALL_SENTINEL {
            HostSelector::All
        } else {
            HostSelector::Host(s.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            HostSelector::All => Self::ALL_SENTINEL,
            HostSelector::Host(h) => h,
        }
    }

    /// Exact, case-sensitive match; samples without a host only match `All`.
    pub fn matches(&self, host: Option<&str>) -> bool {
        match self {
            HostSelector::All => true,
            HostSelector::Host(wanted) => host == Some(wanted.as_str()),
        }
    }
}
