// Window selection and bucket assignment.
// Live: [now - 5 min, ...) in 1-second buckets. Rollups: whole UTC calendar days,
// the oldest being today - (days - 1), so 7d yields at most 7 dated buckets.
// A plain [now - days, now] span would touch days + 1 calendar dates; aligning
// the start to midnight keeps the point count at `days` and drops the partial
// oldest day.

use chrono::{DateTime, Days, NaiveDate, SecondsFormat, Utc};

use crate::models::{ChartMode, Granularity, ModeConfig, Sample};

const MS_PER_SECOND: i64 = 1000;

/// Bucket identity; ordering is chronological within one granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BucketKey {
    /// Second-aligned epoch millis.
    Second(i64),
    /// UTC calendar date.
    Day(NaiveDate),
}

impl BucketKey {
    pub fn for_sample(granularity: Granularity, epoch_millis: i64) -> Option<Self> {
        match granularity {
            Granularity::Second => Some(BucketKey::Second(
                epoch_millis.div_euclid(MS_PER_SECOND) * MS_PER_SECOND,
            )),
            Granularity::Day => DateTime::from_timestamp_millis(epoch_millis)
                .map(|dt| BucketKey::Day(dt.date_naive())),
        }
    }

    /// ISO instant for seconds, ISO date for days.
    pub fn label(&self) -> Option<String> {
        match self {
            BucketKey::Second(ms) => DateTime::from_timestamp_millis(*ms)
                .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true)),
            BucketKey::Day(date) => Some(date.format("%Y-%m-%d").to_string()),
        }
    }
}

/// Earliest eligible instant (epoch millis, inclusive) for `config` at `now`.
pub fn window_start(config: &ModeConfig, now: DateTime<Utc>) -> i64 {
    match config.granularity {
        Granularity::Second => (now - config.window).timestamp_millis(),
        Granularity::Day => {
            let back = (config.window.num_days() - 1).max(0) as u64;
            now.date_naive()
                .checked_sub_days(Days::new(back))
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|naive| naive.and_utc().timestamp_millis())
                .unwrap_or(i64::MIN)
        }
    }
}

/// Pair each in-window sample with its bucket. Samples after `now` are kept.
pub fn assign_buckets(
    samples: &[Sample],
    mode: ChartMode,
    now: DateTime<Utc>,
) -> Vec<(BucketKey, &Sample)> {
    let config = mode.config();
    let start = window_start(&config, now);
    samples
        .iter()
        .filter(|s| s.epoch_millis >= start)
        .filter_map(|s| BucketKey::for_sample(config.granularity, s.epoch_millis).map(|k| (k, s)))
        .collect()
}
