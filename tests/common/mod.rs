// Shared test helpers

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use hostpulse::models::RawSample;

/// Fixed "now" so windows and labels are deterministic.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap()
}

pub fn now_ms() -> i64 {
    fixed_now().timestamp_millis()
}

pub fn sample(epoch_millis: i64, host: &str, cpu: f64, memory: f64) -> RawSample {
    RawSample::new(epoch_millis, host, cpu, memory)
}

pub fn iso_millis(epoch_millis: i64) -> String {
    DateTime::from_timestamp_millis(epoch_millis)
        .unwrap()
        .to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
