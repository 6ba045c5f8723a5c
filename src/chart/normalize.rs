// Sample normalizer: classify each raw record as a valid Sample or drop it.
// Dropping is routine (telemetry is noisy), so nothing here returns an error.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::models::{RawSample, Sample};

/// Naive date-time layouts tried after RFC 3339; interpreted as UTC.
const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Validate one record. `None` means rejected; the record must not influence any bucket.
pub fn normalize(raw: &RawSample) -> Option<Sample> {
    let epoch_millis = resolve_timestamp(raw.timestamp.as_ref()?)?;
    let cpu = finite_number(raw.cpu_usage.as_ref()?)?;
    let memory = finite_number(raw.memory_usage.as_ref()?)?;
    let latency = match &raw.latency {
        None | Some(Value::Null) => None,
        Some(v) => Some(finite_number(v)?),
    };

    Some(Sample {
        epoch_millis,
        host: raw.host_name().map(str::to_string),
        cpu,
        memory,
        latency,
    })
}

/// Normalize a batch, preserving input order and omitting rejected records.
pub fn normalize_all(raws: &[RawSample]) -> Vec<Sample> {
    let samples: Vec<Sample> = raws.iter().filter_map(normalize).collect();
    let dropped = raws.len() - samples.len();
    if dropped > 0 {
        tracing::debug!(
            operation = "normalize",
            received = raws.len(),
            dropped,
            "malformed samples dropped"
        );
    }
    samples
}

/// Epoch millis from a numeric epoch, a date string, or a numeric string (in that order).
pub fn resolve_timestamp(value: &Value) -> Option<i64> {
    let millis = match value {
        Value::Number(n) => epoch_from_f64(n.as_f64()?)?,
        Value::String(s) => {
            let s = s.trim();
            parse_date_string(s).or_else(|| epoch_from_f64(s.parse::<f64>().ok()?))?
        }
        _ => return None,
    };
    // Reject instants chrono cannot represent; labels must always be formattable.
    DateTime::from_timestamp_millis(millis).map(|_| millis)
}

fn parse_date_string(s: &str) -> Option<i64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis());
    }
    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc().timestamp_millis());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().timestamp_millis())
}

fn epoch_from_f64(v: f64) -> Option<i64> {
    if !v.is_finite() || v.abs() >= i64::MAX as f64 {
        return None;
    }
    Some(v.floor() as i64)
}

/// Numbers and numeric strings coerce; everything else (bool, null, NaN, inf) is rejected.
fn finite_number(value: &Value) -> Option<f64> {
    let v = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    v.is_finite().then_some(v)
}
