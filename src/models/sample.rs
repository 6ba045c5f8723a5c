// Raw (untrusted) and validated metric samples

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Field spellings accepted per field, in priority order.
const TIMESTAMP_KEYS: [&str; 6] = ["timestamp", "ts", "time", "date", "created_at", "createdAt"];
const HOST_KEYS: [&str; 3] = ["host", "hostname", "host_name"];
const CPU_KEYS: [&str; 3] = ["cpu_usage", "cpu", "cpuUsage"];
const MEMORY_KEYS: [&str; 4] = ["memory_usage", "memory", "mem", "memoryUsage"];
const LATENCY_KEYS: [&str; 3] = ["latency", "latency_ms", "latencyMs"];

/// One metric record as delivered by a collector or client.
///
/// Every field is an untyped JSON value and deserialization never fails, so a
/// malformed record (duplicate spellings, `null`, a bare number) cannot sink
/// its batch; validation happens in `chart::normalize`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RawSample {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu_usage: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_usage: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency: Option<Value>,
}

impl<'de> Deserialize<'de> for RawSample {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(RawSample::from_value(&value))
    }
}

impl RawSample {
    /// Lenient constructor: each field takes the first non-null spelling present.
    /// Anything but a JSON object yields an empty record, which the normalizer drops.
    pub fn from_value(value: &Value) -> Self {
        let Value::Object(map) = value else {
            return RawSample::default();
        };
        let pick = |keys: &[&str]| {
            keys.iter()
                .filter_map(|k| map.get(*k))
                .find(|v| !v.is_null())
                .cloned()
        };
        Self {
            timestamp: pick(&TIMESTAMP_KEYS),
            host: pick(&HOST_KEYS),
            cpu_usage: pick(&CPU_KEYS),
            memory_usage: pick(&MEMORY_KEYS),
            latency: pick(&LATENCY_KEYS),
        }
    }

    /// Well-formed record with an epoch-millis timestamp (collectors, tests).
    pub fn new(epoch_millis: i64, host: &str, cpu: f64, memory: f64) -> Self {
        Self {
            timestamp: Some(Value::from(epoch_millis)),
            host: Some(Value::from(host)),
            cpu_usage: Some(Value::from(cpu)),
            memory_usage: Some(Value::from(memory)),
            latency: None,
        }
    }

    pub fn with_latency(mut self, latency_ms: f64) -> Self {
        self.latency = Some(Value::from(latency_ms));
        self
    }

    /// Host as a trimmed, non-empty string; `None` for missing, blank or non-string hosts.
    pub fn host_name(&self) -> Option<&str> {
        match &self.host {
            Some(Value::String(s)) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then_some(trimmed)
            }
            _ => None,
        }
    }
}

/// Validated sample. Every present field is finite.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub epoch_millis: i64,
    /// Trimmed host; `None` when the record carried no usable host.
    pub host: Option<String>,
    pub cpu: f64,
    pub memory: f64,
    pub latency: Option<f64>,
}
