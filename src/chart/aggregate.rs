// Aggregator: single additive pass into per-bucket sums.
// Sums stay at full precision; rounding happens when points are exposed.

use std::collections::HashMap;

use super::window::BucketKey;
use crate::models::Sample;

/// Running sums for one bucket. Only created once a sample lands in it, so `count >= 1`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bucket {
    pub cpu_sum: f64,
    pub memory_sum: f64,
    pub latency_sum: f64,
    pub latency_count: u64,
    pub count: u64,
}

impl Bucket {
    fn add(&mut self, sample: &Sample) {
        self.cpu_sum += sample.cpu;
        self.memory_sum += sample.memory;
        if let Some(latency) = sample.latency {
            self.latency_sum += latency;
            self.latency_count += 1;
        }
        self.count += 1;
    }

    pub fn cpu_mean(&self) -> f64 {
        mean(self.cpu_sum, self.count)
    }

    pub fn memory_mean(&self) -> f64 {
        mean(self.memory_sum, self.count)
    }

    /// Mean over the samples that reported latency; `None` if none did.
    pub fn latency_mean(&self) -> Option<f64> {
        (self.latency_count > 0).then(|| mean(self.latency_sum, self.latency_count))
    }
}

fn mean(sum: f64, count: u64) -> f64 {
    if count == 0 {
        return 0.0;
    }
    sum / (count as f64)
}

pub fn reduce<'a, I>(bucketed: I) -> HashMap<BucketKey, Bucket>
where
    I: IntoIterator<Item = (BucketKey, &'a Sample)>,
{
    let mut by_key: HashMap<BucketKey, Bucket> = HashMap::new();
    for (key, sample) in bucketed {
        by_key.entry(key).or_default().add(sample);
    }
    by_key
}

/// Round half away from zero to 2 decimal places.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
