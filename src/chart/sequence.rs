// Sequencer: chronological order, labels, live-mode cap.
// An empty bucket map yields an empty series; no placeholder zero point is synthesized.

use std::collections::HashMap;

use super::aggregate::{Bucket, round2};
use super::window::BucketKey;
use crate::models::{AggregatedPoint, ChartMode};

pub fn sequence(buckets: HashMap<BucketKey, Bucket>, mode: ChartMode) -> Vec<AggregatedPoint> {
    let mut ordered: Vec<(BucketKey, Bucket)> = buckets.into_iter().collect();
    ordered.sort_by(|a, b| a.0.cmp(&b.0));

    if let Some(cap) = mode.config().cap {
        let excess = ordered.len().saturating_sub(cap);
        ordered.drain(..excess);
    }

    ordered
        .into_iter()
        .filter_map(|(key, bucket)| {
            Some(AggregatedPoint {
                label: key.label()?,
                cpu: round2(bucket.cpu_mean()),
                memory: round2(bucket.memory_mean()),
                latency: bucket.latency_mean().map(round2),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bucket(cpu: f64) -> Bucket {
        Bucket {
            cpu_sum: cpu,
            memory_sum: cpu,
            count: 1,
            ..Bucket::default()
        }
    }

    #[test]
    fn empty_map_is_empty_series() {
        for mode in ChartMode::ALL {
            assert!(sequence(HashMap::new(), mode).is_empty());
        }
    }

    #[test]
    fn live_keeps_most_recent_sixty() {
        let buckets: HashMap<BucketKey, Bucket> = (0..90)
            .map(|i| (BucketKey::Second(i * 1000), bucket(i as f64)))
            .collect();
        let out = sequence(buckets, ChartMode::Live);
        assert_eq!(out.len(), 60);
        assert_eq!(out[0].cpu, 30.0);
        assert_eq!(out[59].cpu, 89.0);
        assert!(out.windows(2).all(|w| w[0].label < w[1].label));
    }

    #[test]
    fn rollup_is_uncapped_and_sorted() {
        let base = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let buckets: HashMap<BucketKey, Bucket> = (0..90)
            .rev()
            .map(|i| {
                let day = base + chrono::Days::new(i);
                (BucketKey::Day(day), bucket(i as f64))
            })
            .collect();
        let out = sequence(buckets, ChartMode::OneMonth);
        assert_eq!(out.len(), 90);
        assert_eq!(out[0].label, "2024-01-01");
        assert_eq!(out[89].cpu, 89.0);
    }
}
