// In-memory sample store: bounded FIFO of raw samples as received.
// Raw records are kept untouched; the chart engine validates them on every read.

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::chart::normalize::resolve_timestamp;
use crate::models::{HostSelector, RawSample};

pub struct SampleStore {
    samples: Mutex<VecDeque<RawSample>>,
    capacity: usize,
}

impl SampleStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: Mutex::new(VecDeque::with_capacity(capacity.min(4096))),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn push(&self, sample: RawSample) {
        self.extend(std::iter::once(sample));
    }

    /// Append samples, evicting the oldest beyond capacity. Returns how many were appended.
    pub fn extend(&self, samples: impl IntoIterator<Item = RawSample>) -> usize {
        let mut guard = self.lock();
        let mut n = 0;
        for s in samples {
            if guard.len() == self.capacity {
                guard.pop_front();
            }
            guard.push_back(s);
            n += 1;
        }
        n
    }

    /// Copy of every stored sample in insertion order.
    pub fn snapshot(&self) -> Vec<RawSample> {
        self.lock().iter().cloned().collect()
    }

    /// Up to `limit` samples for `selector`, newest first. Unparsable timestamps sort last.
    pub fn recent(&self, selector: &HostSelector, limit: usize) -> Vec<RawSample> {
        let mut matching: Vec<(Option<i64>, RawSample)> = self
            .lock()
            .iter()
            .filter(|s| selector.matches(s.host_name()))
            .map(|s| (s.timestamp.as_ref().and_then(resolve_timestamp), s.clone()))
            .collect();
        // None sorts lowest, so after reversing unparsable samples come last
        // and ties list the later insertion first.
        matching.sort_by_key(|(ts, _)| *ts);
        matching.reverse();
        matching.into_iter().take(limit).map(|(_, s)| s).collect()
    }

    /// Drop samples older than `cutoff_ms` or whose timestamp does not resolve.
    pub fn prune_older_than(&self, cutoff_ms: i64) -> usize {
        let mut guard = self.lock();
        let before = guard.len();
        guard.retain(|s| {
            s.timestamp
                .as_ref()
                .and_then(resolve_timestamp)
                .is_some_and(|ts| ts >= cutoff_ms)
        });
        before - guard.len()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<RawSample>> {
        // Poison is ignored: every mutation above completes in one step.
        self.samples.lock().unwrap_or_else(|e| e.into_inner())
    }
}
