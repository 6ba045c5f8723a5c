// SampleStore tests: capacity eviction, recent ordering/filtering, pruning

mod common;

use common::{now_ms, sample};
use hostpulse::models::{HostSelector, RawSample};
use hostpulse::sample_store::SampleStore;
use serde_json::json;

fn cpu_of(s: &RawSample) -> f64 {
    s.cpu_usage.as_ref().and_then(|v| v.as_f64()).unwrap()
}

#[test]
fn extend_evicts_oldest_beyond_capacity() {
    let store = SampleStore::new(3);
    let appended = store.extend((0..5).map(|i| sample(i, "A", i as f64, 0.0)));
    assert_eq!(appended, 5);
    assert_eq!(store.len(), 3);
    let cpus: Vec<f64> = store.snapshot().iter().map(cpu_of).collect();
    assert_eq!(cpus, vec![2.0, 3.0, 4.0]);
}

#[test]
fn recent_is_newest_first_and_filtered() {
    let store = SampleStore::new(100);
    let t = now_ms();
    store.push(sample(t - 3000, "A", 1.0, 0.0));
    store.push(sample(t - 1000, "B", 2.0, 0.0));
    store.push(sample(t - 2000, "A", 3.0, 0.0));
    store.push(serde_json::from_value(json!({"timestamp": "garbage", "host": "A", "cpu_usage": 4})).unwrap());
    store.push(sample(t, "A", 5.0, 0.0));

    let all: Vec<f64> = store.recent(&HostSelector::All, 10).iter().map(cpu_of).collect();
    assert_eq!(all, vec![5.0, 2.0, 3.0, 1.0, 4.0]);

    let only_a: Vec<f64> = store
        .recent(&HostSelector::parse("A"), 2)
        .iter()
        .map(cpu_of)
        .collect();
    assert_eq!(only_a, vec![5.0, 3.0]);
}

#[test]
fn prune_drops_old_and_unresolvable_samples() {
    let store = SampleStore::new(100);
    let t = now_ms();
    store.push(sample(t - 10_000, "A", 1.0, 0.0));
    store.push(sample(t, "A", 2.0, 0.0));
    store.push(RawSample::default());

    let pruned = store.prune_older_than(t - 5_000);
    assert_eq!(pruned, 2);
    assert_eq!(store.len(), 1);
    assert_eq!(cpu_of(&store.snapshot()[0]), 2.0);
}

#[test]
fn empty_store() {
    let store = SampleStore::new(0);
    assert!(store.is_empty());
    assert_eq!(store.capacity(), 1);
    assert!(store.recent(&HostSelector::All, 10).is_empty());
}
