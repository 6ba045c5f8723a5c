// Model tests: raw sample aliases, serialization shape, mode/selector parsing

use hostpulse::chart::ChartError;
use hostpulse::models::*;
use serde_json::json;

#[test]
fn raw_sample_serializes_canonical_names() {
    let raw: RawSample =
        serde_json::from_value(json!({"createdAt": "2024-05-01", "host_name": "x", "memoryUsage": 3}))
            .unwrap();
    let back = serde_json::to_value(&raw).unwrap();
    assert_eq!(
        back,
        json!({"timestamp": "2024-05-01", "host": "x", "memory_usage": 3})
    );
}

#[test]
fn raw_sample_tolerates_wrong_types() {
    let raw: RawSample =
        serde_json::from_value(json!({"timestamp": [1], "host": {"a": 1}, "cpu_usage": false}))
            .unwrap();
    assert_eq!(raw.host_name(), None);
    assert_eq!(raw.latency, None);
}

#[test]
fn aggregated_point_omits_absent_latency() {
    let p = AggregatedPoint {
        label: "2024-05-01".into(),
        cpu: 1.5,
        memory: 2.25,
        latency: None,
    };
    assert_eq!(
        serde_json::to_value(&p).unwrap(),
        json!({"label": "2024-05-01", "cpu": 1.5, "memory": 2.25})
    );
}

#[test]
fn chart_mode_parses_closed_set() {
    assert_eq!("live".parse::<ChartMode>(), Ok(ChartMode::Live));
    assert_eq!("7d".parse::<ChartMode>(), Ok(ChartMode::SevenDays));
    assert_eq!("1m".parse::<ChartMode>(), Ok(ChartMode::OneMonth));
    assert_eq!(
        "1M".parse::<ChartMode>(),
        Err(ChartError::InvalidMode("1M".into()))
    );
    for mode in ChartMode::ALL {
        assert_eq!(mode.to_string().parse::<ChartMode>(), Ok(mode));
    }
}

#[test]
fn mode_configs() {
    let live = ChartMode::Live.config();
    assert_eq!(live.granularity, Granularity::Second);
    assert_eq!(live.cap, Some(60));
    assert_eq!(live.window.num_minutes(), 5);

    let week = ChartMode::SevenDays.config();
    assert_eq!(week.granularity, Granularity::Day);
    assert_eq!(week.window.num_days(), 7);
    assert_eq!(week.cap, None);

    assert_eq!(ChartMode::OneMonth.config().window.num_days(), 30);
}

#[test]
fn host_selector_sentinels() {
    assert_eq!(HostSelector::parse("all"), HostSelector::All);
    assert_eq!(HostSelector::parse(""), HostSelector::All);
    assert_eq!(HostSelector::parse("   "), HostSelector::All);
    assert_eq!(HostSelector::parse("All"), HostSelector::Host("All".into()));
    assert!(HostSelector::All.matches(None));
    assert!(!HostSelector::parse("a").matches(None));
    assert!(!HostSelector::parse("a").matches(Some("A")));
}

#[test]
fn raw_sample_prefers_first_spelling_and_skips_nulls() {
    let raw = RawSample::from_value(&json!({
        "created_at": "2024-05-10", "timestamp": 5,
        "cpu": 1, "cpu_usage": 2,
        "memory_usage": null, "mem": 7,
        "hostname": "b", "host": "a"
    }));
    assert_eq!(raw.timestamp, Some(json!(5)));
    assert_eq!(raw.cpu_usage, Some(json!(2)));
    assert_eq!(raw.memory_usage, Some(json!(7)));
    assert_eq!(raw.host_name(), Some("a"));
    assert_eq!(raw.latency, None);
}

#[test]
fn raw_sample_from_non_object_is_empty() {
    for v in [json!(null), json!(3), json!("x"), json!([1, 2]), json!(true)] {
        assert_eq!(RawSample::from_value(&v), RawSample::default());
        let parsed: RawSample = serde_json::from_value(v).unwrap();
        assert_eq!(parsed, RawSample::default());
    }
}

#[test]
fn host_selector_trims_named_hosts() {
    assert_eq!(HostSelector::parse(" web "), HostSelector::Host("web".into()));
    assert_eq!(HostSelector::parse(" all "), HostSelector::All);
    assert!(HostSelector::parse(" web ").matches(Some("web")));
}
