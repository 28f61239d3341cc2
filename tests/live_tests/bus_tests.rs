use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use concourse::live::bus::build_trips;
use concourse::live::feeds::ArrivalRecord;
use concourse::shared::Timestamp;
use concourse::timetable::{Interval, RoutePattern, TimetableStore};

const T0: i64 = 1_700_000_000;

fn at(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).expect("valid unix timestamp")
}

fn interval(id: &str, stops: &[(&str, u32)]) -> Interval {
    Interval { id: id.into(), stops: stops.iter().map(|(s, o)| (Arc::<str>::from(*s), *o)).collect() }
}

fn pattern(line: &str, direction: &str, intervals: Vec<Interval>) -> RoutePattern {
    RoutePattern {
        line: line.into(),
        direction: direction.into(),
        route_code: "rc".into(),
        start_stop: "start".into(),
        end_stop: "end".into(),
        intervals,
        schedules: HashMap::new(),
    }
}

fn record(line: &str, vehicle: &str, naptan: &str, direction: &str, secs: i64) -> ArrivalRecord {
    ArrivalRecord {
        line_id: line.to_string(),
        vehicle_id: vehicle.to_string(),
        naptan_id: naptan.to_string(),
        direction: direction.to_string(),
        destination_name: "Destination".to_string(),
        expected_arrival: at(secs),
    }
}

#[test]
fn extrapolates_unobserved_stops_with_median_delay() {
    let store = TimetableStore::from_patterns(vec![pattern(
        "94",
        "outbound",
        vec![interval("i1", &[("A", 0), ("B", 5), ("C", 10), ("D", 15)])],
    )]);
    let records = vec![
        record("94", "v1", "A", "outbound", T0),
        record("94", "v1", "C", "outbound", T0 + 11 * 60),
    ];

    let trips = build_trips(&records, &store, Timestamp::from_unix(T0));
    let trip = &trips["94"]["v1"];

    let times: HashMap<&str, i64> = trip.stops.iter().map(|(id, t)| (id.as_ref(), t.as_unix())).collect();
    assert_eq!(times["A"], T0);
    assert_eq!(times["B"], T0 + 360);
    assert_eq!(times["C"], T0 + 11 * 60);
    assert_eq!(times["D"], T0 + 1020);
}

#[test]
fn is_deterministic_given_identical_input() {
    let store = TimetableStore::from_patterns(vec![pattern("94", "outbound", vec![interval("i1", &[("A", 0), ("B", 5), ("C", 10)])])]);
    let records = vec![record("94", "v1", "A", "outbound", T0), record("94", "v1", "C", "outbound", T0 + 600)];

    let first = build_trips(&records, &store, Timestamp::from_unix(T0));
    let second = build_trips(&records, &store, Timestamp::from_unix(T0));

    let first_times: Vec<i64> = first["94"]["v1"].stops.iter().map(|(_, t)| t.as_unix()).collect();
    let second_times: Vec<i64> = second["94"]["v1"].stops.iter().map(|(_, t)| t.as_unix()).collect();
    assert_eq!(first_times, second_times);
}

#[test]
fn negative_delay_clamps_to_zero() {
    let store = TimetableStore::from_patterns(vec![pattern("94", "outbound", vec![interval("i1", &[("A", 0), ("B", 5), ("C", 10)])])]);
    let records = vec![
        record("94", "v1", "A", "outbound", T0),
        record("94", "v1", "B", "outbound", T0 + 4 * 60),
    ];

    let trips = build_trips(&records, &store, Timestamp::from_unix(T0));
    let trip = &trips["94"]["v1"];
    let times: HashMap<&str, i64> = trip.stops.iter().map(|(id, t)| (id.as_ref(), t.as_unix())).collect();

    assert_eq!(times["B"], T0 + 240);
    assert_eq!(times["C"], T0 + 240 + 300);
}

#[test]
fn vehicle_with_no_interval_match_is_skipped() {
    let store = TimetableStore::from_patterns(vec![pattern("94", "outbound", vec![interval("i1", &[("Z", 0), ("W", 5)])])]);
    let records = vec![record("94", "v1", "A", "outbound", T0), record("94", "v1", "B", "outbound", T0 + 300)];

    let trips = build_trips(&records, &store, Timestamp::from_unix(T0));
    assert!(trips.get("94").and_then(|vehicles| vehicles.get("v1")).is_none());
}

#[test]
fn build_trips_skips_unmatched_vehicle_without_affecting_others() {
    let store = TimetableStore::from_patterns(vec![pattern("94", "outbound", vec![interval("i1", &[("A", 0), ("B", 5)])])]);
    let records = vec![
        record("94", "good", "A", "outbound", T0),
        record("94", "good", "B", "outbound", T0 + 300),
        record("94", "bad", "Z", "outbound", T0),
        record("94", "bad", "W", "outbound", T0 + 300),
    ];

    let trips = build_trips(&records, &store, Timestamp::from_unix(T0));
    assert!(trips["94"].contains_key("good"));
    assert!(!trips["94"].contains_key("bad"));
}
