use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc, Weekday};
use concourse::live::feeds::ArrivalRecord;
use concourse::live::tube::build_trips;
use concourse::repository::{Repository, Stop};
use concourse::shared::geo::Coordinate;
use concourse::shared::{Mode, Timestamp};
use concourse::timetable::{Interval, RoutePattern, TimetableStore};

fn at(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).expect("valid unix timestamp")
}

fn interval(id: &str, stops: &[(&str, u32)]) -> Interval {
    Interval { id: id.into(), stops: stops.iter().map(|(s, o)| (Arc::<str>::from(*s), *o)).collect() }
}

fn weekday_key(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "mon",
        Weekday::Tue => "tue",
        Weekday::Wed => "wed",
        Weekday::Thu => "thu",
        Weekday::Fri => "fri",
        Weekday::Sat => "sat",
        Weekday::Sun => "sun",
    }
}

/// One schedule entry, within the tube ingestor's lookback window, for
/// "today" in local time — so these tests are immune to whatever day and
/// time they happen to run on.
fn schedule_today_for(interval_ids: &[&str]) -> HashMap<String, Vec<(Arc<str>, u32)>> {
    let now = Timestamp::now();
    let minutes = now.minutes_since_midnight() as u32;
    let entries = interval_ids.iter().map(|id| (Arc::<str>::from(*id), minutes)).collect();
    let mut schedules = HashMap::new();
    schedules.insert(weekday_key(now.weekday()).to_string(), entries);
    schedules
}

fn pattern(line: &str, end_stop: &str, intervals: Vec<Interval>, interval_ids: &[&str]) -> RoutePattern {
    RoutePattern {
        line: line.into(),
        direction: "outbound".into(),
        route_code: "rc".into(),
        start_stop: "start".into(),
        end_stop: end_stop.into(),
        intervals,
        schedules: schedule_today_for(interval_ids),
    }
}

fn record(line: &str, vehicle: &str, naptan: &str, destination: &str, secs: i64) -> ArrivalRecord {
    ArrivalRecord {
        line_id: line.to_string(),
        vehicle_id: vehicle.to_string(),
        naptan_id: naptan.to_string(),
        direction: "outbound".to_string(),
        destination_name: destination.to_string(),
        expected_arrival: at(secs),
    }
}

fn stop(index: u32, id: &str, name: &str) -> Stop {
    Stop { index, id: id.into(), name: name.into(), normalized_name: name.to_lowercase().into(), coordinate: Coordinate::default(), mode: Mode::Tube }
}

const T0: i64 = 1_700_000_000;

#[test]
fn destination_prefix_match_picks_route() {
    let repo = Repository::from_stops(vec![stop(0, "victoria", "Victoria Station")]);
    let store = TimetableStore::from_patterns(vec![pattern(
        "central",
        "victoria",
        vec![interval("i1", &[("v1stop", 0), ("mid", 5), ("victoria", 10)])],
        &["i1"],
    )]);
    let records = vec![record("central", "veh1", "v1stop", "Victoria", T0)];

    let trips = build_trips(&records, &store, &repo, Timestamp::from_unix(T0));
    let trip = &trips["central"]["veh1"];

    assert_eq!(trip.stops.len(), 3);
    assert_eq!(&*trip.stops.last().unwrap().0, "victoria");
}

#[test]
fn subsequence_fallback_selects_matching_pattern() {
    let repo = Repository::from_stops(vec![]);
    let store = TimetableStore::from_patterns(vec![
        pattern("central", "d_end", vec![interval("j1", &[("D", 0), ("E", 5), ("F", 10)])], &["j1"]),
        pattern("central", "c_end", vec![interval("i1", &[("A", 0), ("B", 5), ("C", 10)])], &["i1"]),
    ]);
    let records = vec![record("central", "veh1", "A", "Nonexistent Place", T0), record("central", "veh1", "C", "Nonexistent Place", T0 + 660)];

    let trips = build_trips(&records, &store, &repo, Timestamp::from_unix(T0));
    let trip = &trips["central"]["veh1"];

    let ids: Vec<&str> = trip.stops.iter().map(|(id, _)| id.as_ref()).collect();
    assert_eq!(ids, vec!["A", "B", "C"]);
}

#[test]
fn single_candidate_predicts_monotonic_stops() {
    let repo = Repository::from_stops(vec![stop(0, "d_stop", "Destination Station")]);
    let store = TimetableStore::from_patterns(vec![pattern(
        "central",
        "d_stop",
        vec![interval("i1", &[("A", 0), ("B", 5), ("C", 10), ("D", 15)])],
        &["i1"],
    )]);
    let records = vec![record("central", "veh1", "A", "Destination", T0)];

    let trips = build_trips(&records, &store, &repo, Timestamp::from_unix(T0));
    let trip = &trips["central"]["veh1"];

    for pair in trip.stops.windows(2) {
        assert!(pair[0].1 <= pair[1].1);
    }
}

#[test]
fn multi_candidate_prediction_is_median_of_schedule_window_candidates() {
    let repo = Repository::from_stops(vec![stop(0, "c_end", "C End Station")]);
    let store = TimetableStore::from_patterns(vec![pattern(
        "central",
        "c_end",
        vec![
            interval("a", &[("A", 0), ("B", 5), ("C", 10)]),
            interval("b", &[("A", 0), ("B", 5), ("C", 12)]),
        ],
        &["a", "b"],
    )]);
    let records = vec![record("central", "veh1", "A", "C End", T0), record("central", "veh1", "B", "C End", T0 + 360)];

    let trips = build_trips(&records, &store, &repo, Timestamp::from_unix(T0));
    let trip = &trips["central"]["veh1"];
    let times: HashMap<&str, i64> = trip.stops.iter().map(|(id, t)| (id.as_ref(), t.as_unix())).collect();

    assert_eq!(times["C"], T0 + 690);
}

#[test]
fn unresolved_vehicle_falls_back_to_raw_observations() {
    let repo = Repository::from_stops(vec![]);
    let store = TimetableStore::from_patterns(vec![]);
    let records = vec![record("central", "veh1", "A", "Nowhere", T0), record("central", "veh1", "B", "Nowhere", T0 + 300)];

    let trips = build_trips(&records, &store, &repo, Timestamp::from_unix(T0));
    let trip = &trips["central"]["veh1"];

    let stops: Vec<(&str, i64)> = trip.stops.iter().map(|(id, t)| (id.as_ref(), t.as_unix())).collect();
    assert_eq!(stops, vec![("A", T0), ("B", T0 + 300)]);
}
