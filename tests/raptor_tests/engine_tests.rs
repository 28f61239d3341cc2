use std::collections::HashMap;

use concourse::live::{Snapshot, Trip};
use concourse::raptor::{Error, Raptor};
use concourse::shared::Timestamp;
use concourse::walking::WalkingGraph;

fn ts(secs: i64) -> Timestamp {
    Timestamp::from_unix(secs)
}

fn trip(route: &str, vehicle: &str, stops: &[(&str, i64)]) -> (String, (String, Trip)) {
    let stops = stops.iter().map(|(id, secs)| ((*id).into(), ts(*secs))).collect();
    (
        route.to_string(),
        (
            vehicle.to_string(),
            Trip { route_id: route.into(), vehicle_id: vehicle.into(), stops },
        ),
    )
}

fn snapshot_of(trips: Vec<(&str, &str, &[(&str, i64)])>) -> Snapshot {
    let mut timetable: HashMap<_, HashMap<_, _>> = HashMap::new();
    for (route, vehicle, stops) in trips {
        let (route, (vehicle, trip)) = trip(route, vehicle, stops);
        timetable.entry(route.into()).or_default().insert(vehicle.into(), trip);
    }
    Snapshot::build(timetable, HashMap::new())
}

#[test]
fn same_origin_and_destination_yields_empty_path() {
    let snapshot = Snapshot::default();
    let walking = WalkingGraph::default();
    let itineraries = Raptor::new(&snapshot, &walking, "A".into(), "A".into())
        .departure_at(ts(0))
        .solve()
        .expect("origin == destination always succeeds");

    assert_eq!(itineraries.len(), 1);
    assert_eq!(itineraries[0].legs, 0);
    assert!(itineraries[0].segments.is_empty());
    assert_eq!(itineraries[0].departure, ts(0));
    assert_eq!(itineraries[0].arrival, ts(0));
}

#[test]
fn single_ride_reaches_destination() {
    let snapshot = snapshot_of(vec![("r1", "v1", &[("A", 0), ("B", 600)])]);
    let walking = WalkingGraph::default();

    let itineraries = Raptor::new(&snapshot, &walking, "A".into(), "B".into())
        .departure_at(ts(0))
        .solve()
        .expect("a single direct ride should resolve");

    assert_eq!(itineraries[0].legs, 1);
    assert_eq!(itineraries[0].arrival, ts(600));
}

#[test]
fn missing_stop_yields_no_path() {
    let snapshot = Snapshot::default();
    let walking = WalkingGraph::default();

    let err = Raptor::new(&snapshot, &walking, "A".into(), "Z".into())
        .departure_at(ts(0))
        .solve()
        .unwrap_err();

    assert_eq!(err, Error::NoPath);
}

#[test]
fn empty_origin_is_an_invalid_request() {
    let snapshot = Snapshot::default();
    let walking = WalkingGraph::default();

    let err = Raptor::new(&snapshot, &walking, "".into(), "B".into()).solve().unwrap_err();

    assert_eq!(err, Error::InvalidRequest);
}

#[test]
fn leg_count_never_exceeds_max_rounds() {
    let snapshot = snapshot_of(vec![
        ("r1", "v1", &[("A", 0), ("B", 100)]),
        ("r2", "v1", &[("B", 100), ("C", 200)]),
        ("r3", "v1", &[("C", 200), ("D", 300)]),
    ]);
    let walking = WalkingGraph::default();

    let reachable = Raptor::new(&snapshot, &walking, "A".into(), "C".into())
        .departure_at(ts(0))
        .max_rounds(2)
        .solve()
        .expect("C is reachable within 2 legs");
    assert!(reachable[0].legs <= 2);

    let unreachable = Raptor::new(&snapshot, &walking, "A".into(), "D".into())
        .departure_at(ts(0))
        .max_rounds(2)
        .solve()
        .unwrap_err();
    assert_eq!(unreachable, Error::NoPath);
}
