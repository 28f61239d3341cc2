use std::collections::HashMap;

use concourse::live::{Trip, facade};
use concourse::shared::Timestamp;

fn trip(route: &str, vehicle: &str) -> Trip {
    Trip {
        route_id: route.into(),
        vehicle_id: vehicle.into(),
        stops: vec![("A".into(), Timestamp::from_unix(0))].into_boxed_slice(),
    }
}

#[test]
fn assembles_disjoint_ingestor_outputs_into_one_snapshot() {
    let mut bus = HashMap::new();
    bus.entry("94".into()).or_insert_with(HashMap::new).insert("bv1".into(), trip("94", "bv1"));

    let mut tube = HashMap::new();
    tube.entry("central".into()).or_insert_with(HashMap::new).insert("tv1".into(), trip("central", "tv1"));

    let mut rail = HashMap::new();
    rail.entry("GW/PAD".into()).or_insert_with(HashMap::new).insert("1234567".into(), trip("GW/PAD", "1234567"));

    let snapshot = facade::assemble(bus, tube, rail, HashMap::new(), HashMap::new());

    assert!(snapshot.trip("94", "bv1").is_some());
    assert!(snapshot.trip("central", "tv1").is_some());
    assert!(snapshot.trip("GW/PAD", "1234567").is_some());
}

#[test]
fn rail_platforms_are_merged_over_the_seed_map() {
    let mut seed_platforms = HashMap::new();
    seed_platforms.insert("1234567/PAD".to_string(), "4".to_string());
    seed_platforms.insert("stale/XYZ".to_string(), "9".to_string());

    let mut rail_platforms = HashMap::new();
    rail_platforms.insert("1234567/PAD".to_string(), "12".to_string());

    let snapshot = facade::assemble(HashMap::new(), HashMap::new(), HashMap::new(), seed_platforms, rail_platforms);

    assert_eq!(snapshot.platform("1234567", "PAD"), Some("12"));
    assert_eq!(snapshot.platform("stale", "XYZ"), Some("9"));
}
