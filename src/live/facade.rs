//! The Timetable Facade (component G): once bus, tube, and rail have each
//! produced this cycle's trips, assembles them into one published
//! [`Snapshot`].

use crate::live::{LiveTimetable, PlatformMap, RouteId, Snapshot, Trip, VehicleId};
use std::collections::HashMap;

/// Merges the per-ingestor outputs into one `{route -> {vehicle -> trip}}`
/// map. The three ingestors write disjoint route namespaces (bus line ids,
/// tube line ids, `operator/destCRS` synthetic rail ids), so merging is a
/// plain union — no route id ever appears in more than one ingestor's output.
pub fn assemble(
    bus: HashMap<RouteId, HashMap<VehicleId, Trip>>,
    tube: HashMap<RouteId, HashMap<VehicleId, Trip>>,
    rail: HashMap<RouteId, HashMap<VehicleId, Trip>>,
    seed_platforms: PlatformMap,
    rail_platforms: PlatformMap,
) -> Snapshot {
    let mut timetable: LiveTimetable = HashMap::with_capacity(bus.len() + tube.len() + rail.len());
    timetable.extend(bus);
    timetable.extend(tube);
    timetable.extend(rail);

    let mut platforms = seed_platforms;
    platforms.extend(rail_platforms);

    Snapshot::build(timetable, platforms)
}
