//! Live-feed fusion: components D (bus), E (tube), F (rail) each reconcile a
//! partial upstream feed against the static timetable store into a uniform
//! `Trip`; component G (the facade) assembles the cycle's trips into one
//! atomically-published [`Snapshot`].

pub mod bus;
pub mod facade;
pub mod feeds;
pub mod rail;
pub mod tube;

use std::{collections::HashMap, sync::Arc};

use crate::shared::{Timestamp, time::Time};

/// Interned identifier newtypes — cheap to clone across ingestion and
/// query-time code, matching the `Arc<str>` id idiom already used by
/// [`crate::repository::Stop::id`].
pub type StopId = Arc<str>;
pub type RouteId = Arc<str>;
pub type VehicleId = Arc<str>;
pub type LineId = Arc<str>;

/// One concrete route execution: an ordered, non-decreasing-in-time
/// sequence of (stop, arrival) pairs.
///
/// Immutable once built — a `Trip` is never mutated after being placed into
/// a [`LiveTimetable`], only replaced wholesale on the next refresh cycle.
#[derive(Debug, Clone)]
pub struct Trip {
    pub route_id: RouteId,
    pub vehicle_id: VehicleId,
    pub stops: Box<[(StopId, Timestamp)]>,
}

impl Trip {
    pub fn position_of(&self, stop_id: &str) -> Option<usize> {
        self.stops.iter().position(|(id, _)| &**id == stop_id)
    }
}

/// `routeId -> {vehicleId -> Trip}`, wholly rebuilt every refresh cycle.
pub type LiveTimetable = HashMap<RouteId, HashMap<VehicleId, Trip>>;

/// `"<serviceId>/<stopId>" -> platform`, seeded from `platforms.json` at
/// startup and then owned in-memory by the rail ingestor for the remainder
/// of the process's life (the file itself is never written back out).
pub type PlatformMap = HashMap<String, String>;

/// The unit of atomic publication: a live timetable, its platform map, and
/// the stop→serving-trips index the journey engine's route scan needs,
/// computed once per snapshot rather than once per query.
#[derive(Debug, Default, Clone)]
pub struct Snapshot {
    pub timetable: LiveTimetable,
    pub platforms: PlatformMap,
    stop_index: HashMap<StopId, Vec<(RouteId, VehicleId)>>,
}

impl Snapshot {
    pub fn build(timetable: LiveTimetable, platforms: PlatformMap) -> Self {
        let mut stop_index: HashMap<StopId, Vec<(RouteId, VehicleId)>> = HashMap::new();
        for (route_id, vehicles) in &timetable {
            for (vehicle_id, trip) in vehicles {
                for (stop_id, _) in trip.stops.iter() {
                    stop_index
                        .entry(stop_id.clone())
                        .or_default()
                        .push((route_id.clone(), vehicle_id.clone()));
                }
            }
        }
        Self {
            timetable,
            platforms,
            stop_index,
        }
    }

    /// `(route, vehicle)` pairs whose trip calls at `stop_id`, used by the
    /// journey engine's route scan to find every trip serving a marked stop.
    pub fn trips_serving(&self, stop_id: &str) -> &[(RouteId, VehicleId)] {
        self.stop_index.get(stop_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn trip(&self, route_id: &str, vehicle_id: &str) -> Option<&Trip> {
        self.timetable.get(route_id)?.get(vehicle_id)
    }

    pub fn platform(&self, service_id: &str, stop_id: &str) -> Option<&str> {
        self.platforms
            .get(&format!("{service_id}/{stop_id}"))
            .map(String::as_str)
    }
}

/// Local-clock "now" expressed as minutes since midnight, the unit the bus
/// and tube ingestors schedule against.
pub(crate) fn now_as_time() -> Time {
    Time::now()
}

/// Median of a slice of deltas (minutes, possibly negative). Sorts a local
/// copy; used by the bus and tube ingestors' per-vehicle delay estimates.
pub(crate) fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}
