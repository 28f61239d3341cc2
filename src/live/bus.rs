//! The Bus Ingestor (component D): fuses live bus arrivals with static
//! intervals, extrapolates unobserved stops per vehicle, and schedules
//! future trips ahead of the live window.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::{
    live::{RouteId, Trip, VehicleId, feeds::ArrivalRecord, median},
    shared::Timestamp,
    timetable::TimetableStore,
};

/// Builds this cycle's bus trips from a raw arrivals snapshot and the
/// static bus timetable. A vehicle that can't be matched to exactly one
/// route pattern, or that has a malformed/missing interval entry, is
/// skipped — it never corrupts any other vehicle's trip.
pub fn build_trips(records: &[ArrivalRecord], store: &TimetableStore, now: Timestamp) -> HashMap<RouteId, HashMap<VehicleId, Trip>> {
    let mut by_vehicle: HashMap<(&str, &str), Vec<&ArrivalRecord>> = HashMap::new();
    for record in records {
        by_vehicle
            .entry((record.line_id.as_str(), record.vehicle_id.as_str()))
            .or_default()
            .push(record);
    }

    let mut out: HashMap<RouteId, HashMap<VehicleId, Trip>> = HashMap::new();
    let mut latest_by_line: HashMap<&str, Timestamp> = HashMap::new();

    for ((line, _vehicle), observations) in &by_vehicle {
        let latest = observations.iter().map(|r| Timestamp::from_unix(r.expected_arrival.timestamp())).max();
        if let Some(latest) = latest {
            latest_by_line
                .entry(line)
                .and_modify(|existing| *existing = (*existing).max(latest))
                .or_insert(latest);
        }
    }

    for ((line, vehicle), mut observations) in by_vehicle {
        observations.sort_by_key(|r| r.expected_arrival);
        let Some(direction) = observations.first().map(|r| r.direction.as_str()) else {
            continue;
        };

        let candidates: Vec<_> = store.patterns_for(line, direction).collect();
        let [pattern] = candidates.as_slice() else {
            debug!(line, vehicle, candidates = candidates.len(), "bus vehicle did not resolve to exactly one route pattern");
            continue;
        };

        let Some(trip) = build_vehicle_trip(line, vehicle, &observations, pattern, now) else {
            warn!(line, vehicle, "skipping bus vehicle: no usable interval match");
            continue;
        };

        out.entry(line.into()).or_default().insert(vehicle.into(), trip);
    }

    for pattern in store_line_patterns(store, &latest_by_line) {
        synthesize_future_trips(pattern, &latest_by_line, now, &mut out);
    }

    out
}

fn store_line_patterns<'a>(
    store: &'a TimetableStore,
    latest_by_line: &HashMap<&str, Timestamp>,
) -> Vec<&'a crate::timetable::RoutePattern> {
    latest_by_line.keys().flat_map(|line| store.patterns_for_line(line)).collect()
}

fn build_vehicle_trip(
    line: &str,
    vehicle: &str,
    observations: &[&ArrivalRecord],
    pattern: &crate::timetable::RoutePattern,
    _now: Timestamp,
) -> Option<Trip> {
    let interval = pattern
        .intervals
        .iter()
        .find(|interval| observations.iter().any(|obs| interval.offset_of(&obs.naptan_id).is_some()))?;

    let first = observations.iter().find(|obs| interval.offset_of(&obs.naptan_id).is_some())?;
    let first_offset = interval.offset_of(&first.naptan_id)?;
    let first_time = Timestamp::from_unix(first.expected_arrival.timestamp());

    let observed: HashMap<&str, Timestamp> = observations
        .iter()
        .filter_map(|obs| interval.offset_of(&obs.naptan_id).map(|_| (obs.naptan_id.as_str(), Timestamp::from_unix(obs.expected_arrival.timestamp()))))
        .collect();

    let mut deltas = Vec::new();
    let mut last_actual = first_time;
    let mut last_offset = first_offset;
    for (stop_id, offset) in interval.stops.iter() {
        if *offset <= first_offset {
            continue;
        }
        if let Some(&actual) = observed.get(stop_id.as_ref()) {
            let expected = last_actual.as_unix() + (offset - last_offset) as i64 * 60;
            deltas.push((actual.as_unix() - expected) as f64 / 60.0);
            last_actual = actual;
            last_offset = *offset;
        }
    }
    if deltas.is_empty() {
        return None;
    }
    let median_delay_min = median(&deltas).max(0.0);

    let mut stops = Vec::with_capacity(interval.stops.len());
    stops.push((first.naptan_id.as_str().into(), first_time));
    last_actual = first_time;
    last_offset = first_offset;
    for (stop_id, offset) in interval.stops.iter() {
        if *offset <= first_offset {
            continue;
        }
        let time = if let Some(&actual) = observed.get(stop_id.as_ref()) {
            last_actual = actual;
            last_offset = *offset;
            actual
        } else {
            let predicted = Timestamp::from_unix(
                last_actual.as_unix() + (offset - last_offset) as i64 * 60 + (median_delay_min * 60.0) as i64,
            );
            last_actual = predicted;
            last_offset = *offset;
            predicted
        };
        stops.push((stop_id.clone(), time));
    }

    Some(Trip {
        route_id: line.into(),
        vehicle_id: vehicle.into(),
        stops: stops.into_boxed_slice(),
    })
}

fn synthesize_future_trips(
    pattern: &crate::timetable::RoutePattern,
    latest_by_line: &HashMap<&str, Timestamp>,
    now: Timestamp,
    out: &mut HashMap<RouteId, HashMap<VehicleId, Trip>>,
) {
    let Some(&latest) = latest_by_line.get(pattern.line.as_ref()) else {
        return;
    };
    let today = now.weekday();
    for (interval, start_minutes) in pattern.starts_on(today) {
        let start = Timestamp::from_unix(midnight(now) + start_minutes as i64 * 60);
        if (start.as_unix() - latest.as_unix()) <= 5 * 60 {
            continue;
        }
        let vehicle_id: VehicleId = format!("T{}", start.as_unix()).into();
        let stops: Box<[(crate::live::StopId, Timestamp)]> = interval
            .stops
            .iter()
            .map(|(stop_id, offset)| (stop_id.clone(), Timestamp::from_unix(start.as_unix() + *offset as i64 * 60)))
            .collect();
        let trip = Trip {
            route_id: pattern.line.clone(),
            vehicle_id: vehicle_id.clone(),
            stops,
        };
        out.entry(pattern.line.clone()).or_default().insert(vehicle_id, trip);
    }
}

fn midnight(now: Timestamp) -> i64 {
    now.as_unix() - now.minutes_since_midnight() * 60
}
