//! The Tube Ingestor (component E): identifies a vehicle's route and
//! scheduled interval from a partial live-arrivals feed, then predicts
//! every stop the feed didn't directly observe.

use std::collections::HashMap;

use tracing::debug;

use crate::{
    live::{RouteId, StopId, Trip, VehicleId, feeds::ArrivalRecord, median},
    repository::Repository,
    shared::Timestamp,
    timetable::{Interval, RoutePattern, TimetableStore},
};

const CANDIDATE_WINDOW_MINUTES: i64 = 120;

pub fn build_trips(
    records: &[ArrivalRecord],
    store: &TimetableStore,
    repo: &Repository,
    now: Timestamp,
) -> HashMap<RouteId, HashMap<VehicleId, Trip>> {
    let mut by_vehicle: HashMap<(&str, &str), Vec<&ArrivalRecord>> = HashMap::new();
    for record in records {
        by_vehicle
            .entry((record.line_id.as_str(), record.vehicle_id.as_str()))
            .or_default()
            .push(record);
    }

    let mut out: HashMap<RouteId, HashMap<VehicleId, Trip>> = HashMap::new();

    for ((line, vehicle), mut observations) in by_vehicle {
        observations.sort_by_key(|r| r.expected_arrival);
        let observed_ids: Vec<&str> = observations.iter().map(|r| r.naptan_id.as_str()).collect();

        let patterns: Vec<&RoutePattern> = store.patterns_for_line(line).collect();
        let destination_matches: Vec<&RoutePattern> = patterns
            .iter()
            .copied()
            .filter(|pattern| {
                let first_word = observations[0].destination_name.split_whitespace().next().unwrap_or("").to_lowercase();
                !first_word.is_empty() && repo.name(&pattern.end_stop).to_lowercase().starts_with(&first_word)
            })
            .collect();

        let candidates: Vec<&RoutePattern> = if !destination_matches.is_empty() {
            destination_matches
        } else {
            patterns
                .into_iter()
                .filter(|pattern| pattern.intervals.iter().any(|interval| is_subsequence(&observed_ids, interval)))
                .collect()
        };

        let trip = if let [pattern] = candidates.as_slice() {
            resolve_trip(line, vehicle, &observations, pattern, now).unwrap_or_else(|| raw_trip(line, vehicle, &observations))
        } else {
            debug!(line, vehicle, candidates = candidates.len(), "tube vehicle did not resolve to exactly one route");
            raw_trip(line, vehicle, &observations)
        };

        out.entry(line.into()).or_default().insert(vehicle.into(), trip);
    }

    out
}

fn is_subsequence(observed: &[&str], interval: &Interval) -> bool {
    let mut cursor = 0usize;
    for (stop_id, _) in interval.stops.iter() {
        if cursor < observed.len() && stop_id.as_ref() == observed[cursor] {
            cursor += 1;
        }
    }
    cursor == observed.len()
}

fn raw_trip(line: &str, vehicle: &str, observations: &[&ArrivalRecord]) -> Trip {
    let stops: Box<[(StopId, Timestamp)]> = observations
        .iter()
        .map(|obs| (obs.naptan_id.as_str().into(), Timestamp::from_unix(obs.expected_arrival.timestamp())))
        .collect();
    Trip {
        route_id: line.into(),
        vehicle_id: vehicle.into(),
        stops,
    }
}

fn resolve_trip(line: &str, vehicle: &str, observations: &[&ArrivalRecord], pattern: &RoutePattern, now: Timestamp) -> Option<Trip> {
    let window_start_minutes = now.minutes_since_midnight() - CANDIDATE_WINDOW_MINUTES;
    let today = now.weekday();
    let candidate_intervals: Vec<(&Interval, u32)> = pattern
        .starts_on(today)
        .filter(|(_, minutes)| {
            let minutes = *minutes as i64;
            minutes >= window_start_minutes.max(0) && minutes <= now.minutes_since_midnight()
        })
        .collect();

    if candidate_intervals.is_empty() || candidate_intervals.len() > 5 {
        return None;
    }

    let observed_ids: Vec<&str> = observations.iter().map(|obs| obs.naptan_id.as_str()).collect();

    let per_candidate: Vec<HashMap<StopId, Timestamp>> = candidate_intervals
        .iter()
        .filter_map(|(interval, _)| predict_against_interval(observations, &observed_ids, interval))
        .collect();
    if per_candidate.is_empty() {
        return None;
    }

    let mut stop_order: Vec<StopId> = Vec::new();
    let mut seen = std::collections::HashSet::new();
    for candidate in &per_candidate {
        for stop_id in candidate.keys() {
            if seen.insert(stop_id.clone()) {
                stop_order.push(stop_id.clone());
            }
        }
    }

    let mut stops: Vec<(StopId, Timestamp)> = stop_order
        .into_iter()
        .map(|stop_id| {
            let times: Vec<f64> = per_candidate
                .iter()
                .filter_map(|candidate| candidate.get(&stop_id))
                .map(|t| t.as_unix() as f64)
                .collect();
            let time = Timestamp::from_unix(median(&times).round() as i64);
            (stop_id, time)
        })
        .collect();
    stops.sort_by_key(|(_, time)| *time);

    Some(Trip {
        route_id: line.into(),
        vehicle_id: vehicle.into(),
        stops: stops.into_boxed_slice(),
    })
}

/// Single-candidate-interval prediction (spec step 3a), reused once per
/// candidate interval when there are multiple.
fn predict_against_interval(observations: &[&ArrivalRecord], observed_ids: &[&str], interval: &Interval) -> Option<HashMap<StopId, Timestamp>> {
    let first_position = observed_ids.iter().filter_map(|id| interval.position_of(id)).min()?;
    let (first_stop_id, first_offset) = &interval.stops[first_position];
    let first_time = observations
        .iter()
        .find(|obs| obs.naptan_id == **first_stop_id)
        .map(|obs| Timestamp::from_unix(obs.expected_arrival.timestamp()))?;

    let observed: HashMap<&str, Timestamp> = observations
        .iter()
        .filter(|obs| interval.offset_of(&obs.naptan_id).is_some())
        .map(|obs| (obs.naptan_id.as_str(), Timestamp::from_unix(obs.expected_arrival.timestamp())))
        .collect();

    let mut deltas = Vec::new();
    for (stop_id, offset) in interval.stops.iter() {
        if *offset <= *first_offset {
            continue;
        }
        if let Some(&actual) = observed.get(stop_id.as_ref()) {
            let expected = first_time.as_unix() + (offset - first_offset) as i64 * 60;
            deltas.push((actual.as_unix() - expected) as f64 / 60.0);
        }
    }
    let median_delay_min = if deltas.len() < 2 { 0.5 } else { median(&deltas) };

    let mut result = HashMap::new();
    result.insert(first_stop_id.clone(), first_time);
    for (stop_id, offset) in interval.stops.iter() {
        if *offset <= *first_offset {
            continue;
        }
        let time = if let Some(&actual) = observed.get(stop_id.as_ref()) {
            actual
        } else {
            Timestamp::from_unix(
                first_time.as_unix() + (offset - first_offset) as i64 * 60 + (median_delay_min * 60.0) as i64,
            )
        };
        result.insert(stop_id.clone(), time);
    }
    Some(result)
}
