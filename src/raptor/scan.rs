//! Round bodies for the Journey Engine: the route scan (one additional
//! transit leg) and the transfer scan (walking, leg-neutral). Each scan
//! computes its candidate insertions in parallel and applies them to the
//! shared [`RoundState`] sequentially, mirroring the teacher's
//! collect-then-apply update-buffer pattern.

use std::collections::{HashSet, HashMap};

use rayon::prelude::*;

use crate::{
    live::{RouteId, Snapshot, StopId, Trip, VehicleId},
    raptor::{label::ParetoLabel, path::PathPointer, state::RoundState},
    shared::{Timestamp, time::Duration},
    walking::WalkingGraph,
};

struct Candidate {
    stop: StopId,
    label: ParetoLabel,
    pointer: PathPointer,
}

/// Collects every `(route, vehicle)` pair serving a stop marked going into
/// this round, finds each trip's earliest boardable index against the
/// `legs == round - 1` labels, and proposes a round-`round` label at every
/// stop reached afterwards. Returns the set of stops whose label actually
/// improved, which seeds this round's transfer scan.
pub(crate) fn route_scan(snapshot: &Snapshot, state: &mut RoundState, marked: &HashSet<StopId>, round: u32) -> HashSet<StopId> {
    let mut trips: HashSet<(RouteId, VehicleId)> = HashSet::new();
    for stop in marked {
        trips.extend(snapshot.trips_serving(stop).iter().cloned());
    }

    let candidates: Vec<Candidate> = trips
        .into_par_iter()
        .filter_map(|(route_id, vehicle_id)| snapshot.trip(&route_id, &vehicle_id).map(|trip| (route_id, vehicle_id, trip)))
        .flat_map_iter(|(route_id, vehicle_id, trip)| board_trip(state, trip, round).into_iter().map(move |candidate| attach_ride(&route_id, &vehicle_id, candidate)))
        .collect();

    apply(state, candidates)
}

fn attach_ride(route_id: &RouteId, vehicle_id: &VehicleId, raw: RawRideCandidate) -> Candidate {
    Candidate {
        stop: raw.stop,
        label: raw.label,
        pointer: PathPointer::Ride {
            prev_stop: raw.board_stop,
            prev_label: raw.board_label,
            route_id: route_id.clone(),
            vehicle_id: vehicle_id.clone(),
            board_time: raw.board_time,
            alight_time: raw.alight_time,
        },
    }
}

struct RawRideCandidate {
    stop: StopId,
    label: ParetoLabel,
    board_stop: StopId,
    board_label: u32,
    board_time: Timestamp,
    alight_time: Timestamp,
}

/// Scans one trip's stop sequence for its earliest boardable index, then
/// every stop reached after it.
fn board_trip(state: &RoundState, trip: &Trip, round: u32) -> Vec<RawRideCandidate> {
    let mut board: Option<(usize, Timestamp, u32)> = None;
    let mut out = Vec::new();

    for (index, (stop_id, time)) in trip.stops.iter().enumerate() {
        if board.is_none() {
            let usable = state
                .labels_at(stop_id, round - 1)
                .into_iter()
                .filter(|(label, _)| label.arrival <= *time)
                .min_by_key(|(label, _)| label.arrival);
            if let Some((_, id)) = usable {
                board = Some((index, *time, id));
            }
            continue;
        }

        let (board_index, board_time, board_label) = board.unwrap();
        let board_stop = trip.stops[board_index].0.clone();
        out.push(RawRideCandidate {
            stop: stop_id.clone(),
            label: ParetoLabel::new(*time, round),
            board_stop,
            board_label,
            board_time,
            alight_time: *time,
        });
    }

    out
}

/// For every stop touched by this round's route scan, relaxes every
/// walking edge from its best round-`round` label. Leg-neutral: the
/// resulting label stays at `round` legs, seeding the *next* round's route
/// scan per the walking leg-neutrality invariant.
pub(crate) fn transfer_scan(walking: &WalkingGraph, max_walk: Duration, state: &mut RoundState, vehicle_marked: &HashSet<StopId>, round: u32) -> HashSet<StopId> {
    let best: HashMap<StopId, (ParetoLabel, u32)> = vehicle_marked
        .iter()
        .filter_map(|stop| state.best_at(stop, round).map(|entry| (stop.clone(), entry)))
        .collect();

    let candidates: Vec<Candidate> = best
        .par_iter()
        .flat_map_iter(|(stop, (label, id))| {
            walking.neighbors(stop, max_walk).into_iter().map(move |(neighbor, duration)| Candidate {
                stop: neighbor,
                label: ParetoLabel::new(label.arrival + duration, round),
                pointer: PathPointer::Walk {
                    prev_stop: stop.clone(),
                    prev_label: *id,
                    seconds: duration.as_seconds(),
                },
            })
        })
        .collect();

    let walked = apply(state, candidates);
    vehicle_marked.union(&walked).cloned().collect()
}

fn apply(state: &mut RoundState, candidates: Vec<Candidate>) -> HashSet<StopId> {
    let mut marked = HashSet::new();
    for candidate in candidates {
        if state.insert(&candidate.stop, candidate.label, candidate.pointer).is_some() {
            marked.insert(candidate.stop);
        }
    }
    marked
}
