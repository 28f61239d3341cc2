//! Path reconstruction and the itinerary types returned by
//! [`crate::raptor::Raptor::solve`]: walks path pointers backward from a
//! destination label to the origin, merging adjacent walk segments, per
//! the reconstruction rule in the journey engine's design.

use crate::{
    live::{RouteId, StopId, VehicleId},
    raptor::{
        label::ParetoLabel,
        path::{PathPointer, WALK_SPEED_MPS},
        state::RoundState,
    },
    shared::{Timestamp, time::Duration},
};

#[derive(Debug, Clone)]
pub enum Segment {
    Walk {
        from: StopId,
        to: StopId,
        depart: Timestamp,
        arrive: Timestamp,
        distance_meters: f64,
    },
    Ride {
        from: StopId,
        to: StopId,
        route_id: RouteId,
        vehicle_id: VehicleId,
        board: Timestamp,
        alight: Timestamp,
    },
}

impl Segment {
    pub fn depart(&self) -> Timestamp {
        match self {
            Segment::Walk { depart, .. } => *depart,
            Segment::Ride { board, .. } => *board,
        }
    }

    pub fn arrive(&self) -> Timestamp {
        match self {
            Segment::Walk { arrive, .. } => *arrive,
            Segment::Ride { alight, .. } => *alight,
        }
    }
}

/// A Pareto-optimal journey: one `(arrival, legs)` label's full path from
/// origin to destination.
#[derive(Debug, Clone)]
pub struct Itinerary {
    pub origin: StopId,
    pub destination: StopId,
    pub departure: Timestamp,
    pub arrival: Timestamp,
    pub legs: u32,
    pub segments: Vec<Segment>,
}

impl Itinerary {
    pub fn journey_time(&self) -> Duration {
        self.arrival - self.departure
    }
}

pub fn reconstruct(state: &RoundState, origin: &StopId, destination: &StopId, label: ParetoLabel, label_id: u32) -> Itinerary {
    let mut reversed: Vec<Segment> = Vec::new();
    let mut stop = destination.clone();
    let mut id = label_id;

    loop {
        let Some(pointer) = state.pointers.get(&(stop.clone(), id)).cloned() else {
            break;
        };
        match pointer {
            PathPointer::Origin => break,
            PathPointer::Walk { prev_stop, prev_label, seconds } => {
                let depart = state.label_at(&prev_stop, prev_label).map(|l| l.arrival).unwrap_or(label.arrival);
                reversed.push(Segment::Walk {
                    from: prev_stop.clone(),
                    to: stop.clone(),
                    depart,
                    arrive: depart + Duration::from_seconds(seconds),
                    distance_meters: seconds as f64 * WALK_SPEED_MPS,
                });
                stop = prev_stop;
                id = prev_label;
            }
            PathPointer::Ride {
                prev_stop,
                prev_label,
                route_id,
                vehicle_id,
                board_time,
                alight_time,
            } => {
                reversed.push(Segment::Ride {
                    from: prev_stop.clone(),
                    to: stop.clone(),
                    route_id,
                    vehicle_id,
                    board: board_time,
                    alight: alight_time,
                });
                stop = prev_stop;
                id = prev_label;
            }
        }
    }

    reversed.reverse();
    let segments = merge_adjacent_walks(reversed);
    let departure = segments.first().map(Segment::depart).unwrap_or(label.arrival);

    Itinerary {
        origin: origin.clone(),
        destination: destination.clone(),
        departure,
        arrival: label.arrival,
        legs: label.legs,
        segments,
    }
}

/// Collapses consecutive walk segments into one (summed duration and
/// distance, endpoints taken from the first and last merged segment) —
/// McRAPTOR can produce an origin-walk immediately followed by a
/// transfer-scan walk when a round contributes nothing but a footpath.
fn merge_adjacent_walks(segments: Vec<Segment>) -> Vec<Segment> {
    let mut merged: Vec<Segment> = Vec::with_capacity(segments.len());
    for segment in segments {
        let can_merge = matches!((merged.last(), &segment), (Some(Segment::Walk { .. }), Segment::Walk { .. }));
        if can_merge {
            if let (Some(Segment::Walk { to, arrive, distance_meters, .. }), Segment::Walk {
                to: next_to,
                arrive: next_arrive,
                distance_meters: next_distance,
                ..
            }) = (merged.last_mut(), segment)
            {
                *to = next_to;
                *arrive = next_arrive;
                *distance_meters += next_distance;
            }
        } else {
            merged.push(segment);
        }
    }
    merged
}
