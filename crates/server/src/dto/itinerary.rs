//! The Query Coordinator (component J): turns one McRAPTOR [`Itinerary`]
//! into the response schema, slicing intermediate stops out of the
//! underlying trip and attaching platform/line cosmetics.

use concourse::{
    live::Snapshot,
    raptor::{Itinerary, Segment},
    repository::Repository,
    shared::{Mode, Timestamp},
};
use serde::Serialize;

use crate::dto::colors;

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentMode {
    Bus,
    Tube,
    Rail,
}

#[derive(Debug, Clone, Serialize)]
pub struct StopTimeDto {
    pub id: String,
    pub name: String,
    pub time: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SegmentDto {
    Walk {
        from: String,
        to: String,
        from_id: String,
        to_id: String,
        start_time: i64,
        end_time: i64,
        duration: u32,
        distance: f32,
        coordinates: Vec<(f32, f32)>,
    },
    Trip {
        from: String,
        to: String,
        from_id: String,
        to_id: String,
        start_time: i64,
        end_time: i64,
        duration: u32,
        distance: f32,
        coordinates: Vec<(f32, f32)>,
        route: String,
        vehicle: String,
        mode: SegmentMode,
        line_color: &'static str,
        #[serde(skip_serializing_if = "Option::is_none")]
        tube_line: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        rail_line: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        platform: Option<String>,
        stops: Vec<StopTimeDto>,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct RouteResponseDto {
    pub journey_time: u32,
    pub num_legs: u32,
    pub segments: Vec<SegmentDto>,
}

/// Resolves a ride segment's display mode from the static mode of its
/// endpoint stops, preferring `bus` over `tube`/`underground` over `rail` —
/// the same priority the reference implementation's `origin_mode`/`dest_mode`
/// chain uses, since a single route id can otherwise be ambiguous.
fn segment_mode(repository: &Repository, from_id: &str, to_id: &str) -> SegmentMode {
    let endpoints = [repository.mode(from_id), repository.mode(to_id)];
    if endpoints.contains(&Some(Mode::Bus)) {
        SegmentMode::Bus
    } else if endpoints.contains(&Some(Mode::Tube)) || endpoints.contains(&Some(Mode::Underground)) {
        SegmentMode::Tube
    } else {
        SegmentMode::Rail
    }
}

fn intermediate_stops(repository: &Repository, snapshot: &Snapshot, route_id: &str, vehicle_id: &str, from_id: &str, to_id: &str) -> Vec<StopTimeDto> {
    let Some(trip) = snapshot.trip(route_id, vehicle_id) else {
        return Vec::new();
    };
    let (Some(board), Some(alight)) = (trip.position_of(from_id), trip.position_of(to_id)) else {
        return Vec::new();
    };

    let slice: Vec<_> = if board <= alight {
        trip.stops[board..=alight].to_vec()
    } else {
        let mut reversed = trip.stops[alight..=board].to_vec();
        reversed.reverse();
        reversed
    };

    slice
        .into_iter()
        .map(|(stop_id, time)| StopTimeDto {
            id: stop_id.to_string(),
            name: repository.name(&stop_id).to_string(),
            time: time.as_unix(),
        })
        .collect()
}

fn coordinates_for(repository: &Repository, stops: &[StopTimeDto], from_id: &str, to_id: &str) -> Vec<(f32, f32)> {
    if stops.is_empty() {
        let from = repository.coordinate(from_id).unwrap_or_default();
        let to = repository.coordinate(to_id).unwrap_or_default();
        return vec![(from.latitude, from.longitude), (to.latitude, to.longitude)];
    }
    stops
        .iter()
        .map(|stop| repository.coordinate(&stop.id).unwrap_or_default())
        .map(|coordinate| (coordinate.latitude, coordinate.longitude))
        .collect()
}

fn walk_distance_meters(repository: &Repository, from_id: &str, to_id: &str) -> f32 {
    match (repository.coordinate(from_id), repository.coordinate(to_id)) {
        (Some(from), Some(to)) => from.great_circle_distance(&to).as_meters(),
        _ => 0.0,
    }
}

fn build_segment(repository: &Repository, snapshot: &Snapshot, segment: &Segment, start_time: Timestamp) -> SegmentDto {
    let end_time = start_time + (segment.arrive() - segment.depart());

    match segment {
        Segment::Walk { from, to, distance_meters, .. } => {
            let from_name = repository.name(from).to_string();
            let to_name = repository.name(to).to_string();
            let coordinate_from = repository.coordinate(from).unwrap_or_default();
            let coordinate_to = repository.coordinate(to).unwrap_or_default();
            SegmentDto::Walk {
                from: from_name,
                to: to_name,
                from_id: from.to_string(),
                to_id: to.to_string(),
                start_time: start_time.as_unix(),
                end_time: end_time.as_unix(),
                duration: (end_time - start_time).as_seconds(),
                distance: *distance_meters as f32,
                coordinates: vec![(coordinate_from.latitude, coordinate_from.longitude), (coordinate_to.latitude, coordinate_to.longitude)],
            }
        }
        Segment::Ride { from, to, route_id, vehicle_id, .. } => {
            let mode = segment_mode(repository, from, to);
            let (line_color, tube_line, rail_line) = match mode {
                SegmentMode::Bus => (colors::bus_color(), None, None),
                SegmentMode::Tube => match colors::tube_line_info(route_id) {
                    Some((name, color)) => (color, Some(name), None),
                    None => (colors::bus_color(), None, None),
                },
                SegmentMode::Rail => {
                    let (name, color) = colors::rail_line_info(route_id);
                    (color, None, Some(name))
                }
            };
            let platform = matches!(mode, SegmentMode::Rail).then(|| snapshot.platform(vehicle_id, from)).flatten().map(str::to_string);

            let stops = intermediate_stops(repository, snapshot, route_id, vehicle_id, from, to);
            let coordinates = coordinates_for(repository, &stops, from, to);
            let distance = walk_distance_meters(repository, from, to);

            SegmentDto::Trip {
                from: repository.name(from).to_string(),
                to: repository.name(to).to_string(),
                from_id: from.to_string(),
                to_id: to.to_string(),
                start_time: start_time.as_unix(),
                end_time: end_time.as_unix(),
                duration: (end_time - start_time).as_seconds(),
                distance,
                coordinates,
                route: route_id.to_string(),
                vehicle: vehicle_id.to_string(),
                mode,
                line_color,
                tube_line,
                rail_line,
                platform,
                stops,
            }
        }
    }
}

/// Builds the response schema for one itinerary. `current_time` starts at
/// the itinerary's departure and advances to each segment's own `end_time`
/// before the next segment is computed — the reference implementation
/// instead assigned `end_time` before advancing `current_time`, producing
/// `start_time == end_time` on every segment; that defect is not reproduced.
pub fn build_response(repository: &Repository, snapshot: &Snapshot, itinerary: &Itinerary) -> RouteResponseDto {
    let mut current_time = itinerary.departure;
    let mut segments = Vec::with_capacity(itinerary.segments.len());

    for segment in &itinerary.segments {
        let dto = build_segment(repository, snapshot, segment, current_time);
        current_time = Timestamp::from_unix(match &dto {
            SegmentDto::Walk { end_time, .. } => *end_time,
            SegmentDto::Trip { end_time, .. } => *end_time,
        });
        segments.push(dto);
    }

    RouteResponseDto {
        journey_time: itinerary.journey_time().as_seconds(),
        num_legs: itinerary.legs,
        segments,
    }
}
