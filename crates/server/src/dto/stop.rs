use std::collections::HashSet;

use concourse::{
    live::Snapshot,
    repository::{Repository, Stop},
    shared::{Mode, geo::Coordinate},
};
use serde::Serialize;

use crate::dto::colors;

#[derive(Debug, Clone, Serialize)]
pub struct StopDto {
    pub id: String,
    pub name: String,
    pub coordinate: Coordinate,
    pub mode: Mode,
}

impl From<&Stop> for StopDto {
    fn from(stop: &Stop) -> Self {
        Self {
            id: stop.id.to_string(),
            name: stop.name.to_string(),
            coordinate: stop.coordinate,
            mode: stop.mode,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LineInfoDto {
    pub id: String,
    pub name: String,
    pub color: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct StopSearchResultDto {
    #[serde(flatten)]
    pub stop: StopDto,
    pub lines: Vec<LineInfoDto>,
}

/// Every route currently serving `stop`, deduplicated, described by the
/// stop's own mode — a stop only ever carries the mode of the vehicles
/// that actually call there.
pub fn lines_serving(stop: &Stop, snapshot: &Snapshot) -> Vec<LineInfoDto> {
    let route_ids: HashSet<&str> = snapshot.trips_serving(&stop.id).iter().map(|(route_id, _)| route_id.as_ref()).collect();

    let mut lines: Vec<LineInfoDto> = route_ids
        .into_iter()
        .map(|route_id| match stop.mode {
            Mode::Bus => LineInfoDto {
                id: route_id.to_uppercase(),
                name: route_id.to_uppercase(),
                color: colors::bus_color(),
                kind: "bus",
            },
            Mode::Tube | Mode::Underground => match colors::tube_line_info(route_id) {
                Some((name, color)) => LineInfoDto { id: route_id.to_string(), name, color, kind: "tube" },
                None => LineInfoDto {
                    id: route_id.to_uppercase(),
                    name: route_id.to_uppercase(),
                    color: colors::bus_color(),
                    kind: "bus",
                },
            },
            Mode::Rail | Mode::Tram => {
                let (name, color) = colors::rail_line_info(route_id);
                LineInfoDto { id: route_id.to_string(), name, color, kind: "rail" }
            }
        })
        .collect();

    lines.sort_by(|a, b| a.id.cmp(&b.id));
    lines
}

pub fn search(repository: &Repository, snapshot: &Snapshot, query: &str, limit: usize) -> Vec<StopSearchResultDto> {
    repository
        .search_stops_by_name(query)
        .into_iter()
        .take(limit)
        .map(|stop| StopSearchResultDto { stop: stop.into(), lines: lines_serving(stop, snapshot) })
        .collect()
}
