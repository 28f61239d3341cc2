//! The Static Timetable Store (component C): per-mode route patterns —
//! intervals and per-weekday scheduled start times — loaded once from the
//! `{tube,bus,tram}_timetable*.json` files named in the interface contract.
//!
//! A missing interval entry or an empty schedule is a normal `None` from the
//! accessor methods here, not a parse-time error: the ingestors that consume
//! this store treat "no pattern" as "skip this vehicle", never as a reason
//! to fail the whole load.

use std::{collections::HashMap, fs, path::Path, sync::Arc, time::Instant};

use chrono::Weekday;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read timetable file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse timetable file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// One scheduled interval: an ordered `(stop_id, minute_offset_from_start)`
/// sequence, identified by an interval id unique within its route pattern.
#[derive(Debug, Clone, Deserialize)]
pub struct Interval {
    pub id: Arc<str>,
    pub stops: Box<[(Arc<str>, u32)]>,
}

impl Interval {
    /// The minute offset of `stop_id` within this interval, if it calls there.
    pub fn offset_of(&self, stop_id: &str) -> Option<u32> {
        self.stops
            .iter()
            .find(|(id, _)| &**id == stop_id)
            .map(|(_, offset)| *offset)
    }

    pub fn position_of(&self, stop_id: &str) -> Option<usize> {
        self.stops.iter().position(|(id, _)| &**id == stop_id)
    }
}

fn weekday_key(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "mon",
        Weekday::Tue => "tue",
        Weekday::Wed => "wed",
        Weekday::Thu => "thu",
        Weekday::Fri => "fri",
        Weekday::Sat => "sat",
        Weekday::Sun => "sun",
    }
}

/// A static `start:end` travel pattern for one line and direction.
#[derive(Debug, Clone, Deserialize)]
pub struct RoutePattern {
    pub line: Arc<str>,
    pub direction: Arc<str>,
    pub route_code: Arc<str>,
    pub start_stop: Arc<str>,
    pub end_stop: Arc<str>,
    pub intervals: Vec<Interval>,
    /// Per-weekday list of `(interval id, minutes since local midnight)`.
    pub schedules: HashMap<String, Vec<(Arc<str>, u32)>>,
}

impl RoutePattern {
    pub fn interval(&self, id: &str) -> Option<&Interval> {
        self.intervals.iter().find(|interval| &*interval.id == id)
    }

    /// Scheduled `(interval, minutes since midnight)` starts for `day`.
    pub fn starts_on(&self, day: Weekday) -> impl Iterator<Item = (&Interval, u32)> {
        self.schedules
            .get(weekday_key(day))
            .into_iter()
            .flatten()
            .filter_map(|(interval_id, minutes)| {
                self.interval(interval_id).map(|interval| (interval, *minutes))
            })
    }
}

#[derive(Debug, Default, Clone)]
pub struct TimetableStore {
    patterns: Box<[RoutePattern]>,
    by_line_direction: HashMap<(Arc<str>, Arc<str>), Vec<u32>>,
    by_line: HashMap<Arc<str>, Vec<u32>>,
}

impl TimetableStore {
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let path_str = path.display().to_string();
        let now = Instant::now();
        debug!("Loading timetable from {path_str}...");

        let raw = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path_str.clone(),
            source,
        })?;
        let patterns: Vec<RoutePattern> = serde_json::from_str(&raw).map_err(|source| LoadError::Parse {
            path: path_str.clone(),
            source,
        })?;

        let mut by_line_direction: HashMap<(Arc<str>, Arc<str>), Vec<u32>> = HashMap::new();
        let mut by_line: HashMap<Arc<str>, Vec<u32>> = HashMap::new();
        for (index, pattern) in patterns.iter().enumerate() {
            let index = index as u32;
            by_line_direction
                .entry((pattern.line.clone(), pattern.direction.clone()))
                .or_default()
                .push(index);
            by_line.entry(pattern.line.clone()).or_default().push(index);
        }

        debug!("Loaded {} route patterns in {:?}", patterns.len(), now.elapsed());
        Ok(Self {
            patterns: patterns.into_boxed_slice(),
            by_line_direction,
            by_line,
        })
    }

    /// Route patterns for a `(line, direction)` pair, as the bus/tube
    /// ingestors key their candidate search.
    pub fn patterns_for(&self, line: &str, direction: &str) -> impl Iterator<Item = &RoutePattern> {
        self.by_line_direction
            .get(&(line.into(), direction.into()))
            .into_iter()
            .flatten()
            .map(|&index| &self.patterns[index as usize])
    }

    /// All route patterns for a line, regardless of direction — used when
    /// synthesizing future trips per `(line, direction, route_code)`.
    pub fn patterns_for_line(&self, line: &str) -> impl Iterator<Item = &RoutePattern> {
        self.by_line
            .get(line)
            .into_iter()
            .flatten()
            .map(|&index| &self.patterns[index as usize])
    }

    /// Builds a store from an in-memory pattern list, bypassing
    /// `TimetableStore::load`'s static-file read — used by the ingestors'
    /// own tests to construct a store around a small, hand-built pattern
    /// list.
    pub fn from_patterns(patterns: Vec<RoutePattern>) -> Self {
        let mut by_line_direction: HashMap<(Arc<str>, Arc<str>), Vec<u32>> = HashMap::new();
        let mut by_line: HashMap<Arc<str>, Vec<u32>> = HashMap::new();
        for (index, pattern) in patterns.iter().enumerate() {
            let index = index as u32;
            by_line_direction
                .entry((pattern.line.clone(), pattern.direction.clone()))
                .or_default()
                .push(index);
            by_line.entry(pattern.line.clone()).or_default().push(index);
        }
        Self {
            patterns: patterns.into_boxed_slice(),
            by_line_direction,
            by_line,
        }
    }
}
