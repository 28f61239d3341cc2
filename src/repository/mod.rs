mod entities;
pub mod source;

pub use entities::*;
use std::{collections::HashMap, sync::Arc};

use crate::shared::{self, Mode, geo::Coordinate};

/// The Stop Directory (component A): a read-through, memoized lookup of
/// static stop metadata keyed by stop id.
///
/// Lookup failure never fails the caller — `name`/`coordinate`/`mode` fall
/// back to the id itself (or `None`) per the interface contract, since an
/// unrecognized stop id surfaces as [`crate::error::IngestError`] only at
/// the point an ingestor tries to use it, not here.
#[derive(Debug, Clone, Default)]
pub struct Repository {
    /// Global list of all known stops.
    pub stops: Box<[Stop]>,
    /// Maps a `Stop.id` string to its index within `stops`.
    stop_lookup: HashMap<Arc<str>, u32>,
}

impl Repository {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn stop_by_id(&self, id: &str) -> Option<&Stop> {
        let index = self.stop_lookup.get(id)?;
        Some(&self.stops[*index as usize])
    }

    /// Human-readable name for a stop id, falling back to the id itself
    /// when the directory has no entry for it.
    pub fn name(&self, id: &str) -> Arc<str> {
        self.stop_by_id(id)
            .map(|stop| stop.name.clone())
            .unwrap_or_else(|| id.into())
    }

    pub fn coordinate(&self, id: &str) -> Option<Coordinate> {
        self.stop_by_id(id).map(|stop| stop.coordinate)
    }

    pub fn mode(&self, id: &str) -> Option<Mode> {
        self.stop_by_id(id).map(|stop| stop.mode)
    }

    /// Performs a fuzzy text search against stop names (used by `/api/search`).
    pub fn search_stops_by_name<'a>(&'a self, needle: &'a str) -> Vec<&'a Stop> {
        shared::search(needle, &self.stops)
    }

    /// Builds a directory from a fixed stop list, bypassing `Repository::load`'s
    /// static-file read — used by the ingestors' own tests to construct a
    /// `Repository` around a small, hand-built stop list.
    pub fn from_stops(stops: Vec<Stop>) -> Self {
        let stops: Box<[Stop]> = stops.into_boxed_slice();
        let stop_lookup = stops.iter().map(|s| (s.id.clone(), s.index)).collect();
        Self { stops, stop_lookup }
    }
}
