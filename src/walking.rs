//! The Walking Graph (component B): a precomputed, symmetric map of
//! pedestrian travel times between nearby stops.
//!
//! Building this file — bucketing stops into a spatial grid, calling an
//! external pedestrian-routing table, periodically saving the result — is
//! external-tool territory; this crate only deserializes the finished
//! `walking_distances.json`.

use std::{collections::HashMap, fs, path::Path, sync::Arc, time::Instant};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::shared::time::Duration;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read walking distances file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse walking distances file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// `stopId -> {stopId -> seconds}`, symmetric by construction upstream.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct WalkingGraph(HashMap<Arc<str>, HashMap<Arc<str>, u32>>);

impl WalkingGraph {
    /// Builds a graph directly from an adjacency map, bypassing `load`'s
    /// static-file read — used by the journey engine's own tests to
    /// construct a small, hand-built walking graph.
    pub fn from_map(map: HashMap<Arc<str>, HashMap<Arc<str>, u32>>) -> Self {
        Self(map)
    }

    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let path_str = path.display().to_string();
        let now = Instant::now();
        debug!("Loading walking distances from {path_str}...");

        let raw = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path_str.clone(),
            source,
        })?;
        let graph: Self = serde_json::from_str(&raw).map_err(|source| LoadError::Parse {
            path: path_str.clone(),
            source,
        })?;

        debug!(
            "Loaded walking distances for {} stops in {:?}",
            graph.0.len(),
            now.elapsed()
        );
        Ok(graph)
    }

    /// Walking neighbours of `id` reachable within `max_walk`, as
    /// `(stop id, walk duration)` pairs. Absent `id` yields an empty list,
    /// matching the unknown-stop-is-never-fatal posture used elsewhere.
    pub fn neighbors(&self, id: &str, max_walk: Duration) -> Vec<(Arc<str>, Duration)> {
        let Some(edges) = self.0.get(id) else {
            return Vec::new();
        };
        edges
            .iter()
            .filter(|(_, &seconds)| seconds <= max_walk.as_seconds())
            .map(|(stop, &seconds)| (stop.clone(), Duration::from_seconds(seconds)))
            .collect()
    }
}
