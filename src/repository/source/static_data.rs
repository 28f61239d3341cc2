//! Loads the Stop Directory (component A) from the static stop/connection
//! store named in the interface contract. The store itself (SQLite "or
//! equivalent") is an external collaborator; this crate only deserializes
//! its `Point` rows — one JSON file of `{id, name, lat, lon, mode}` records,
//! which is the "or equivalent" the contract explicitly allows.

use std::{collections::HashMap, fs, path::Path, sync::Arc, time::Instant};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::{
    repository::{Repository, Stop},
    shared::{Mode, geo::Coordinate},
};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read static data file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse static data file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// One row of the external `Point` table: `Point(id PK, lat, lon, name, mode)`.
#[derive(Debug, Deserialize)]
struct PointRecord {
    id: String,
    name: String,
    lat: f32,
    lon: f32,
    mode: Mode,
}

impl Repository {
    /// Loads the Stop Directory from `<static_data_path>/stops.json`.
    pub fn load(static_data_path: &Path) -> Result<Self, LoadError> {
        let path = static_data_path.join("stops.json");
        let path_str = path.display().to_string();

        let now = Instant::now();
        debug!("Loading stops from {path_str}...");
        let raw = fs::read_to_string(&path).map_err(|source| LoadError::Io {
            path: path_str.clone(),
            source,
        })?;
        let records: Vec<PointRecord> =
            serde_json::from_str(&raw).map_err(|source| LoadError::Parse {
                path: path_str.clone(),
                source,
            })?;

        let mut stop_lookup: HashMap<Arc<str>, u32> = HashMap::with_capacity(records.len());
        let stops: Box<[Stop]> = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                let id: Arc<str> = record.id.into();
                let name: Arc<str> = record.name.into();
                let normalized_name: Arc<str> = name.to_lowercase().into();
                stop_lookup.insert(id.clone(), index as u32);
                Stop {
                    index: index as u32,
                    id,
                    name,
                    normalized_name,
                    coordinate: Coordinate {
                        latitude: record.lat,
                        longitude: record.lon,
                    },
                    mode: record.mode,
                }
            })
            .collect();

        debug!("Loaded {} stops in {:?}", stops.len(), now.elapsed());

        Ok(Self { stops, stop_lookup })
    }
}
