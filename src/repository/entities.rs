use std::sync::Arc;

use crate::shared::{Identifiable, Mode, geo::Coordinate};

/// A physical point where passengers can board or alight from a vehicle.
///
/// Immutable after load: static stop metadata (name, coordinate, mode) never
/// changes for the lifetime of the process, only the live timetable does.
#[derive(Debug, Default, Clone)]
pub struct Stop {
    /// The global internal index for this stop, stable for the process's
    /// lifetime — used as the dense key for the journey engine's marked-stop
    /// bitset.
    pub index: u32,
    /// Unique external identifier for the stop (for rail, the full
    /// `CRS/...` compound id as seen by callers).
    pub id: Arc<str>,
    /// Human-readable name (e.g., "Oxford Circus Underground Station").
    pub name: Arc<str>,
    /// Normalized name used for fuzzy search comparisons.
    pub normalized_name: Arc<str>,
    pub coordinate: Coordinate,
    pub mode: Mode,
}

impl Identifiable for Stop {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn normalized_name(&self) -> &str {
        &self.normalized_name
    }
}
