//! `PathPointer`: for each `(stopId, labelId)` the predecessor needed to
//! reconstruct a journey, stored in a map parallel to the per-stop label
//! sets rather than inline on the label itself.

use crate::live::{RouteId, StopId, VehicleId};
use crate::shared::Timestamp;

/// Metres per second used to estimate a walk's distance from its duration,
/// matching the fallback walking-speed formula used when no external
/// pedestrian router answer is available.
pub const WALK_SPEED_MPS: f64 = 1.4;

#[derive(Debug, Clone)]
pub enum PathPointer {
    /// The origin's seed label has no predecessor.
    Origin,
    Walk {
        prev_stop: StopId,
        prev_label: u32,
        seconds: u32,
    },
    Ride {
        prev_stop: StopId,
        prev_label: u32,
        route_id: RouteId,
        vehicle_id: VehicleId,
        board_time: Timestamp,
        alight_time: Timestamp,
    },
}
