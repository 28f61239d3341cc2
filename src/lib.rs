//! Core engine for a live, multi-modal transit journey planner.
//!
//! Static network data lives in [`repository`] (the Stop Directory),
//! [`walking`] (the walking graph) and [`timetable`] (route patterns);
//! live-feed fusion lives in [`live`], refreshed on a schedule by
//! [`refresh`]; the multi-criteria journey search lives in [`raptor`].
//! [`config`] and [`error`] are the ambient configuration and
//! error-handling layers shared across all of the above.

pub mod config;
pub mod error;
pub mod live;
pub mod raptor;
pub mod refresh;
pub mod repository;
pub mod shared;
pub mod timetable;
pub mod walking;

pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{IngestError, RequestError};
    pub use crate::live::{LiveTimetable, PlatformMap, Snapshot};
    pub use crate::raptor::{Itinerary, Raptor};
    pub use crate::repository::Repository;
}
