use thiserror::Error;

/// Errors raised while fusing a single upstream feed into the live timetable.
///
/// None of these ever abort a refresh cycle: ingestors catch them at the
/// point of use, log via `tracing`, and skip only the affected vehicle or
/// station, leaving the rest of the cycle's output untouched.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("upstream feed {feed} unavailable: {source}")]
    UpstreamUnavailable {
        feed: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("upstream feed {feed} returned unexpected status {status}")]
    UpstreamStatus { feed: &'static str, status: u16 },
    #[error("failed to parse record from {feed}: {reason}")]
    ParseFailure { feed: &'static str, reason: String },
    #[error("vehicle {vehicle} could not be resolved to a known route")]
    UnresolvedVehicle { vehicle: String },
}

/// Errors surfaced to an HTTP caller of the Query Coordinator.
#[derive(Error, Debug)]
pub enum RequestError {
    #[error("origin and destination are required")]
    InvalidRequest,
    #[error("no path found between the requested stops")]
    NoPath,
    #[error("internal invariant violated: {0}")]
    Internal(String),
}
