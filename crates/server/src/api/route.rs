use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use concourse::{
    raptor,
    shared::{Timestamp, time::Duration},
};
use serde::Deserialize;
use serde_json::json;

use crate::{dto::itinerary, state::AppState};

#[derive(Debug, Deserialize)]
pub struct RouteRequest {
    pub origin: Option<String>,
    pub destination: Option<String>,
}

pub struct ApiError(StatusCode, &'static str);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.0, Json(json!({ "error": self.1 }))).into_response()
    }
}

/// `POST /api/route`: the Query Coordinator's only entry point. Departs
/// "now" — the reference implementation takes no `departure_time` input
/// either, always routing from the instant the request arrives.
pub async fn route(State(state): State<Arc<AppState>>, Json(body): Json<RouteRequest>) -> Result<Response, ApiError> {
    let (Some(origin), Some(destination)) = (body.origin.as_deref(), body.destination.as_deref()) else {
        return Err(ApiError(StatusCode::BAD_REQUEST, "origin and destination are required"));
    };
    if origin.trim().is_empty() || destination.trim().is_empty() {
        return Err(ApiError(StatusCode::BAD_REQUEST, "origin and destination are required"));
    }

    let snapshot = state.live.current();
    let search = raptor::Raptor::new(&snapshot, &state.walking, origin.into(), destination.into())
        .departure_at(Timestamp::now())
        .max_rounds(state.config.max_rounds)
        .max_walk(Duration::from_seconds(state.config.max_walk_secs));

    let itineraries = match search.solve() {
        Ok(itineraries) => itineraries,
        Err(raptor::Error::InvalidRequest) => return Err(ApiError(StatusCode::BAD_REQUEST, "origin and destination are required")),
        Err(raptor::Error::NoPath) => return Err(ApiError(StatusCode::NOT_FOUND, "no path found between the requested stops")),
    };

    let Some(best) = itineraries.first() else {
        return Err(ApiError(StatusCode::NOT_FOUND, "no path found between the requested stops"));
    };

    let response = itinerary::build_response(&state.repository, &snapshot, best);
    Ok(Json(response).into_response())
}
