use std::{collections::HashMap, sync::Arc};

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{dto::stop, state::AppState};

const DEFAULT_LIMIT: usize = 20;

/// `GET /api/search?q=<prefix>`: up to 20 stops matching the query, each
/// carrying the lines currently serving it.
pub async fn search(Query(params): Query<HashMap<String, String>>, State(state): State<Arc<AppState>>) -> Result<Response, StatusCode> {
    let Some(query) = params.get("q") else {
        return Err(StatusCode::BAD_REQUEST);
    };
    if query.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let snapshot = state.live.current();
    let results = stop::search(&state.repository, &snapshot, query, DEFAULT_LIMIT);
    Ok(Json(results).into_response())
}
