//! Upstream feed records and the raw HTTP fetches ingestors D/E/F build on.
//!
//! Every fetch here returns [`IngestError`] rather than panicking or
//! bubbling a bare `reqwest::Error` — a feed outage degrades to "this
//! ingestor contributes nothing this cycle", never a crashed refresh.

use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::error::IngestError;

/// One live-arrival record from the tube/bus arrivals feed, as published by
/// the TfL-style unified-arrivals API both modes share upstream.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrivalRecord {
    pub line_id: String,
    pub vehicle_id: String,
    pub naptan_id: String,
    pub direction: String,
    pub destination_name: String,
    pub expected_arrival: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RailCallingPoint {
    pub stop_id: String,
    /// Actual time, preferred over `et`/`st` when present.
    pub at: Option<String>,
    /// Estimated time.
    pub et: Option<String>,
    /// Scheduled time.
    pub st: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RailService {
    pub service_id: String,
    pub destination_crs: String,
    pub operator: String,
    #[serde(default)]
    pub is_cancelled: bool,
    pub eta: Option<String>,
    pub ata: Option<String>,
    pub sta: Option<String>,
    pub platform: Option<String>,
    #[serde(default)]
    pub previous_calling_points: Vec<RailCallingPoint>,
    #[serde(default)]
    pub subsequent_calling_points: Vec<RailCallingPoint>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RailBoard {
    pub train_services: Vec<RailService>,
}

async fn fetch_json<T: for<'de> Deserialize<'de>>(
    client: &Client,
    feed: &'static str,
    url: &str,
    bearer: Option<&str>,
    api_key_header: Option<(&str, &str)>,
) -> Result<T, IngestError> {
    let mut request = client.get(url);
    if let Some(token) = bearer {
        request = request.bearer_auth(token);
    }
    if let Some((header, value)) = api_key_header {
        request = request.header(header, value);
    }

    let response = request
        .send()
        .await
        .map_err(|source| IngestError::UpstreamUnavailable { feed, source })?;

    if response.status() != StatusCode::OK {
        return Err(IngestError::UpstreamStatus {
            feed,
            status: response.status().as_u16(),
        });
    }

    response.json::<T>().await.map_err(|source| IngestError::UpstreamUnavailable { feed, source })
}

/// `GET` the tube arrivals feed for every line, authenticated with the TfL
/// bearer token.
pub async fn fetch_tube_arrivals(client: &Client, tfl_api_key: &str) -> Result<Vec<ArrivalRecord>, IngestError> {
    fetch_json(
        client,
        "tube",
        "https://api.tfl.gov.uk/Line/Mode/tube/Arrivals",
        Some(tfl_api_key),
        None,
    )
    .await
}

/// `GET` the bus arrivals feed for every route, authenticated with the TfL
/// bearer token.
pub async fn fetch_bus_arrivals(client: &Client, tfl_api_key: &str) -> Result<Vec<ArrivalRecord>, IngestError> {
    fetch_json(
        client,
        "bus",
        "https://api.tfl.gov.uk/Mode/bus/Arrivals",
        Some(tfl_api_key),
        None,
    )
    .await
}

/// `GET` a station-board for one rail stop's two-hour departure window.
pub async fn fetch_rail_board(client: &Client, api_key: &str, crs: &str) -> Result<RailBoard, IngestError> {
    let url = format!("https://api.raildata.org.uk/boards/{crs}?timeWindow=120");
    fetch_json(client, "rail", &url, None, Some(("x-apikey", api_key))).await
}
