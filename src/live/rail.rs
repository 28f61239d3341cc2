//! The Rail Ingestor (component F): fans out per-station board requests
//! across a bounded worker pool and deduplicates services across stations.

use std::{collections::HashMap, sync::Arc};

use reqwest::Client;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use crate::{
    live::{PlatformMap, RouteId, StopId, Trip, VehicleId, feeds},
    repository::Repository,
    shared::{Mode, Timestamp},
};

/// The CRS a rail stop id resolves to — rail stop ids are `CRS/platform`
/// compound ids, everywhere else in this ingestor just the bare CRS.
pub fn crs_of(stop_id: &str) -> &str {
    stop_id.split('/').next().unwrap_or(stop_id)
}

fn resolve_time(preferred: &[Option<&str>]) -> Option<Timestamp> {
    preferred.iter().flatten().find_map(|hms| Timestamp::from_hms_today(hms))
}

/// One upstream rail service resolved into this ingestor's own stop/time
/// shape, before being folded into a [`crate::live::Trip`].
pub struct ResolvedService {
    pub service_id: String,
    pub route_id: RouteId,
    pub stops: Vec<(StopId, Timestamp)>,
    pub platform: Option<(String, String)>,
}

/// Resolves one upstream service against the station it was fetched from:
/// drops cancelled services and malformed service ids, picks each calling
/// point's preferred time (`at` > `et` > `st`), and drops any calling point
/// already in the past relative to `now`.
pub fn resolve_service(station_crs: &str, service: &feeds::RailService, now: Timestamp) -> Option<ResolvedService> {
    if service.is_cancelled {
        return None;
    }
    if service.service_id.len() != 7 {
        warn!(service_id = %service.service_id, "rail service id is not 7 characters, skipping");
        return None;
    }

    let own_time = resolve_time(&[service.eta.as_deref(), service.ata.as_deref(), service.sta.as_deref()])?;

    let mut stops: Vec<(StopId, Timestamp)> = Vec::with_capacity(service.previous_calling_points.len() + service.subsequent_calling_points.len() + 1);
    if own_time.as_unix() >= now.as_unix() {
        stops.push((StopId::from(station_crs), own_time));
    }
    for point in service.previous_calling_points.iter().chain(service.subsequent_calling_points.iter()) {
        if let Some(time) = resolve_time(&[point.at.as_deref(), point.et.as_deref(), point.st.as_deref()]) {
            if time.as_unix() < now.as_unix() {
                continue;
            }
            stops.push((StopId::from(point.stop_id.as_str()), time));
        }
    }
    stops.sort_by_key(|(_, time)| *time);

    let platform = service.platform.clone().map(|platform| (format!("{}/{}", service.service_id, station_crs), platform));

    Some(ResolvedService {
        service_id: service.service_id.clone(),
        route_id: format!("{}/{}", service.operator, service.destination_crs).into(),
        stops,
        platform,
    })
}

pub async fn build_trips(
    client: &Client,
    api_key: &str,
    repo: &Repository,
    pool_size: usize,
    now: Timestamp,
) -> (HashMap<RouteId, HashMap<VehicleId, Trip>>, PlatformMap) {
    let semaphore = Arc::new(Semaphore::new(pool_size.max(1)));
    let mut handles = Vec::new();

    for stop in repo.stops.iter().filter(|stop| stop.mode == Mode::Rail) {
        let station_crs = crs_of(&stop.id).to_string();
        let client = client.clone();
        let api_key = api_key.to_string();
        let semaphore = semaphore.clone();
        handles.push(tokio::spawn(async move {
            let _permit = semaphore.acquire_owned().await.ok()?;
            match feeds::fetch_rail_board(&client, &api_key, &station_crs).await {
                Ok(board) => Some((station_crs, board)),
                Err(err) => {
                    warn!(station = %station_crs, error = %err, "rail board request failed");
                    None
                }
            }
        }));
    }

    let mut resolved: HashMap<String, ResolvedService> = HashMap::new();
    let mut platforms: PlatformMap = HashMap::new();

    for handle in handles {
        let Ok(Some((station_crs, board))) = handle.await else {
            continue;
        };
        for service in &board.train_services {
            if let Some(entry) = resolve_service(&station_crs, service, now) {
                if let Some((key, platform)) = entry.platform.clone() {
                    platforms.insert(key, platform);
                }
                resolved.insert(entry.service_id.clone(), entry);
            }
        }
    }

    debug!(services = resolved.len(), "rail ingestion resolved services");

    let mut out: HashMap<RouteId, HashMap<VehicleId, Trip>> = HashMap::new();
    for (service_id, service) in resolved {
        let trip = Trip {
            route_id: service.route_id.clone(),
            vehicle_id: service_id.clone().into(),
            stops: service.stops.into_boxed_slice(),
        };
        out.entry(service.route_id).or_default().insert(service_id.into(), trip);
    }

    (out, platforms)
}
