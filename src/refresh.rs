//! The Refresh Scheduler (component I): wakes on a fixed period, runs the
//! bus, tube, and rail ingestors strictly sequentially, then publishes a
//! new [`Snapshot`] via a single-writer pointer swap.
//!
//! Readers never take a lock: [`Handle::current`] is one `ArcSwap::load_full`
//! and the returned `Arc<Snapshot>` is used for the entire request.

use std::{collections::HashMap, fs, path::Path, sync::Arc, time::Instant};

use arc_swap::ArcSwap;
use reqwest::Client;
use tokio::{
    sync::Notify,
    task::JoinHandle,
    time::{self, Duration as TokioDuration},
};
use tracing::{error, info, warn};

use crate::{
    config::Config,
    live::{PlatformMap, Snapshot, bus, facade, feeds, rail, tube},
    repository::Repository,
    shared::Timestamp,
    timetable::TimetableStore,
};

/// Shared handle to the currently published snapshot.
#[derive(Clone)]
pub struct Handle(Arc<ArcSwap<Snapshot>>);

impl Handle {
    pub fn current(&self) -> Arc<Snapshot> {
        self.0.load_full()
    }
}

/// Owns the background refresh loop's shutdown signal and join handle.
///
/// Shutdown is only observed between ticks, never inside an in-flight
/// [`run_cycle`] call, so a half-built snapshot is never swapped in on the
/// way out.
pub struct RefreshTask {
    shutdown: Arc<Notify>,
    join: JoinHandle<()>,
}

impl RefreshTask {
    pub async fn shutdown(self) {
        self.shutdown.notify_one();
        if let Err(err) = self.join.await {
            error!(error = %err, "refresh task panicked during shutdown");
        }
    }
}

fn load_seed_platforms(static_data_path: &Path) -> PlatformMap {
    let path = static_data_path.join("platforms.json");
    match fs::read_to_string(&path) {
        Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
            warn!(path = %path.display(), error = %err, "failed to parse platforms.json, starting with an empty warm cache");
            HashMap::new()
        }),
        Err(_) => {
            info!(path = %path.display(), "no platforms.json warm cache found, starting empty");
            HashMap::new()
        }
    }
}

/// Runs one D→E→F→G ingestion cycle and returns the freshly built snapshot.
pub async fn run_cycle(
    client: &Client,
    config: &Config,
    repo: &Repository,
    bus_store: &TimetableStore,
    tube_store: &TimetableStore,
    seed_platforms: &PlatformMap,
) -> Snapshot {
    let now = Timestamp::now();

    let tube_start = Instant::now();
    let tube_arrivals = match feeds::fetch_tube_arrivals(client, &config.tfl_api_key).await {
        Ok(records) => records,
        Err(err) => {
            warn!(error = %err, "tube arrivals feed unavailable this cycle");
            Vec::new()
        }
    };
    let tube_trips = tube::build_trips(&tube_arrivals, tube_store, repo, now);
    info!(phase = "tube", vehicles = tube_trips.values().map(HashMap::len).sum::<usize>(), elapsed_ms = tube_start.elapsed().as_millis() as u64, "tube refresh complete");

    let bus_start = Instant::now();
    let bus_arrivals = match feeds::fetch_bus_arrivals(client, &config.tfl_api_key).await {
        Ok(records) => records,
        Err(err) => {
            warn!(error = %err, "bus arrivals feed unavailable this cycle");
            Vec::new()
        }
    };
    let bus_trips = bus::build_trips(&bus_arrivals, bus_store, now);
    info!(phase = "bus", vehicles = bus_trips.values().map(HashMap::len).sum::<usize>(), elapsed_ms = bus_start.elapsed().as_millis() as u64, "bus refresh complete");

    let rail_start = Instant::now();
    let (rail_trips, rail_platforms) = rail::build_trips(client, &config.rail_marketplace_api_key, repo, config.rail_pool_size, now).await;
    info!(phase = "rail", vehicles = rail_trips.values().map(HashMap::len).sum::<usize>(), elapsed_ms = rail_start.elapsed().as_millis() as u64, "rail refresh complete");

    facade::assemble(bus_trips, tube_trips, rail_trips, seed_platforms.clone(), rail_platforms)
}

/// Builds the initial snapshot synchronously (so the server never answers a
/// request before at least one ingestion cycle has completed) and spawns the
/// background task that keeps refreshing it.
pub async fn start(config: Arc<Config>, repo: Arc<Repository>, bus_store: Arc<TimetableStore>, tube_store: Arc<TimetableStore>) -> (Handle, RefreshTask) {
    let client = Client::new();
    let seed_platforms = load_seed_platforms(&config.static_data_path);

    let initial = run_cycle(&client, &config, &repo, &bus_store, &tube_store, &seed_platforms).await;
    let swap = Arc::new(ArcSwap::new(Arc::new(initial)));
    let handle = Handle(swap.clone());

    let shutdown = Arc::new(Notify::new());
    let task_shutdown = shutdown.clone();
    let join = tokio::spawn(async move {
        let mut ticker = time::interval(TokioDuration::from_secs(config.refresh_interval_secs));
        ticker.tick().await; // first tick fires immediately; the initial cycle already ran above.
        loop {
            tokio::select! {
                _ = task_shutdown.notified() => {
                    info!("refresh task stopping, no tick in flight");
                    break;
                }
                _ = ticker.tick() => {
                    let snapshot = run_cycle(&client, &config, &repo, &bus_store, &tube_store, &seed_platforms).await;
                    swap.store(Arc::new(snapshot));
                }
            }
        }
    });

    (handle, RefreshTask { shutdown, join })
}
