mod api;
mod dto;
mod state;

use std::{process, sync::Arc, time::Instant};

use axum::routing::{get, post};
use concourse::{config::Config, refresh, repository::Repository, timetable::TimetableStore, walking::WalkingGraph};
use tracing::{error, info};

use crate::state::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().init();

    let config = match Config::from_env() {
        Ok(config) => Arc::new(config),
        Err(err) => {
            error!(error = %err, "failed to load configuration");
            process::exit(1);
        }
    };

    info!("Loading static network data...");
    let now = Instant::now();

    let repository = match Repository::load(&config.static_data_path) {
        Ok(repository) => Arc::new(repository),
        Err(err) => {
            error!(error = %err, "failed to load stop directory");
            process::exit(1);
        }
    };
    let walking = match WalkingGraph::load(&config.walking_distances_path) {
        Ok(walking) => Arc::new(walking),
        Err(err) => {
            error!(error = %err, "failed to load walking graph");
            process::exit(1);
        }
    };
    let bus_store = match TimetableStore::load(&config.static_data_path.join("bus_timetable.json")) {
        Ok(store) => Arc::new(store),
        Err(err) => {
            error!(error = %err, "failed to load bus timetable");
            process::exit(1);
        }
    };
    let tube_store = match TimetableStore::load(&config.static_data_path.join("tube_timetable.json")) {
        Ok(store) => Arc::new(store),
        Err(err) => {
            error!(error = %err, "failed to load tube timetable");
            process::exit(1);
        }
    };
    info!(elapsed = ?now.elapsed(), "static network data loaded");

    info!("Running initial ingestion cycle...");
    let (live, refresh_task) = refresh::start(config.clone(), repository.clone(), bus_store, tube_store).await;

    let app_state = Arc::new(AppState { config: config.clone(), repository, walking, live });

    let app = axum::Router::new()
        .route("/api/search", get(api::search))
        .route("/api/route", post(api::route))
        .with_state(app_state);

    let listener = match tokio::net::TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!(error = %err, addr = %config.bind_addr, "failed to bind listener");
            process::exit(1);
        }
    };
    info!(addr = %config.bind_addr, "listening");

    let server_fut = axum::serve(listener, app).with_graceful_shutdown(async {
        let _ = tokio::signal::ctrl_c().await;
        info!("shutdown signal received, no longer accepting new connections");
    });

    let refresh_shutdown_fut = async {
        let _ = tokio::signal::ctrl_c().await;
        info!("shutdown signal received, draining in-flight refresh cycle");
        refresh_task.shutdown().await;
    };

    let (serve_result, _) = tokio::join!(server_fut, refresh_shutdown_fut);
    if let Err(err) = serve_result {
        error!(error = %err, "server exited");
    }
    info!("shutdown complete");
}
