mod config;
mod data;
mod routes;

use axum::http::Method;
use compute::EarthquakeDataset;
use formats::FaultLines;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;
use crate::routes::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = ServerConfig::from_env()?;

    let (dataset, report) = EarthquakeDataset::load_csv(&config.data_path)?;
    info!(
        rows_read = report.rows_read,
        rows_kept = report.rows_kept,
        rows_dropped = report.rows_dropped,
        "loaded earthquake catalog from {}",
        config.data_path.display()
    );
    if dataset.is_empty() {
        warn!("earthquake catalog is empty; charts and maps will be blank");
    }

    let http = reqwest::Client::new();
    let faults = match data::load_faults(&http, &config.tectonic_source).await {
        Ok(faults) => {
            info!(
                lines = faults.len(),
                vertices = faults.vertex_count(),
                "loaded tectonic boundaries"
            );
            faults
        }
        Err(err) => {
            warn!("tectonic boundaries unavailable, fault layer will be empty: {err}");
            FaultLines::default()
        }
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS]);

    let app = routes::router(AppState::new(dataset, faults, config.dashboard))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!("dashboard server listening on http://{}", config.addr);
    axum::serve(listener, app).await?;
    Ok(())
}
