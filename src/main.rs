// Main entry point - Dependency injection and server setup
mod domain;
mod application;
mod infrastructure;
mod presentation;
#[cfg(test)]
mod test_support;

use std::sync::Arc;
use anyhow::Context;
use axum::{routing::get, Router};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::fleet_service::{FleetService, FleetSettings};
use crate::application::live_ticker::LiveFeed;
use crate::infrastructure::config::load_app_config;
use crate::infrastructure::memory_repository::InMemoryFleetRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    dashboard_stats, export_fuel, export_history, export_track, fuel, get_vessel, health_check,
    history, hourly, list_vessels, live_stream, track,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_app_config().context("failed to load config/fleet.toml")?;
    let addr = config.bind_addr()?;
    let simulation = &config.simulation;

    tracing::info!(
        "Simulating {} vessels, {} samples every {} minutes (seed: {:?})",
        config.vessels.len(),
        simulation.sample_count,
        simulation.interval_minutes,
        simulation.seed
    );

    // Generate the data set (infrastructure layer)
    let mut rng = match simulation.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let repository = InMemoryFleetRepository::generate(
        &config.vessels,
        &simulation.generator_config(),
        Utc::now(),
        &mut rng,
    )
    .context("generated history failed validation")?;

    // Create services (application layer)
    let fleet_service = FleetService::new(
        Arc::new(repository),
        FleetSettings {
            page_size: config.history.page_size,
            display_offset: config.history.display_offset(),
            seed: simulation.seed,
        },
    );
    let live_feed = Arc::new(LiveFeed::new(simulation.live_interval(), simulation.seed));

    // Create application state
    let state = Arc::new(AppState {
        fleet_service,
        live_feed: live_feed.clone(),
    });

    // Build router (presentation layer)
    // Compression is negotiated in the response builders, not by a layer
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/stats", get(dashboard_stats))
        .route("/history", get(history))
        .route("/history/export", get(export_history))
        .route("/vessels", get(list_vessels))
        .route("/vessels/:id", get(get_vessel))
        .route("/vessels/:id/hourly", get(hourly))
        .route("/vessels/:id/track", get(track))
        .route("/vessels/:id/track/export", get(export_track))
        .route("/vessels/:id/fuel", get(fuel))
        .route("/vessels/:id/fuel/export", get(export_fuel))
        .route("/vessels/:id/live", get(live_stream))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    tracing::info!("Starting fleet-telemetry service on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    live_feed.shutdown().await;
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
