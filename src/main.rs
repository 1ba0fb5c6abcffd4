// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! AIS Export API Server
//!
//! Serves AIS vessel position history as gzip-compressed CSV downloads,
//! queried by bounding box and time window.

use ais_export::{config::Config, services::validate, store::AisStore, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting AIS Export API");

    // Verify the store connection and compute its coverage once; both the
    // range and the example request are immutable for the process lifetime.
    let store = AisStore::connect(&config)
        .await
        .expect("Failed to connect to position-report store");
    let date_range = store
        .date_range()
        .await
        .expect("Failed to read store date range");
    tracing::info!(
        start = %date_range.start,
        end = %date_range.end,
        "Store coverage loaded"
    );

    let example_request = validate::build_example_request(&date_range);

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        store,
        date_range,
        example_request,
    });

    // Build router
    let app = ais_export::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ais_export=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
