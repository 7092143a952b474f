// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Globalsport API Server
//!
//! Connects front-end users to Strava and proxies their activity list.

use globalsport_api::{config::Config, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment; all required values are checked here
    let config = Config::from_env().inspect_err(|e| {
        tracing::error!(error = %e, "Failed to load configuration");
    })?;
    tracing::info!(
        port = config.port,
        frontend_url = %config.frontend_url,
        "Starting Globalsport API"
    );

    let state = Arc::new(AppState::new(config.clone())?);

    // Build router
    let app = globalsport_api::routes::create_router(state);

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

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("globalsport_api=debug,info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .init();
}
