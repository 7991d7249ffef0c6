// ABOUTME: HTTP server binary exposing diet analysis, alerts, blocks and weekly trends
// ABOUTME: Loads configuration from the environment and optionally seeds the in-memory store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Nutrition Monitor Server Binary

use anyhow::{Context, Result};
use clap::Parser;
use nutrition_monitor::{
    config::ServerConfig,
    logging,
    notifications::LogNotifier,
    routes,
    services::NutritionMonitorService,
    storage::InMemoryStore,
};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "nutrition-monitor")]
#[command(about = "Nutrition overload and weekly trend monitoring service")]
struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// JSON seed file with `dietas` and `historial`
    #[arg(long)]
    seed: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(seed) = args.seed {
        config.seed_file = Some(seed);
    }

    logging::init_from_env()?;
    info!("Starting nutrition monitor");
    info!("{}", config.summary());

    let store = match &config.seed_file {
        Some(path) => Arc::new(InMemoryStore::load_seed(path).await?),
        None => {
            warn!("No seed file configured, starting with an empty store");
            Arc::new(InMemoryStore::new())
        }
    };

    let service = NutritionMonitorService::new(
        store.clone(),
        store.clone(),
        store,
        Arc::new(LogNotifier),
        &config.monitor,
    )
    .with_default_weeks(config.history_weeks);

    let app = routes::router(Arc::new(service));
    let addr = config.bind_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!(%addr, "Ready to serve nutrition analyses");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
}
