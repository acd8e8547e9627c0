//! # CLI Server
//!
//! Server startup and management for the volley CLI.

use std::{net::SocketAddr, time::Duration};

use anyhow::anyhow;
use error::Result;
use sea_orm::{ConnectOptions, Database};
use server::{create_app_router, AppState, CorsConfig, ServerResult};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::{
    commands::ServeArgs,
    config::{parse_socket_addr, resolve_port, DatabaseConfig, PROXY_PORT_ENV},
};

/// Starts the API server
///
/// # Arguments
///
/// * `config` - Database configuration
/// * `args` - Serve command arguments
///
/// # Returns
///
/// A `Result` indicating success or failure.
pub async fn serve(config: &DatabaseConfig, args: &ServeArgs) -> Result<()> {
    info!(target: "serve", "Starting API server...");

    let proxy_port = std::env::var(PROXY_PORT_ENV).ok();
    let port = resolve_port(args.port, proxy_port.as_deref()).map_err(|e| anyhow!("{}", e))?;
    let address = parse_socket_addr(&args.host, port).map_err(|e| anyhow!("Invalid address {}:{}: {}", args.host, port, e))?;

    info!(target: "serve", database = %config.describe(), "Connecting to database...");
    let mut options = ConnectOptions::new(config.database_url());
    options
        .max_connections(config.pool_size)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .map_err(|e| anyhow!("Failed to connect to database: {}", e))?;

    let cache = args.cache_config();
    info!(
        target: "serve",
        catalog_ttl_secs = cache.catalog_ttl.as_secs(),
        actions_ttl_secs = cache.actions_ttl.as_secs(),
        capacity = cache.max_entries,
        "Query cache configured"
    );

    let app = create_app_router(AppState::new(db, cache), CorsConfig::from_env());
    serve_http(app, &address).await
}

/// Serves the application over HTTP until a shutdown signal arrives
async fn serve_http(app: axum::Router, address: &SocketAddr) -> Result<()> {
    let listener = TcpListener::bind(address)
        .await
        .map_err(|e| anyhow!("Failed to bind to {}: {}", address, e))?;

    let started = ServerResult::new(&address.to_string());
    info!(target: "serve", address = %started.address, started_at = %started.started_at, "Starting HTTP server...");

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow!("HTTP server error: {}", e))?;

    info!(target: "serve", "Server stopped");
    Ok(())
}

/// Waits for shutdown signals (Ctrl+C or SIGTERM)
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(target: "serve", error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                warn!(target: "serve", error = %e, "Failed to install terminate handler");
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!(target: "serve", "Received shutdown signal");
}
