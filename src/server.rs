//! HTTP server initialization and runtime setup.
//!
//! Handles token store selection, backend client setup, worker spawning, and
//! Axum server lifecycle.

use crate::api::middleware::rate_limit::RateLimit;
use crate::application::refresh_worker::run_refresh_worker;
use crate::application::services::{DashboardService, TokenManager};
use crate::config::Config;
use crate::infrastructure::backend::HttpOverviewClient;
use crate::infrastructure::storage::{FileStorage, MemoryStorage, TokenStorage};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Opens the token store selected by the configuration.
///
/// # Errors
///
/// Returns an error if the configured store file exists but cannot be read.
pub async fn open_token_storage(config: &Config) -> Result<Arc<dyn TokenStorage>> {
    match &config.token_store_path {
        Some(path) => {
            let storage = FileStorage::open(path)
                .await
                .with_context(|| format!("Failed to open token store {}", path.display()))?;
            tracing::info!("Token store opened at {}", path.display());
            Ok(Arc::new(storage))
        }
        None => {
            tracing::warn!("TOKEN_STORE_PATH not set, tokens are kept in memory only");
            Ok(Arc::new(MemoryStorage::new()))
        }
    }
}

/// Builds the dashboard service stack from configuration.
///
/// # Errors
///
/// Returns an error if the token store cannot be opened or the backend
/// client cannot be built.
pub async fn build_services(config: &Config) -> Result<(Arc<TokenManager>, Arc<DashboardService>)> {
    let storage = open_token_storage(config).await?;
    let token_manager = Arc::new(TokenManager::new(storage));

    let client = HttpOverviewClient::new(
        &config.api_base_url,
        config.request_timeout(),
        config.fetch_retry_attempts,
    )
    .context("Failed to create backend client")?;

    let dashboard_service = Arc::new(DashboardService::new(
        Arc::new(client),
        token_manager.clone(),
    ));

    Ok((token_manager, dashboard_service))
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Token store (file or memory)
/// - Backend HTTP client
/// - Background refresh worker
/// - Axum HTTP server with graceful shutdown on Ctrl+C
///
/// # Errors
///
/// Returns an error if:
/// - The token store cannot be opened
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let (token_manager, dashboard_service) = build_services(&config).await?;

    let worker = tokio::spawn(run_refresh_worker(
        dashboard_service.clone(),
        config.refresh_interval(),
    ));

    let state = AppState::new(token_manager, dashboard_service)
        .with_cookie_secure(config.cookie_secure)
        .with_reload_seconds(config.refresh_interval_seconds);

    let rate_limit = RateLimit::from_flags(config.rate_limit_enabled, config.behind_proxy);
    let app = app_router(state, rate_limit);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    worker.abort();
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
