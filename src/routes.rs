//! Top-level router configuration combining pages, JSON and middleware.
//!
//! # Route Structure
//!
//! - `GET  /`                     - Login page (public)
//! - `POST /login`, `POST /logout` - Session management
//! - `GET  /Forgot-Password` etc. - Public account pages
//! - `GET  /admin`                - Dashboard (token cookie required)
//! - `GET  /admin/overview.json`  - Dashboard data as JSON
//! - `GET  /health`               - Token store and refresh worker status
//! - `/static/*`                  - Static assets
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Route guard** - Cookie-presence redirects
//! - **Rate limiting** - Per-IP token bucket on `POST /login`
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::rate_limit::{self, RateLimit};
use crate::api::middleware::tracing;
use crate::state::AppState;
use crate::web;
use crate::web::middleware::route_guard;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// Constructs the application router with trailing-slash normalization.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `limit` - how `POST /login` is limited; [`RateLimit::Disabled`]
///   when no peer address information is available
pub fn app_router(state: AppState, limit: RateLimit) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(build_router(state, limit))
}

/// All routes and middleware, without path normalization.
fn build_router(state: AppState, limit: RateLimit) -> Router {
    let login = match limit {
        RateLimit::Disabled => web::routes::login_routes(),
        RateLimit::PeerIp => web::routes::login_routes().layer(rate_limit::login_layer()),
        RateLimit::Proxy => web::routes::login_routes().layer(rate_limit::login_proxy_layer()),
    };

    let admin = web::routes::admin_routes().merge(api::routes::admin_routes());

    Router::new()
        .merge(web::routes::public_routes())
        .merge(login)
        .nest("/admin", admin)
        .route("/health", get(health_handler))
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state)
        .layer(middleware::from_fn(route_guard::layer))
        .layer(tracing::layer())
}
