//! JSON route configuration.

use crate::api::handlers::overview_handler;
use crate::state::AppState;
use axum::{Router, routing::get};

/// JSON routes nested under `/admin`, behind the route guard.
///
/// # Endpoints
///
/// - `GET /overview.json` - Metric cards and earning series
pub fn admin_routes() -> Router<AppState> {
    Router::new().route("/overview.json", get(overview_handler))
}
