//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: Token store usable, last backend poll did not fail
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "token_store": { "status": "ok" },
///     "refresh_worker": { "status": "ok", "message": "Last refresh: 2026-10-18T09:00:00Z" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let store_check = check_token_store(&state).await;
    let worker_check = check_refresh_worker(&state).await;

    let all_healthy = store_check.status == "ok" && worker_check.status != "error";

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            token_store: store_check,
            refresh_worker: worker_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_token_store(state: &AppState) -> CheckStatus {
    if state.token_manager.storage().health_check().await {
        CheckStatus {
            status: "ok".to_string(),
            message: None,
        }
    } else {
        CheckStatus {
            status: "error".to_string(),
            message: Some("Token store is not writable".to_string()),
        }
    }
}

/// Reports the outcome of the most recent metrics poll.
///
/// A missing token is `idle`, not an error: nothing can be fetched until an
/// administrator logs in.
async fn check_refresh_worker(state: &AppState) -> CheckStatus {
    let panel = state.dashboard_service.metric_panel().await;

    if panel.loading {
        return CheckStatus {
            status: "pending".to_string(),
            message: Some("No refresh completed yet".to_string()),
        };
    }

    if !state.token_manager.is_authenticated().await {
        return CheckStatus {
            status: "idle".to_string(),
            message: panel.error,
        };
    }

    match panel.error {
        Some(error) => CheckStatus {
            status: "error".to_string(),
            message: Some(error),
        },
        None => CheckStatus {
            status: "ok".to_string(),
            message: panel
                .updated_at
                .map(|at| format!("Last refresh: {}", at.to_rfc3339())),
        },
    }
}
