//! JSON view of the admin page data.

use axum::{
    Json,
    extract::{Query, State},
};

use crate::api::dto::overview::{OverviewResponse, YearQuery};
use crate::state::AppState;

/// Returns metric cards and the earning series as JSON.
///
/// # Endpoint
///
/// `GET /admin/overview.json?year=2025`
///
/// Metric values come from the last background refresh; the earning series
/// is fetched for the requested year. Backend failures never produce an
/// error status: the body carries the fallback data and an `error` message.
pub async fn overview_handler(
    State(state): State<AppState>,
    Query(query): Query<YearQuery>,
) -> Json<OverviewResponse> {
    let panel = state.dashboard_service.metric_panel().await;
    let chart = state.dashboard_service.earning_chart(query.year).await;

    Json(OverviewResponse {
        metrics: panel.into(),
        earnings: chart.into(),
    })
}
