//! Admin home: metric cards and earning overview chart.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};

use crate::api::dto::overview::YearQuery;
use crate::domain::earnings::{CHART_HEIGHT, CHART_WIDTH, ChartBar};
use crate::domain::metrics::MetricCard;
use crate::state::AppState;

/// Template for the admin home page.
///
/// Renders `templates/admin.html`:
/// - four metric cards, or skeletons while the first refresh is pending
/// - warning banners for metric and chart errors
/// - the earning chart as inline SVG with a year selector
#[derive(Template, WebTemplate)]
#[template(path = "admin.html")]
pub struct AdminTemplate {
    pub loading: bool,
    pub cards: Vec<MetricCard>,
    pub metrics_error: Option<String>,
    pub updated_at: Option<String>,
    pub year: i32,
    pub year_options: Vec<YearOption>,
    pub bars: Vec<ChartBar>,
    pub max_label: String,
    pub chart_error: Option<String>,
    pub chart_width: f64,
    pub chart_height: f64,
    /// Seconds between page reloads, matching the refresh worker period.
    pub reload_seconds: u64,
}

/// Entry of the year selector.
pub struct YearOption {
    pub value: i32,
    pub selected: bool,
}

/// Renders the admin home page.
///
/// # Endpoint
///
/// `GET /admin?year=2025`
///
/// Metric cards come from the background refresh; the chart is fetched for
/// the selected year on every request.
pub async fn admin_handler(
    State(state): State<AppState>,
    Query(query): Query<YearQuery>,
) -> impl IntoResponse {
    let panel = state.dashboard_service.metric_panel().await;
    let chart = state.dashboard_service.earning_chart(query.year).await;

    AdminTemplate {
        loading: panel.loading,
        cards: panel.summary.cards(),
        metrics_error: panel.error,
        updated_at: panel
            .updated_at
            .map(|at| at.format("%Y-%m-%d %H:%M:%S UTC").to_string()),
        year: chart.year,
        bars: chart.bars(),
        max_label: chart.max_label(),
        year_options: chart
            .years
            .iter()
            .map(|&value| YearOption {
                value,
                selected: value == chart.year,
            })
            .collect(),
        chart_error: chart.error,
        chart_width: CHART_WIDTH,
        chart_height: CHART_HEIGHT,
        reload_seconds: state.reload_seconds,
    }
}
