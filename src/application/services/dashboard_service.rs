//! Fetch, map and fall back: the data side of the admin page.

use chrono::{Datelike, Utc};
use std::sync::Arc;
use tokio::sync::{Notify, RwLock};
use tracing::{debug, info, warn};

use crate::application::services::TokenManager;
use crate::domain::earnings::{
    EARNINGS_FAILED_MESSAGE, EarningChart, map_monthly, resolve_year, year_options,
};
use crate::domain::metrics::{
    AUTH_REQUIRED_MESSAGE, METRICS_FAILED_MESSAGE, MetricPanel, MetricSummary,
    SESSION_EXPIRED_MESSAGE,
};
use crate::infrastructure::backend::{FetchError, OverviewApi};

/// Loads dashboard figures from the backend and shapes them for display.
///
/// Metric cards are cached in a shared [`MetricPanel`] refreshed by
/// [`crate::application::refresh_worker`]; the earning chart is fetched on
/// demand for the selected year.
pub struct DashboardService {
    api: Arc<dyn OverviewApi>,
    tokens: Arc<TokenManager>,
    panel: RwLock<MetricPanel>,
    refresh: Notify,
}

impl DashboardService {
    pub fn new(api: Arc<dyn OverviewApi>, tokens: Arc<TokenManager>) -> Self {
        Self {
            api,
            tokens,
            panel: RwLock::new(MetricPanel::default()),
            refresh: Notify::new(),
        }
    }

    /// Current metric card state.
    pub async fn metric_panel(&self) -> MetricPanel {
        self.panel.read().await.clone()
    }

    /// Fetches the overview and updates the metric panel.
    ///
    /// On failure the previous summary is kept and only the error message
    /// changes. Without an access token no request is sent and the figures
    /// of any previous session are dropped.
    pub async fn refresh_metrics(&self) -> MetricPanel {
        if !self.tokens.is_authenticated().await {
            debug!("Skipping metrics refresh: no access token");
            return self
                .update_panel(|panel| {
                    panel.summary = MetricSummary::default();
                    panel.updated_at = None;
                    panel.error = Some(AUTH_REQUIRED_MESSAGE.to_string());
                })
                .await;
        }

        let headers = self.tokens.auth_config(Default::default()).await;

        match self.api.fetch_overview(None, headers).await {
            Ok(overview) => {
                let summary = MetricSummary::from(&overview);
                record_fetch("metrics", "ok");
                info!(
                    users = summary.total_users,
                    tokens = summary.total_tokens,
                    "Dashboard metrics refreshed"
                );
                self.update_panel(|panel| {
                    panel.summary = summary;
                    panel.error = None;
                    panel.updated_at = Some(Utc::now());
                })
                .await
            }
            Err(e) => {
                warn!("Error fetching dashboard data: {}", e);
                record_fetch("metrics", outcome(&e));
                let message = if e.is_auth_failure() {
                    SESSION_EXPIRED_MESSAGE
                } else {
                    METRICS_FAILED_MESSAGE
                };
                self.update_panel(|panel| {
                    panel.error = Some(message.to_string());
                })
                .await
            }
        }
    }

    async fn update_panel(&self, apply: impl FnOnce(&mut MetricPanel)) -> MetricPanel {
        let mut panel = self.panel.write().await;
        apply(&mut panel);
        panel.loading = false;
        panel.clone()
    }

    /// Earning chart for `requested_year`, using the wall-clock year.
    pub async fn earning_chart(&self, requested_year: Option<i32>) -> EarningChart {
        self.earning_chart_at(requested_year, Utc::now().year())
            .await
    }

    /// Earning chart relative to an explicit current year.
    ///
    /// Any failure yields the twelve-month zeroed series with a message.
    pub async fn earning_chart_at(
        &self,
        requested_year: Option<i32>,
        current_year: i32,
    ) -> EarningChart {
        let year = resolve_year(requested_year, current_year);

        if !self.tokens.is_authenticated().await {
            return EarningChart::fallback(year, current_year, AUTH_REQUIRED_MESSAGE);
        }

        let headers = self.tokens.auth_config(Default::default()).await;

        let result = self
            .api
            .fetch_overview(Some(year), headers)
            .await
            .and_then(|overview| {
                overview
                    .monthly_data
                    .ok_or_else(|| FetchError::Decode("missing monthly_data".to_string()))
            });

        match result {
            Ok(monthly) => {
                record_fetch("earnings", "ok");
                EarningChart {
                    year,
                    years: year_options(current_year),
                    series: map_monthly(&monthly),
                    error: None,
                }
            }
            Err(e) => {
                warn!(year, "Error fetching earning data: {}", e);
                record_fetch("earnings", outcome(&e));
                let message = if e.is_auth_failure() {
                    SESSION_EXPIRED_MESSAGE
                } else {
                    EARNINGS_FAILED_MESSAGE
                };
                EarningChart::fallback(year, current_year, message)
            }
        }
    }

    /// Asks the refresh worker to poll now instead of waiting for the next tick.
    pub fn request_refresh(&self) {
        self.refresh.notify_one();
    }

    /// Resolves when [`Self::request_refresh`] has been called.
    pub async fn refresh_requested(&self) {
        self.refresh.notified().await;
    }
}

fn outcome(e: &FetchError) -> &'static str {
    if e.is_auth_failure() {
        "unauthorized"
    } else {
        "error"
    }
}

fn record_fetch(panel: &'static str, outcome: &'static str) {
    metrics::counter!("dashboard_fetch_total", "panel" => panel, "outcome" => outcome)
        .increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{MonthlyEarning, Overview};
    use crate::infrastructure::backend::MockOverviewApi;
    use crate::infrastructure::storage::MemoryStorage;
    use reqwest::header::AUTHORIZATION;

    async fn service_with(mock: MockOverviewApi, token: Option<&str>) -> DashboardService {
        let tokens = Arc::new(TokenManager::new(Arc::new(MemoryStorage::new())));
        if let Some(token) = token {
            tokens.set_tokens(token, None).await.unwrap();
        }
        DashboardService::new(Arc::new(mock), tokens)
    }

    fn overview() -> Overview {
        Overview {
            total_earnings: Some(1520.5),
            total_users: Some(42.0),
            total_tokens_used: Some(9000.0),
            total_affiliate_products: None,
            monthly_data: Some(vec![
                MonthlyEarning {
                    month: "Jan".to_string(),
                    earnings: Some(100.0),
                },
                MonthlyEarning {
                    month: "Feb".to_string(),
                    earnings: Some(0.0),
                },
            ]),
        }
    }

    #[tokio::test]
    async fn test_refresh_metrics_success() {
        let mut mock = MockOverviewApi::new();
        mock.expect_fetch_overview()
            .withf(|year, headers| {
                year.is_none() && headers[AUTHORIZATION] == "Bearer tok"
            })
            .times(1)
            .returning(|_, _| Ok(overview()));

        let service = service_with(mock, Some("tok")).await;
        let panel = service.refresh_metrics().await;

        assert!(!panel.loading);
        assert!(panel.error.is_none());
        assert!(panel.updated_at.is_some());
        assert_eq!(panel.summary.total_earnings, 1520.5);
        assert_eq!(panel.summary.total_users, 42);
        assert_eq!(panel.summary.total_products, 0);
    }

    #[tokio::test]
    async fn test_refresh_metrics_without_token_sends_nothing() {
        let mut mock = MockOverviewApi::new();
        mock.expect_fetch_overview().times(0);

        let service = service_with(mock, None).await;
        let panel = service.refresh_metrics().await;

        assert!(!panel.loading);
        assert_eq!(panel.error.as_deref(), Some(AUTH_REQUIRED_MESSAGE));
        assert_eq!(panel.summary, MetricSummary::default());
    }

    #[tokio::test]
    async fn test_refresh_metrics_after_logout_drops_previous_figures() {
        let mut mock = MockOverviewApi::new();
        mock.expect_fetch_overview()
            .times(1)
            .returning(|_, _| Ok(overview()));

        let service = service_with(mock, Some("tok")).await;
        assert_eq!(service.refresh_metrics().await.summary.total_users, 42);

        service.tokens.clear_tokens().await.unwrap();
        let panel = service.refresh_metrics().await;

        assert_eq!(panel.error.as_deref(), Some(AUTH_REQUIRED_MESSAGE));
        assert_eq!(panel.summary, MetricSummary::default());
        assert!(panel.updated_at.is_none());
    }

    #[tokio::test]
    async fn test_refresh_metrics_session_expired_keeps_last_summary() {
        let mut mock = MockOverviewApi::new();
        let mut seq = mockall::Sequence::new();
        mock.expect_fetch_overview()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(overview()));
        mock.expect_fetch_overview()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Err(FetchError::Unauthorized(401)));

        let service = service_with(mock, Some("tok")).await;
        service.refresh_metrics().await;
        let panel = service.refresh_metrics().await;

        assert_eq!(panel.error.as_deref(), Some(SESSION_EXPIRED_MESSAGE));
        assert_eq!(panel.summary.total_users, 42);
    }

    #[tokio::test]
    async fn test_refresh_metrics_generic_failure() {
        let mut mock = MockOverviewApi::new();
        mock.expect_fetch_overview()
            .returning(|_, _| Err(FetchError::Status(500)));

        let service = service_with(mock, Some("tok")).await;
        let panel = service.refresh_metrics().await;

        assert_eq!(panel.error.as_deref(), Some(METRICS_FAILED_MESSAGE));
        assert_eq!(panel.summary, MetricSummary::default());
    }

    #[tokio::test]
    async fn test_earning_chart_success() {
        let mut mock = MockOverviewApi::new();
        mock.expect_fetch_overview()
            .withf(|year, _| *year == Some(2024))
            .times(1)
            .returning(|_, _| Ok(overview()));

        let service = service_with(mock, Some("tok")).await;
        let chart = service.earning_chart_at(Some(2024), 2026).await;

        assert_eq!(chart.year, 2024);
        assert_eq!(chart.years, vec![2022, 2023, 2024, 2025, 2026]);
        assert!(chart.error.is_none());
        assert_eq!(chart.series.len(), 2);
        assert!(chart.series[0].active);
        assert!(!chart.series[1].active);
    }

    #[tokio::test]
    async fn test_earning_chart_out_of_range_year_uses_current() {
        let mut mock = MockOverviewApi::new();
        mock.expect_fetch_overview()
            .withf(|year, _| *year == Some(2026))
            .times(1)
            .returning(|_, _| Ok(overview()));

        let service = service_with(mock, Some("tok")).await;
        let chart = service.earning_chart_at(Some(1999), 2026).await;

        assert_eq!(chart.year, 2026);
    }

    #[tokio::test]
    async fn test_earning_chart_fallbacks() {
        let mut mock = MockOverviewApi::new();
        mock.expect_fetch_overview().times(0);
        let chart = service_with(mock, None).await.earning_chart_at(None, 2026).await;
        assert_eq!(chart.error.as_deref(), Some(AUTH_REQUIRED_MESSAGE));
        assert_eq!(chart.series.len(), 12);

        let mut mock = MockOverviewApi::new();
        mock.expect_fetch_overview()
            .returning(|_, _| Err(FetchError::Unauthorized(403)));
        let chart = service_with(mock, Some("tok")).await.earning_chart_at(None, 2026).await;
        assert_eq!(chart.error.as_deref(), Some(SESSION_EXPIRED_MESSAGE));
        assert_eq!(chart.series.len(), 12);

        let mut mock = MockOverviewApi::new();
        mock.expect_fetch_overview()
            .returning(|_, _| Err(FetchError::Network("refused".into())));
        let chart = service_with(mock, Some("tok")).await.earning_chart_at(None, 2026).await;
        assert_eq!(chart.error.as_deref(), Some(EARNINGS_FAILED_MESSAGE));
        assert!(chart.series.iter().all(|p| p.value == 0.0));
    }

    #[tokio::test]
    async fn test_earning_chart_missing_monthly_data_falls_back() {
        let mut mock = MockOverviewApi::new();
        mock.expect_fetch_overview()
            .returning(|_, _| Ok(Overview::default()));

        let service = service_with(mock, Some("tok")).await;
        let chart = service.earning_chart_at(None, 2026).await;

        assert_eq!(chart.error.as_deref(), Some(EARNINGS_FAILED_MESSAGE));
        assert_eq!(chart.series.len(), 12);
    }
}
