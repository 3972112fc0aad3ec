//! DTO for the JSON overview endpoint.

use serde::{Deserialize, Serialize};

use crate::domain::earnings::{EarningChart, EarningPoint};
use crate::domain::metrics::{MetricCard, MetricPanel};

/// Query string shared by the admin page and its JSON twin.
#[derive(Debug, Default, Deserialize)]
pub struct YearQuery {
    pub year: Option<i32>,
}

/// Response body of `GET /admin/overview.json`.
#[derive(Debug, Serialize)]
pub struct OverviewResponse {
    pub metrics: MetricsView,
    pub earnings: EarningsView,
}

#[derive(Debug, Serialize)]
pub struct MetricsView {
    #[serde(flatten)]
    pub panel: MetricPanel,
    pub cards: Vec<MetricCard>,
}

#[derive(Debug, Serialize)]
pub struct EarningsView {
    pub year: i32,
    pub years: Vec<i32>,
    pub series: Vec<EarningPoint>,
    pub max_label: String,
    pub domain_max: f64,
    pub error: Option<String>,
}

impl From<MetricPanel> for MetricsView {
    fn from(panel: MetricPanel) -> Self {
        Self {
            cards: panel.summary.cards(),
            panel,
        }
    }
}

impl From<EarningChart> for EarningsView {
    fn from(chart: EarningChart) -> Self {
        Self {
            max_label: chart.max_label(),
            domain_max: chart.domain_max(),
            year: chart.year,
            years: chart.years,
            series: chart.series,
            error: chart.error,
        }
    }
}
