//! Earning overview chart: series mapping, fallback and bar geometry.

use serde::Serialize;

use crate::domain::entities::MonthlyEarning;
use crate::domain::metrics::amount;

/// Shown for any earning fetch failure other than an expired session.
pub const EARNINGS_FAILED_MESSAGE: &str = "Failed to load earning data. Showing fallback data.";

/// Month labels used by the fallback series.
pub const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Number of selectable years, ending with the current one.
pub const YEAR_SPAN: i32 = 5;

pub const CHART_WIDTH: f64 = 737.0;
pub const CHART_HEIGHT: f64 = 161.0;
pub const BAR_WIDTH: f64 = 40.0;

/// Headroom above the tallest bar.
const DOMAIN_HEADROOM: f64 = 1.2;

/// One month of the chart series.
///
/// `height` drives the bar, `value` drives the tooltip; both carry the
/// month's earnings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EarningPoint {
    pub month: String,
    pub height: f64,
    pub value: f64,
    pub active: bool,
}

/// Maps backend monthly data to chart points, preserving order.
pub fn map_monthly(data: &[MonthlyEarning]) -> Vec<EarningPoint> {
    data.iter()
        .map(|item| {
            let earnings = amount(item.earnings);
            EarningPoint {
                month: item.month.clone(),
                height: earnings,
                value: earnings,
                active: earnings > 0.0,
            }
        })
        .collect()
}

/// Twelve zeroed, inactive months.
pub fn fallback_series() -> Vec<EarningPoint> {
    MONTHS
        .iter()
        .map(|month| EarningPoint {
            month: (*month).to_string(),
            height: 0.0,
            value: 0.0,
            active: false,
        })
        .collect()
}

/// The current year and the four before it, oldest first.
pub fn year_options(current_year: i32) -> Vec<i32> {
    ((current_year - YEAR_SPAN + 1)..=current_year).collect()
}

/// Picks the requested year if it is selectable, otherwise the current year.
pub fn resolve_year(requested: Option<i32>, current_year: i32) -> i32 {
    match requested {
        Some(year) if year_options(current_year).contains(&year) => year,
        _ => current_year,
    }
}

/// Chart view model for a selected year.
#[derive(Debug, Clone, Serialize)]
pub struct EarningChart {
    pub year: i32,
    pub years: Vec<i32>,
    pub series: Vec<EarningPoint>,
    pub error: Option<String>,
}

/// A positioned SVG bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartBar {
    pub month: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Horizontal centre of the slot, used for the month label.
    pub label_x: f64,
    pub active: bool,
    pub tooltip: String,
}

impl EarningChart {
    /// Builds a chart with the zeroed series and an error banner.
    pub fn fallback(year: i32, current_year: i32, error: impl Into<String>) -> Self {
        Self {
            year,
            years: year_options(current_year),
            series: fallback_series(),
            error: Some(error.into()),
        }
    }

    /// Largest value in the series, `None` when empty.
    pub fn max_value(&self) -> Option<f64> {
        self.series.iter().map(|p| p.value).reduce(f64::max)
    }

    /// Dashed-line label, e.g. `$1520.50`. Empty for an empty series.
    pub fn max_label(&self) -> String {
        self.max_value()
            .map(|max| format!("${:.2}", max))
            .unwrap_or_default()
    }

    /// Upper bound of the Y axis.
    pub fn domain_max(&self) -> f64 {
        self.max_value().unwrap_or(0.0).max(0.0) * DOMAIN_HEADROOM
    }

    /// Lays the series out on a [`CHART_WIDTH`] x [`CHART_HEIGHT`] canvas.
    pub fn bars(&self) -> Vec<ChartBar> {
        if self.series.is_empty() {
            return Vec::new();
        }

        let slot = CHART_WIDTH / self.series.len() as f64;
        let width = BAR_WIDTH.min(slot * 0.8);
        let domain = self.domain_max();

        self.series
            .iter()
            .enumerate()
            .map(|(i, point)| {
                let height = if domain > 0.0 {
                    point.height.max(0.0) / domain * CHART_HEIGHT
                } else {
                    0.0
                };
                let slot_start = slot * i as f64;

                ChartBar {
                    month: point.month.clone(),
                    x: round2(slot_start + (slot - width) / 2.0),
                    y: round2(CHART_HEIGHT - height),
                    width: round2(width),
                    height: round2(height),
                    label_x: round2(slot_start + slot / 2.0),
                    active: point.active,
                    tooltip: format!("Earning: ${:.2}", point.value),
                }
            })
            .collect()
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
