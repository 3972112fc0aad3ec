//! Metric card view model.
//!
//! Maps the backend [`Overview`] into the four KPI cards shown at the top of
//! the admin page, together with the en-US number formatting they use.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::Overview;

/// Shown when the token store has no access token.
pub const AUTH_REQUIRED_MESSAGE: &str = "Authentication required";

/// Shown when the backend answers 401 or 403.
pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired. Please login again.";

/// Shown for any other metric fetch failure.
pub const METRICS_FAILED_MESSAGE: &str = "Failed to load dashboard data.";

/// Aggregated KPIs. All zero until the first successful fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MetricSummary {
    pub total_earnings: f64,
    pub total_users: u64,
    pub total_tokens: u64,
    pub total_products: u64,
}

impl From<&Overview> for MetricSummary {
    fn from(overview: &Overview) -> Self {
        Self {
            total_earnings: amount(overview.total_earnings),
            total_users: count(overview.total_users),
            total_tokens: count(overview.total_tokens_used),
            total_products: count(overview.total_affiliate_products),
        }
    }
}

/// Finite amount, or 0.
pub fn amount(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// Whole, non-negative count. Fractions are truncated; negative or
/// non-finite values count as 0.
pub fn count(value: Option<f64>) -> u64 {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => v.trunc() as u64,
        _ => 0,
    }
}

/// A single rendered KPI card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricCard {
    pub label: &'static str,
    pub value: String,
    /// Icon slot name; the stylesheet maps it to a glyph.
    pub icon: &'static str,
}

impl MetricSummary {
    /// Cards in display order.
    pub fn cards(&self) -> Vec<MetricCard> {
        vec![
            MetricCard {
                label: "Total Earning",
                value: format_currency(self.total_earnings),
                icon: "earnings",
            },
            MetricCard {
                label: "Total Users",
                value: format_number(self.total_users),
                icon: "users",
            },
            MetricCard {
                label: "Total Tokens",
                value: format_number(self.total_tokens),
                icon: "tokens",
            },
            MetricCard {
                label: "Total Products",
                value: format_number(self.total_products),
                icon: "products",
            },
        ]
    }
}

/// State of the metric card panel, shared between the refresh worker and
/// the page handlers.
#[derive(Debug, Clone, Serialize)]
pub struct MetricPanel {
    pub summary: MetricSummary,
    /// True until the first fetch attempt has finished.
    pub loading: bool,
    pub error: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for MetricPanel {
    fn default() -> Self {
        Self {
            summary: MetricSummary::default(),
            loading: true,
            error: None,
            updated_at: None,
        }
    }
}

/// Formats an integer with en-US thousands separators: `1234567` → `1,234,567`.
pub fn format_number(value: u64) -> String {
    group_thousands(&value.to_string())
}

/// Formats an amount as dollars with exactly two decimals: `1234.5` → `$1,234.50`.
///
/// Non-finite amounts render as `$0.00`.
pub fn format_currency(amount: f64) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };

    format!("${}{}.{}", sign, group_thousands(whole), cents)
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
