//! Overview payload returned by the dashboard backend.

use serde::Deserialize;
use serde_with::{DefaultOnError, DisplayFromStr, PickFirst, serde_as};

/// Response envelope of `GET /api/dashboard/overview/`.
///
/// The backend wraps every payload in a `data` object:
///
/// ```json
/// { "data": { "total_earnings": "1520.50", "total_users": 42, "monthly_data": [] } }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct OverviewEnvelope {
    pub data: Overview,
}

/// Aggregate dashboard figures.
///
/// Every field is optional: the backend omits or nulls figures it cannot
/// compute, and numbers may be serialized as strings (decimal columns).
/// Counts arrive as floats or decimal strings too, so they are kept as `f64`
/// until display. A value that is not a number decodes as `None` instead of
/// failing the whole payload.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Overview {
    #[serde(default)]
    #[serde_as(as = "DefaultOnError<Option<PickFirst<(_, DisplayFromStr)>>>")]
    pub total_earnings: Option<f64>,

    #[serde(default)]
    #[serde_as(as = "DefaultOnError<Option<PickFirst<(_, DisplayFromStr)>>>")]
    pub total_users: Option<f64>,

    #[serde(default)]
    #[serde_as(as = "DefaultOnError<Option<PickFirst<(_, DisplayFromStr)>>>")]
    pub total_tokens_used: Option<f64>,

    #[serde(default)]
    #[serde_as(as = "DefaultOnError<Option<PickFirst<(_, DisplayFromStr)>>>")]
    pub total_affiliate_products: Option<f64>,

    /// Per-month earnings. Only present when the request carried `?year=`.
    #[serde(default)]
    pub monthly_data: Option<Vec<MonthlyEarning>>,
}

/// Earnings for a single month. Null or unparsable earnings are `None`.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MonthlyEarning {
    pub month: String,

    #[serde(default)]
    #[serde_as(as = "DefaultOnError<Option<PickFirst<(_, DisplayFromStr)>>>")]
    pub earnings: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_full_envelope() {
        let body = json!({
            "data": {
                "total_earnings": 1520.5,
                "total_users": 42,
                "total_tokens_used": 90000,
                "total_affiliate_products": 7,
                "monthly_data": [
                    { "month": "Jan", "earnings": 100.0 },
                    { "month": "Feb", "earnings": 0 }
                ]
            }
        });

        let envelope: OverviewEnvelope = serde_json::from_value(body).unwrap();
        let data = envelope.data;

        assert_eq!(data.total_earnings, Some(1520.5));
        assert_eq!(data.total_users, Some(42.0));
        assert_eq!(data.total_tokens_used, Some(90000.0));
        assert_eq!(data.total_affiliate_products, Some(7.0));
        assert_eq!(data.monthly_data.unwrap().len(), 2);
    }

    #[test]
    fn test_parse_string_numbers() {
        let body = json!({
            "data": {
                "total_earnings": "99.95",
                "total_users": "12",
                "monthly_data": [{ "month": "Mar", "earnings": "10.25" }]
            }
        });

        let envelope: OverviewEnvelope = serde_json::from_value(body).unwrap();

        assert_eq!(envelope.data.total_earnings, Some(99.95));
        assert_eq!(envelope.data.total_users, Some(12.0));
        assert_eq!(
            envelope.data.monthly_data.unwrap()[0],
            MonthlyEarning {
                month: "Mar".to_string(),
                earnings: Some(10.25)
            }
        );
    }

    #[test]
    fn test_parse_float_and_decimal_string_counts() {
        let body = json!({
            "data": {
                "total_users": 42.0,
                "total_tokens_used": "1500.00",
                "total_affiliate_products": -3
            }
        });

        let data = serde_json::from_value::<OverviewEnvelope>(body).unwrap().data;

        assert_eq!(data.total_users, Some(42.0));
        assert_eq!(data.total_tokens_used, Some(1500.0));
        assert_eq!(data.total_affiliate_products, Some(-3.0));
    }

    #[test]
    fn test_bad_field_does_not_fail_payload() {
        let body = json!({
            "data": {
                "total_earnings": "n/a",
                "total_users": { "count": 5 },
                "total_tokens_used": 10,
                "monthly_data": [
                    { "month": "Jan", "earnings": null },
                    { "month": "Feb", "earnings": "oops" },
                    { "month": "Mar" },
                    { "month": "Apr", "earnings": 12.5 }
                ]
            }
        });

        let data = serde_json::from_value::<OverviewEnvelope>(body).unwrap().data;

        assert_eq!(data.total_earnings, None);
        assert_eq!(data.total_users, None);
        assert_eq!(data.total_tokens_used, Some(10.0));
        let earnings: Vec<_> = data
            .monthly_data
            .unwrap()
            .into_iter()
            .map(|m| m.earnings)
            .collect();
        assert_eq!(earnings, vec![None, None, None, Some(12.5)]);
    }

    #[test]
    fn test_parse_missing_and_null_fields() {
        let body = json!({ "data": { "total_users": null } });

        let envelope: OverviewEnvelope = serde_json::from_value(body).unwrap();

        assert_eq!(envelope.data.total_earnings, None);
        assert_eq!(envelope.data.total_users, None);
        assert!(envelope.data.monthly_data.is_none());
    }

    #[test]
    fn test_missing_data_is_an_error() {
        let result = serde_json::from_value::<OverviewEnvelope>(json!({ "status": "ok" }));
        assert!(result.is_err());
    }
}
