//! Overview API trait and fetch errors.

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use thiserror::Error;

use crate::domain::entities::Overview;

/// Errors returned when talking to the dashboard backend.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Backend rejected the credentials (401 or 403).
    #[error("backend rejected credentials with status {0}")]
    Unauthorized(u16),

    #[error("backend returned status {0}")]
    Status(u16),

    #[error("network error: {0}")]
    Network(String),

    #[error("unexpected response body: {0}")]
    Decode(String),

    #[error("invalid backend URL: {0}")]
    Url(#[from] url::ParseError),
}

impl FetchError {
    /// Builds the error for a non-success HTTP status.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 | 403 => Self::Unauthorized(status),
            other => Self::Status(other),
        }
    }

    /// True when the session is no longer accepted by the backend.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }

    /// True for failures worth retrying within the same poll.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Status(code) => *code >= 500,
            _ => false,
        }
    }
}

/// Access to the backend overview endpoint.
///
/// # Implementations
///
/// - [`crate::infrastructure::backend::HttpOverviewClient`] - reqwest client
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OverviewApi: Send + Sync {
    /// Fetches `GET /api/dashboard/overview/`, adding `?year=` when given.
    ///
    /// `headers` are sent as-is; callers supply the bearer credentials.
    async fn fetch_overview(
        &self,
        year: Option<i32>,
        headers: HeaderMap,
    ) -> Result<Overview, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status() {
        assert!(FetchError::from_status(401).is_auth_failure());
        assert!(FetchError::from_status(403).is_auth_failure());
        assert!(!FetchError::from_status(404).is_auth_failure());
        assert!(matches!(FetchError::from_status(500), FetchError::Status(500)));
    }

    #[test]
    fn test_is_transient() {
        assert!(FetchError::Network("reset".into()).is_transient());
        assert!(FetchError::Status(502).is_transient());
        assert!(!FetchError::Status(404).is_transient());
        assert!(!FetchError::Unauthorized(401).is_transient());
        assert!(!FetchError::Decode("eof".into()).is_transient());
    }
}
