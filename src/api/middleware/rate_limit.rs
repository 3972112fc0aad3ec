//! Rate limiting for the login form, using a token bucket per client IP.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{PeerIpKeyExtractor, SmartIpKeyExtractor},
};

/// Login attempts replenished per second.
const LOGIN_PER_SECOND: u64 = 1;

/// Login attempts allowed in a burst.
const LOGIN_BURST: u32 = 5;

/// How the rate limiter identifies clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimit {
    /// No limiting (tests, or a proxy that already limits).
    Disabled,
    /// Key on the socket peer address.
    PeerIp,
    /// Key on `X-Forwarded-For` / `X-Real-IP`, falling back to the peer address.
    Proxy,
}

impl RateLimit {
    pub fn from_flags(enabled: bool, behind_proxy: bool) -> Self {
        match (enabled, behind_proxy) {
            (false, _) => Self::Disabled,
            (true, false) => Self::PeerIp,
            (true, true) => Self::Proxy,
        }
    }
}

/// Limits `POST /login` per peer IP.
///
/// # Limits
///
/// - **Rate**: 1 request per second
/// - **Burst**: 5 requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
pub fn login_layer()
-> GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(LOGIN_PER_SECOND)
            .burst_size(LOGIN_BURST)
            .finish()
            .expect("login rate limit quota is non-zero"),
    );

    GovernorLayer::new(governor_conf)
}

/// Same limits as [`login_layer`], keyed on proxy headers.
pub fn login_proxy_layer()
-> GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(LOGIN_PER_SECOND)
            .burst_size(LOGIN_BURST)
            .key_extractor(SmartIpKeyExtractor)
            .finish()
            .expect("login rate limit quota is non-zero"),
    );

    GovernorLayer::new(governor_conf)
}
