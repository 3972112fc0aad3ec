//! Shared application state for Axum handlers.

use std::sync::Arc;

use crate::application::services::{DashboardService, TokenManager};

/// Shared state injected into every handler and middleware.
///
/// Cheap to clone: every field is reference-counted.
#[derive(Clone)]
pub struct AppState {
    pub token_manager: Arc<TokenManager>,
    pub dashboard_service: Arc<DashboardService>,
    /// Adds `Secure` to the session cookie.
    pub cookie_secure: bool,
    /// Page auto-reload period for the admin page.
    pub reload_seconds: u64,
}

impl AppState {
    pub fn new(token_manager: Arc<TokenManager>, dashboard_service: Arc<DashboardService>) -> Self {
        Self {
            token_manager,
            dashboard_service,
            cookie_secure: false,
            reload_seconds: 30,
        }
    }

    pub fn with_cookie_secure(mut self, secure: bool) -> Self {
        self.cookie_secure = secure;
        self
    }

    pub fn with_reload_seconds(mut self, seconds: u64) -> Self {
        self.reload_seconds = seconds;
        self
    }
}
