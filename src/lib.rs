//! # Admin Dashboard
//!
//! A server-rendered admin dashboard built with Axum: metric cards and an
//! earning bar chart fed by polling a REST backend, behind a cookie-based
//! route guard.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Backend payloads, view models, route decisions
//! - **Application Layer** ([`application`]) - Token management, data fetching, polling
//! - **Infrastructure Layer** ([`infrastructure`]) - Token storage and backend HTTP client
//! - **API Layer** ([`api`]) - JSON endpoints and HTTP middleware
//! - **Web Layer** ([`web`]) - HTML pages and the route guard
//!
//! ## Quick Start
//!
//! ```bash
//! export API_BASE_URL="https://api.example.com"
//! export TOKEN_STORE_PATH="./tokens.json"   # Optional
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;

pub mod config;
pub mod server;

pub mod routes;
pub mod web;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{DashboardService, TokenManager};
    pub use crate::domain::earnings::{EarningChart, EarningPoint};
    pub use crate::domain::entities::{MonthlyEarning, Overview};
    pub use crate::domain::metrics::{MetricPanel, MetricSummary};
    pub use crate::error::AppError;
    pub use crate::infrastructure::backend::{FetchError, OverviewApi};
    pub use crate::infrastructure::storage::{MemoryStorage, TokenStorage};
    pub use crate::state::AppState;
}
