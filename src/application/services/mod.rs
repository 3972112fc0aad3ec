//! Business logic services for the application layer.

pub mod dashboard_service;
pub mod token_manager;

pub use dashboard_service::DashboardService;
pub use token_manager::{TokenError, TokenManager};
