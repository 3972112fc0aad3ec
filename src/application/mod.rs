//! Application layer services implementing business logic.
//!
//! This layer coordinates the token store and the backend client, and turns
//! their results into view models for the web handlers.
//!
//! # Available Services
//!
//! - [`services::token_manager::TokenManager`] - Access/refresh token storage and bearer headers
//! - [`services::dashboard_service::DashboardService`] - Metric cards and earning chart data
//! - [`refresh_worker`] - Periodic metric polling

pub mod refresh_worker;
pub mod services;
