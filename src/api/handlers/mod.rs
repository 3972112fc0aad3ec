//! HTTP request handlers for JSON endpoints.

pub mod health;
pub mod overview;

pub use health::health_handler;
pub use overview::overview_handler;
