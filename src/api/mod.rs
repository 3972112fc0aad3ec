//! JSON endpoints and HTTP middleware.
//!
//! # Modules
//!
//! - [`dto`] - Response bodies
//! - [`handlers`] - Health check and overview JSON
//! - [`middleware`] - Tracing and rate limiting
//! - [`routes`] - Route configuration

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
