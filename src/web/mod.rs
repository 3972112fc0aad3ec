//! Web dashboard layer for browser-based UI.
//!
//! Server-side rendered pages built with Askama templates.
//!
//! # Modules
//!
//! - [`handlers`] - Template rendering handlers
//! - [`middleware`] - Cookie route guard
//! - [`routes`] - Page route configuration

pub mod handlers;
pub mod middleware;
pub mod routes;
