//! Web-specific middleware.

pub mod route_guard;
