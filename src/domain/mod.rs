//! Domain layer: backend payloads and the pure logic built on them.
//!
//! Nothing here performs I/O, so every rule can be unit tested directly.
//!
//! # Modules
//!
//! - [`entities`] - Overview payload returned by the backend
//! - [`metrics`] - Metric card view model and number formatting
//! - [`earnings`] - Earning chart series, fallback and bar layout
//! - [`route_guard`] - Token-based allow/redirect decision

pub mod earnings;
pub mod entities;
pub mod metrics;
pub mod route_guard;
