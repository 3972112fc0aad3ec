//! Infrastructure layer: credential storage and the backend HTTP client.
//!
//! # Modules
//!
//! - [`storage`] - [`storage::TokenStorage`] with file and memory backends
//! - [`backend`] - [`backend::OverviewApi`] and its reqwest implementation

pub mod backend;
pub mod storage;
