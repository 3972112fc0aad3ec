//! Client side of the dashboard REST backend.

mod http_client;
mod service;

pub use http_client::{HttpOverviewClient, OVERVIEW_PATH};
#[cfg(test)]
pub use service::MockOverviewApi;
pub use service::{FetchError, OverviewApi};
