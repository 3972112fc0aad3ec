//! Data structures received from the dashboard backend.

pub mod overview;

pub use overview::{MonthlyEarning, Overview, OverviewEnvelope};
