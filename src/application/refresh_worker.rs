//! Background polling of the overview endpoint.

use std::sync::Arc;
use std::time::Duration;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info};

use crate::application::services::DashboardService;

/// Refreshes metric cards every `period`, and immediately on request.
///
/// The first refresh happens right away. Runs until the task is aborted.
///
/// # Example
///
/// ```rust,ignore
/// let worker = tokio::spawn(run_refresh_worker(dashboard.clone(), Duration::from_secs(30)));
/// // ...
/// worker.abort();
/// ```
pub async fn run_refresh_worker(service: Arc<DashboardService>, period: Duration) {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    info!(period_secs = period.as_secs(), "Refresh worker started");

    loop {
        tokio::select! {
            _ = ticker.tick() => debug!("Scheduled metrics refresh"),
            _ = service.refresh_requested() => {
                debug!("Requested metrics refresh");
                ticker.reset();
            }
        }

        service.refresh_metrics().await;
    }
}
