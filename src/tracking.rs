//! Simulated order progression on a timer.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{error, info, info_span, warn, Instrument};

use crate::clients::OrderClient;
use crate::order_actor::OrderError;

/// Advances an order one status step per period until it is delivered.
pub struct StatusTracker;

impl StatusTracker {
    pub fn start(orders: OrderClient, order_id: String, period: Duration) -> TrackingHandle {
        let span = info_span!("status_tracker", order_id = %order_id);
        let task = tokio::spawn(Self::run(orders, order_id.clone(), period).instrument(span));
        TrackingHandle { order_id, task }
    }

    async fn run(orders: OrderClient, order_id: String, period: Duration) {
        let mut ticker = tokio::time::interval(period);
        // The first tick completes immediately.
        ticker.tick().await;
        info!(period_ms = period.as_millis() as u64, "Tracking started");

        loop {
            ticker.tick().await;
            match orders.advance_status(order_id.clone()).await {
                Ok(status) if status.is_terminal() => {
                    info!("Order delivered, tracking finished");
                    break;
                }
                Ok(_) => {}
                Err(OrderError::NotFound(_)) => {
                    warn!("Order no longer exists, tracking stopped");
                    break;
                }
                Err(e) => {
                    error!(error = %e, "Status update failed, tracking stopped");
                    break;
                }
            }
        }
    }
}

/// Owns a running tracker. Cancelling or dropping the handle stops the timer.
#[derive(Debug)]
pub struct TrackingHandle {
    order_id: String,
    task: JoinHandle<()>,
}

impl TrackingHandle {
    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    pub fn cancel(self) {
        info!(order_id = %self.order_id, "Tracking cancelled");
        // Drop aborts the task.
    }
}

impl Drop for TrackingHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
