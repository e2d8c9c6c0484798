//! The shipper handle: owns the queue, the sender thread and the drain wait.

use std::sync::Arc;

use tracing::debug;

use crate::config::ShipperConfig;
use crate::layer::ShipperLayer;
use crate::pending::PendingCounter;
use crate::queue::{self, EventSender};
use crate::sender;

/// Bridge between the application's `tracing` events and a remote
/// ingestion endpoint.
///
/// Construct it once at startup, add [`layer`](Self::layer) to the
/// subscriber, and call [`wait_until_drained`](Self::wait_until_drained)
/// right before the process exits.
///
/// # Example
///
/// ```no_run
/// use log_shipper::Shipper;
/// use tracing_subscriber::prelude::*;
///
/// let shipper = Shipper::new("https://logs.example.com/api/v1/ingest", "token", "prod");
/// tracing_subscriber::registry().with(shipper.layer()).init();
///
/// tracing::info!("service started");
///
/// shipper.wait_until_drained();
/// ```
#[derive(Clone, Debug)]
pub struct Shipper {
    config: Arc<ShipperConfig>,
    queue: EventSender,
    pending: Arc<PendingCounter>,
}

impl Shipper {
    /// Create a shipper posting to `destination_url` with the default queue
    /// capacity (20) and request timeout (5s).
    ///
    /// None of the arguments are validated; an empty URL is accepted and
    /// every delivery to it simply fails.
    pub fn new(
        destination_url: impl Into<String>,
        auth_token: impl Into<String>,
        environment: impl Into<String>,
    ) -> Self {
        Self::with_config(ShipperConfig::new(destination_url, auth_token, environment))
    }

    /// Create a shipper from a full configuration and start its sender thread.
    pub fn with_config(config: ShipperConfig) -> Self {
        let pending = Arc::new(PendingCounter::new());
        let (queue, receiver) = queue::bounded(config.queue_capacity, pending.clone());

        sender::spawn(config.clone(), receiver);

        debug!(
            destination_url = %config.destination_url,
            environment = %config.environment,
            queue_capacity = config.queue_capacity,
            "Log shipper started"
        );

        Self {
            config: Arc::new(config),
            queue,
            pending,
        }
    }

    /// A `tracing` layer forwarding every event to this shipper.
    ///
    /// Add it to the application's subscriber once. Each returned layer
    /// shares this shipper's queue.
    pub fn layer(&self) -> ShipperLayer {
        ShipperLayer::new(self.queue.clone(), self.config.environment.clone())
    }

    /// Block until every queued event has had its delivery attempt.
    ///
    /// Returns immediately when nothing is pending. There is no timeout: with
    /// an unresponsive endpoint this can take up to the queue depth times the
    /// request timeout. Events logged after this returns may not be delivered.
    pub fn wait_until_drained(&self) {
        self.pending.wait();
        println!("All log events sent to the ingestion endpoint");
    }

    /// Number of events queued or in flight.
    pub fn pending(&self) -> usize {
        self.pending.count()
    }

    pub fn config(&self) -> &ShipperConfig {
        &self.config
    }
}
