//! Log Shipper Library
//!
//! This library mirrors an application's `tracing` events to a remote
//! log-ingestion endpoint over HTTP:
//!
//! - **config**: Destination, credentials and queue settings
//! - **event**: The `LogEvent` wire model
//! - **queue**: Bounded event queue with backpressure
//! - **pending**: Wait-group used to drain the queue before exit
//! - **client**: HTTP client posting one event per request
//! - **sender**: Background thread delivering queued events in order
//! - **layer**: `tracing` layer feeding the queue
//! - **shipper**: The handle tying it all together
//!
//! # Example
//!
//! ```no_run
//! use log_shipper::Shipper;
//! use tracing_subscriber::prelude::*;
//!
//! // Start the sender thread
//! let shipper = Shipper::new("http://localhost:8080", "faketoken", "test");
//!
//! // Hook it into the application's subscriber
//! tracing_subscriber::registry().with(shipper.layer()).init();
//!
//! tracing::info!("test 1");
//! tracing::info!("test 2");
//!
//! // Make sure both events were attempted before exiting
//! shipper.wait_until_drained();
//! ```

// Module declarations
pub mod client;
pub mod config;
pub mod event;
pub mod layer;
pub mod pending;
pub mod queue;
pub mod sender;
pub mod shipper;

// Re-export commonly used types at crate root for convenience
pub use client::{IngestClient, SendError};
pub use config::{ConfigError, ShipperConfig};
pub use event::{LogEvent, LogLevel};
pub use layer::ShipperLayer;
pub use queue::QueueError;
pub use shipper::Shipper;
