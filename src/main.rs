//! ship-logs - forward standard input to a log-ingestion endpoint
//!
//! Every line read from stdin is logged as an `info` event; the shipper
//! layer posts each one to the configured endpoint. Once stdin is closed the
//! process waits for all deliveries to be attempted and exits.
//!
//! ## Configuration
//!
//! Configuration is loaded from environment variables:
//!
//! - `LOG_SHIPPER_URL`: Ingestion endpoint URL
//! - `LOG_SHIPPER_TOKEN`: Bearer token
//! - `LOG_SHIPPER_ENV`: Environment tag (default: dev)
//! - `LOG_SHIPPER_QUEUE_CAPACITY`: Queued events before blocking (default: 20)
//! - `LOG_SHIPPER_REQUEST_TIMEOUT_SECS`: HTTP request timeout (default: 5)
//! - `RUST_LOG`: Logging level filter (default: info)

use std::io::{self, BufRead};

use tracing::{error, info};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use log_shipper::config::ShipperConfig;
use log_shipper::Shipper;

fn main() {
    // Load configuration from environment
    let config = match ShipperConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let shipper = Shipper::with_config(config);
    init_tracing(&shipper);

    let forwarded = forward_stdin();

    info!(lines = forwarded, "Input closed, draining log queue");
    shipper.wait_until_drained();
}

/// Initialize the tracing subscriber: console output on stderr plus the shipper.
fn init_tracing(shipper: &Shipper) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .with(shipper.layer())
        .init();
}

/// Log each stdin line as an event. Returns the number of lines forwarded.
fn forward_stdin() -> u64 {
    let stdin = io::stdin();
    let mut forwarded: u64 = 0;

    for line in stdin.lock().lines() {
        match line {
            Ok(line) if line.trim().is_empty() => {}
            Ok(line) => {
                info!(target: "stdin", "{}", line);
                forwarded += 1;
            }
            Err(e) => {
                error!(error = %e, "Failed to read from stdin");
                break;
            }
        }
    }

    forwarded
}
