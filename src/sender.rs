//! Background sender loop.
//!
//! A single dedicated thread drains the queue in order and posts each event
//! on its own. Delivery failures are printed to standard output and dropped;
//! nothing is ever reported back to the code that logged the event.

use std::cell::Cell;
use std::thread;

use tokio::runtime::{Builder, Runtime};

use crate::client::{IngestClient, SendError};
use crate::config::ShipperConfig;
use crate::queue::EventReceiver;

/// Name of the sender thread.
pub const SENDER_THREAD_NAME: &str = "log-shipper-sender";

thread_local! {
    static DELIVERY_THREAD: Cell<bool> = const { Cell::new(false) };
}

/// Whether the current thread belongs to the delivery machinery.
///
/// Events logged from these threads (including HTTP-stack internals bridged
/// into `tracing`) must not be shipped, or delivery would feed itself.
pub fn is_delivery_thread() -> bool {
    DELIVERY_THREAD.with(Cell::get)
}

fn mark_delivery_thread() {
    DELIVERY_THREAD.with(|flag| flag.set(true));
}

/// Spawn the sender thread consuming `receiver`.
///
/// A spawn failure is printed and the receiver dropped, which closes the
/// queue so producers fail fast instead of blocking.
pub fn spawn(config: ShipperConfig, receiver: EventReceiver) {
    let spawned = thread::Builder::new()
        .name(SENDER_THREAD_NAME.to_string())
        .spawn(move || run(&config, receiver));

    if let Err(e) = spawned {
        println!("Failed to start log sender thread: {}", e);
    }
}

fn run(config: &ShipperConfig, receiver: EventReceiver) {
    mark_delivery_thread();

    let runtime = match build_runtime() {
        Ok(runtime) => runtime,
        Err(e) => {
            println!("Failed to start log sender runtime: {}", e);
            discard_loop(&receiver);
            return;
        }
    };

    let client = match IngestClient::new(config) {
        Ok(client) => client,
        Err(e) => {
            println!("Failed to build log ingestion client: {}", e);
            discard_loop(&receiver);
            return;
        }
    };

    sender_loop(&runtime, &client, &receiver);
}

fn build_runtime() -> std::io::Result<Runtime> {
    Builder::new_current_thread()
        .enable_all()
        .on_thread_start(mark_delivery_thread)
        .build()
}

/// Dequeue, post, count, repeat. Ends only when every producer is gone.
fn sender_loop(runtime: &Runtime, client: &IngestClient, receiver: &EventReceiver) {
    while let Some(event) = receiver.recv() {
        let result = runtime.block_on(client.post_batch(std::slice::from_ref(&event)));
        report(result);
        receiver.complete();
    }
}

/// Count every event as attempted without sending it.
fn discard_loop(receiver: &EventReceiver) {
    while receiver.recv().is_some() {
        println!("Dropping log event: sender is not running");
        receiver.complete();
    }
}

fn report(result: Result<(), SendError>) {
    match result {
        Ok(()) => {}
        Err(SendError::Status { code, body }) => {
            println!("Ingestion endpoint returned {}: {}", code, body);
        }
        Err(e) => {
            println!("Failed to send log to ingestion endpoint: {}", e);
        }
    }
}
