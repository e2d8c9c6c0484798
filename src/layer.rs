//! `tracing` layer that mirrors every event into the shipper queue.

use std::fmt::Write as _;

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;

use crate::event::{LogEvent, LogLevel};
use crate::queue::EventSender;
use crate::sender;

/// A `tracing` layer that turns each event into a [`LogEvent`] and queues it
/// for delivery.
///
/// Obtained from [`Shipper::layer`](crate::Shipper::layer). The layer runs on
/// the thread that logged the event and blocks it while the queue is full.
#[derive(Clone, Debug)]
pub struct ShipperLayer {
    queue: EventSender,
    environment: String,
}

impl ShipperLayer {
    pub(crate) fn new(queue: EventSender, environment: String) -> Self {
        Self { queue, environment }
    }

    /// Build the event that will be shipped for `event`.
    fn to_log_event(&self, event: &Event<'_>) -> LogEvent {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let level = LogLevel::from(*event.metadata().level());
        LogEvent::new(self.environment.as_str(), level, visitor.message)
    }
}

impl<S> Layer<S> for ShipperLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if sender::is_delivery_thread() {
            return;
        }

        let log_event = self.to_log_event(event);
        if let Err(e) = self.queue.send(log_event) {
            println!("Dropping log event: {}", e);
        }
    }
}

/// Extracts the rendered `message` field. Other fields are not shipped.
#[derive(Default)]
struct MessageVisitor {
    message: String,
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.clear();
            self.message.push_str(value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message.clear();
            let _ = write!(self.message, "{:?}", value);
        }
    }
}
