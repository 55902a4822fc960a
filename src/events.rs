use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{error, info};

/// Domain events emitted after successful mutations.
#[derive(Debug, Clone, Serialize)]
pub enum Event {
    MaterialCreated(i64),
    MaterialUpdated(i64),
    MaterialDeleted(i64),
    ProductCreated(i64),
    ProductDeleted(i64),
    MaterialAssociated { product_id: i64, material_id: i64 },
    MaterialDisassociated { product_id: i64, material_id: i64 },
    StockReplenished { materials_updated: u64 },
    OrderFulfilled {
        product_id: i64,
        delayed: bool,
        max_delay_days: i64,
    },
}

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    pub async fn send(&self, event: Event) -> Result<(), mpsc::error::SendError<Event>> {
        self.sender.send(event).await
    }

    /// Sends an event, logging instead of failing the surrounding operation
    /// when the consumer has gone away.
    pub async fn send_or_log(&self, event: Event) {
        if let Err(err) = self.sender.send(event).await {
            error!("Failed to publish event: {}", err);
        }
    }
}

/// Consumes the event stream and records it in the application log.
pub async fn process_events(mut receiver: mpsc::Receiver<Event>) {
    while let Some(event) = receiver.recv().await {
        info!(event = ?event, "domain event");
    }
}
