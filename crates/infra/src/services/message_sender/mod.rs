mod inmemory;
mod log_only;
mod webhook;

pub use inmemory::InMemoryMessageSender;
pub use log_only::LogMessageSender;
use thiserror::Error;
pub use webhook::{WebhookMessageSender, RELAY_TIMEOUT, WEBHOOK_KEY_HEADER};

/// A single email that should be delivered to one recipient
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("Unable to reach the mail relay: {0}")]
    Unreachable(String),
    #[error("The mail relay rejected the message with status {0}")]
    Rejected(u16),
    #[error("Delivery to {0} failed")]
    Failed(String),
}

/// Delivers messages to the users. A failure only concerns the given
/// recipient, the sender must be usable for the next message.
#[async_trait::async_trait]
pub trait IMessageSender: Send + Sync {
    async fn send(&self, message: &OutgoingMessage) -> Result<(), DeliveryError>;

    /// Whether an `Ok` from `send` means the message actually left the system.
    /// Alerts are only recorded as sent by senders that confirm delivery.
    fn confirms_delivery(&self) -> bool {
        true
    }
}
