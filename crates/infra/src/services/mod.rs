mod message_sender;

pub use message_sender::{
    DeliveryError, IMessageSender, InMemoryMessageSender, LogMessageSender, OutgoingMessage,
    WebhookMessageSender, RELAY_TIMEOUT, WEBHOOK_KEY_HEADER,
};
