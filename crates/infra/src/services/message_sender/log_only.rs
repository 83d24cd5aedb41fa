use super::{DeliveryError, IMessageSender, OutgoingMessage};
use tracing::info;

/// Only logs the messages. Used for dry runs and when no mail relay is configured.
pub struct LogMessageSender {}

#[async_trait::async_trait]
impl IMessageSender for LogMessageSender {
    async fn send(&self, message: &OutgoingMessage) -> Result<(), DeliveryError> {
        info!(
            to = %message.to,
            subject = %message.subject,
            "Not sending alert, no mail relay in use:\n{}",
            message.body
        );
        Ok(())
    }

    fn confirms_delivery(&self) -> bool {
        false
    }
}
