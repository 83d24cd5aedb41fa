use super::{DeliveryError, IMessageSender, OutgoingMessage};
use std::{collections::HashSet, sync::Mutex};

/// Keeps every message it is given. Recipients marked with `fail_for`
/// get a delivery error instead.
pub struct InMemoryMessageSender {
    sent: Mutex<Vec<OutgoingMessage>>,
    failing_recipients: Mutex<HashSet<String>>,
}

impl InMemoryMessageSender {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(vec![]),
            failing_recipients: Mutex::new(HashSet::new()),
        }
    }

    pub fn fail_for(&self, recipient: &str) {
        self.failing_recipients
            .lock()
            .unwrap()
            .insert(recipient.to_string());
    }

    pub fn sent(&self) -> Vec<OutgoingMessage> {
        self.sent.lock().unwrap().clone()
    }
}

impl Default for InMemoryMessageSender {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IMessageSender for InMemoryMessageSender {
    async fn send(&self, message: &OutgoingMessage) -> Result<(), DeliveryError> {
        if self.failing_recipients.lock().unwrap().contains(&message.to) {
            return Err(DeliveryError::Failed(message.to.clone()));
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}
