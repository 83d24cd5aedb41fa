use super::{DeliveryError, IMessageSender, OutgoingMessage};
use crate::config::MailWebhookSettings;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

pub const WEBHOOK_KEY_HEADER: &str = "churnverse-webhook-key";
/// Longest time a single message hand-off to the relay may take
pub const RELAY_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Serialize)]
struct MailRelayRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    body: &'a str,
}

/// Hands messages off to a mail relay by posting them as json
pub struct WebhookMessageSender {
    client: Client,
    settings: MailWebhookSettings,
    from_address: String,
}

impl WebhookMessageSender {
    pub fn new(
        settings: MailWebhookSettings,
        from_address: String,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            settings,
            from_address,
        })
    }
}

#[async_trait::async_trait]
impl IMessageSender for WebhookMessageSender {
    async fn send(&self, message: &OutgoingMessage) -> Result<(), DeliveryError> {
        let mut req = self.client.post(&self.settings.url).json(&MailRelayRequest {
            from: &self.from_address,
            to: &message.to,
            subject: &message.subject,
            body: &message.body,
        });
        if let Some(key) = &self.settings.key {
            req = req.header(WEBHOOK_KEY_HEADER, key);
        }

        let res = req
            .send()
            .await
            .map_err(|e| DeliveryError::Unreachable(e.to_string()))?;

        if res.status().is_success() {
            Ok(())
        } else {
            Err(DeliveryError::Rejected(res.status().as_u16()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relay_request_format() {
        let req = MailRelayRequest {
            from: "alerts@churnverse.com",
            to: "alice@example.com",
            subject: "Hi",
            body: "Use your cards",
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            serde_json::json!({
                "from": "alerts@churnverse.com",
                "to": "alice@example.com",
                "subject": "Hi",
                "body": "Use your cards",
            })
        );
    }

    fn message() -> OutgoingMessage {
        OutgoingMessage {
            to: "alice@example.com".into(),
            subject: "Hi".into(),
            body: "Use your cards".into(),
        }
    }

    fn sender_for(url: String, timeout: Duration) -> WebhookMessageSender {
        WebhookMessageSender::new(
            MailWebhookSettings { url, key: None },
            "alerts@churnverse.com".into(),
            timeout,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn unreachable_relay_is_a_delivery_error() {
        // Nothing listens on the discard port
        let sender = sender_for("http://127.0.0.1:9/send".into(), RELAY_TIMEOUT);
        let res = sender.send(&message()).await;
        assert!(matches!(res, Err(DeliveryError::Unreachable(_))));
    }

    #[tokio::test]
    async fn silent_relay_times_out() {
        // Connections are queued by the OS but never answered
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/send", listener.local_addr().unwrap());
        let sender = sender_for(url, Duration::from_millis(200));

        let res = tokio::time::timeout(Duration::from_secs(5), sender.send(&message()))
            .await
            .expect("send should give up on its own");
        assert!(matches!(res, Err(DeliveryError::Unreachable(_))));
    }
}
