mod config;
mod repos;
mod services;
mod system;

use anyhow::Context;
pub use config::{Config, MailWebhookSettings};
pub use repos::{
    IAlertRecordRepo, ICardRepo, IUserRepo, InMemoryAlertRecordRepo, InMemoryCardRepo,
    InMemoryUserRepo, Repos,
};
pub use services::*;
use std::sync::Arc;
use tracing::warn;
pub use system::{ISys, RealSys};

#[derive(Clone)]
pub struct ChurnverseContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub sender: Arc<dyn IMessageSender>,
}

struct ContextParams {
    pub postgres_connection_string: String,
}

fn create_sender(config: &Config) -> anyhow::Result<Arc<dyn IMessageSender>> {
    match &config.mail_webhook {
        Some(settings) => {
            let sender = WebhookMessageSender::new(
                settings.clone(),
                config.from_address.clone(),
                RELAY_TIMEOUT,
            )
            .context("Unable to create the mail relay client")?;
            Ok(Arc::new(sender))
        }
        None => {
            warn!("MAIL_WEBHOOK_URL is not set, alerts will only be logged and not recorded as sent");
            Ok(Arc::new(LogMessageSender {}))
        }
    }
}

impl ChurnverseContext {
    async fn create(params: ContextParams) -> anyhow::Result<Self> {
        let repos = Repos::create_postgres(&params.postgres_connection_string)
            .await
            .context("Unable to connect to the card store")?;
        let config = Config::new();
        Ok(Self {
            repos,
            sender: create_sender(&config)?,
            config,
            sys: Arc::new(RealSys {}),
        })
    }

    /// Context backed by inmemory repositories, used for testing
    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            sender: Arc::new(LogMessageSender {}),
            config: Config::default(),
            sys: Arc::new(RealSys {}),
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> anyhow::Result<ChurnverseContext> {
    ChurnverseContext::create(ContextParams {
        postgres_connection_string: get_psql_connection_string()?,
    })
    .await
}

fn get_psql_connection_string() -> anyhow::Result<String> {
    const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

    std::env::var(PSQL_CONNECTION_STRING)
        .with_context(|| format!("{} env var to be present.", PSQL_CONNECTION_STRING))
}
