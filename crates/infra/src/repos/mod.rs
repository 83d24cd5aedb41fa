mod alert_record;
mod card;
mod shared;
mod user;

pub use alert_record::{IAlertRecordRepo, InMemoryAlertRecordRepo, PostgresAlertRecordRepo};
pub use card::{ICardRepo, InMemoryCardRepo, PostgresCardRepo};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;
pub use user::{IUserRepo, InMemoryUserRepo, PostgresUserRepo};

#[derive(Clone)]
pub struct Repos {
    pub cards: Arc<dyn ICardRepo>,
    pub users: Arc<dyn IUserRepo>,
    pub alert_records: Arc<dyn IAlertRecordRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        info!("DB CHECKING CONNECTION ...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");

        info!("DB RUNNING MIGRATIONS ...");
        sqlx::migrate!().run(&pool).await?;
        info!("DB RUNNING MIGRATIONS ... [done]");

        Ok(Self {
            cards: Arc::new(PostgresCardRepo::new(pool.clone())),
            users: Arc::new(PostgresUserRepo::new(pool.clone())),
            alert_records: Arc::new(PostgresAlertRecordRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            cards: Arc::new(InMemoryCardRepo::new()),
            users: Arc::new(InMemoryUserRepo::new()),
            alert_records: Arc::new(InMemoryAlertRecordRepo::new()),
        }
    }
}
