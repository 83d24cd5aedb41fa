mod inmemory;
mod postgres;

use churnverse_domain::{AlertRecord, ID};
pub use inmemory::InMemoryAlertRecordRepo;
pub use postgres::PostgresAlertRecordRepo;

#[async_trait::async_trait]
pub trait IAlertRecordRepo: Send + Sync {
    async fn find_by_cards(&self, card_ids: &[ID]) -> anyhow::Result<Vec<AlertRecord>>;
    /// Inserts the records, replacing any existing record for the same card
    async fn upsert_many(&self, records: &[AlertRecord]) -> anyhow::Result<()>;
}
