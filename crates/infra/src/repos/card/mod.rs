mod inmemory;
mod postgres;

use churnverse_domain::{Card, ID};
pub use inmemory::InMemoryCardRepo;
pub use postgres::PostgresCardRepo;

#[async_trait::async_trait]
pub trait ICardRepo: Send + Sync {
    async fn insert(&self, card: &Card) -> anyhow::Result<()>;
    /// All cards of a user, oldest first
    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Card>>;
}
