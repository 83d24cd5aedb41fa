mod inmemory;
mod postgres;

use churnverse_domain::User;
pub use inmemory::InMemoryUserRepo;
pub use postgres::PostgresUserRepo;

#[async_trait::async_trait]
pub trait IUserRepo: Send + Sync {
    async fn insert(&self, user: &User) -> anyhow::Result<()>;
    async fn find_all(&self) -> anyhow::Result<Vec<User>>;
}
