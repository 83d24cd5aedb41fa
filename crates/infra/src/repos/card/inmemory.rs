use super::ICardRepo;
use crate::repos::shared::inmemory_repo::*;
use churnverse_domain::{Card, ID};

pub struct InMemoryCardRepo {
    cards: std::sync::Mutex<Vec<Card>>,
}

impl InMemoryCardRepo {
    pub fn new() -> Self {
        Self {
            cards: std::sync::Mutex::new(vec![]),
        }
    }
}

impl Default for InMemoryCardRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ICardRepo for InMemoryCardRepo {
    async fn insert(&self, card: &Card) -> anyhow::Result<()> {
        insert(card, &self.cards);
        Ok(())
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Card>> {
        let mut cards = find_by(&self.cards, |c| c.user_id == *user_id);
        cards.sort_by_key(|c| c.created);
        Ok(cards)
    }
}
