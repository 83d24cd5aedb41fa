use super::IAlertRecordRepo;
use crate::repos::shared::inmemory_repo::find_by;
use churnverse_domain::{AlertRecord, ID};
use std::sync::Mutex;

pub struct InMemoryAlertRecordRepo {
    records: Mutex<Vec<AlertRecord>>,
}

impl InMemoryAlertRecordRepo {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(vec![]),
        }
    }
}

impl Default for InMemoryAlertRecordRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IAlertRecordRepo for InMemoryAlertRecordRepo {
    async fn find_by_cards(&self, card_ids: &[ID]) -> anyhow::Result<Vec<AlertRecord>> {
        Ok(find_by(&self.records, |r| card_ids.contains(&r.card_id)))
    }

    async fn upsert_many(&self, records: &[AlertRecord]) -> anyhow::Result<()> {
        let mut collection = self.records.lock().unwrap();
        for record in records {
            collection.retain(|r| r.card_id != record.card_id);
            collection.push(record.clone());
        }
        Ok(())
    }
}
