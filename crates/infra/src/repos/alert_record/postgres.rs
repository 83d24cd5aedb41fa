use super::IAlertRecordRepo;
use chrono::NaiveDate;
use churnverse_domain::{AlertRecord, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use std::convert::TryFrom;

pub struct PostgresAlertRecordRepo {
    pool: PgPool,
}

impl PostgresAlertRecordRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AlertRecordRaw {
    card_uid: Uuid,
    tier: String,
    notified_on: NaiveDate,
}

impl TryFrom<AlertRecordRaw> for AlertRecord {
    type Error = anyhow::Error;

    fn try_from(raw: AlertRecordRaw) -> Result<Self, Self::Error> {
        Ok(Self {
            card_id: raw.card_uid.into(),
            tier: raw.tier.parse()?,
            notified_on: raw.notified_on,
        })
    }
}

#[async_trait::async_trait]
impl IAlertRecordRepo for PostgresAlertRecordRepo {
    async fn find_by_cards(&self, card_ids: &[ID]) -> anyhow::Result<Vec<AlertRecord>> {
        let card_ids = card_ids
            .iter()
            .map(|id| *id.inner_ref())
            .collect::<Vec<_>>();

        let records = sqlx::query_as::<_, AlertRecordRaw>(
            r#"
            SELECT * FROM card_alerts AS a
            WHERE a.card_uid = ANY($1)
            "#,
        )
        .bind(&card_ids)
        .fetch_all(&self.pool)
        .await?;

        records.into_iter().map(AlertRecord::try_from).collect()
    }

    async fn upsert_many(&self, records: &[AlertRecord]) -> anyhow::Result<()> {
        for record in records {
            sqlx::query(
                r#"
                INSERT INTO card_alerts(card_uid, tier, notified_on)
                VALUES($1, $2, $3)
                ON CONFLICT (card_uid) DO UPDATE
                SET tier = EXCLUDED.tier,
                notified_on = EXCLUDED.notified_on
                "#,
            )
            .bind(record.card_id.inner_ref())
            .bind(record.tier.as_str())
            .bind(record.notified_on)
            .execute(&self.pool)
            .await?;
        }
        Ok(())
    }
}
