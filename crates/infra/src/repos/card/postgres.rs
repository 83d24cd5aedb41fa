use super::ICardRepo;
use chrono::NaiveDate;
use churnverse_domain::{Card, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresCardRepo {
    pool: PgPool,
}

impl PostgresCardRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CardRaw {
    card_uid: Uuid,
    user_uid: Uuid,
    nickname: String,
    benefits: Option<String>,
    image_path: Option<String>,
    last_used: Option<NaiveDate>,
    created: i64,
}

impl From<CardRaw> for Card {
    fn from(raw: CardRaw) -> Self {
        Self {
            id: raw.card_uid.into(),
            user_id: raw.user_uid.into(),
            nickname: raw.nickname,
            benefits: raw.benefits,
            image_path: raw.image_path,
            last_used: raw.last_used,
            created: raw.created,
        }
    }
}

#[async_trait::async_trait]
impl ICardRepo for PostgresCardRepo {
    async fn insert(&self, card: &Card) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO cards(card_uid, user_uid, nickname, benefits, image_path, last_used, created)
            VALUES($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(card.id.inner_ref())
        .bind(card.user_id.inner_ref())
        .bind(&card.nickname)
        .bind(&card.benefits)
        .bind(&card.image_path)
        .bind(card.last_used)
        .bind(card.created)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Card>> {
        let cards = sqlx::query_as::<_, CardRaw>(
            r#"
            SELECT * FROM cards AS c
            WHERE c.user_uid = $1
            ORDER BY c.created ASC
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;

        Ok(cards.into_iter().map(|c| c.into()).collect())
    }
}
