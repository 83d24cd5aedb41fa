use chrono::NaiveDate;
use churnverse_domain::{Card, User};
use churnverse_infra::ChurnverseContext;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("Valid date")
}

pub async fn create_user(ctx: &ChurnverseContext, username: &str) -> User {
    let user = User::new(username, format!("{}@example.com", username));
    ctx.repos
        .users
        .insert(&user)
        .await
        .expect("To insert user");
    user
}

pub async fn create_card(
    ctx: &ChurnverseContext,
    user: &User,
    nickname: &str,
    last_used: Option<NaiveDate>,
) -> Card {
    let created = ctx
        .repos
        .cards
        .find_by_user(&user.id)
        .await
        .expect("To find cards")
        .len() as i64;
    let mut card = Card::new(user.id.clone(), nickname.into(), created).expect("Valid card");
    card.last_used = last_used;
    ctx.repos
        .cards
        .insert(&card)
        .await
        .expect("To insert card");
    card
}
