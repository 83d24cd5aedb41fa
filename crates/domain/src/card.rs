use crate::shared::entity::ID;
use chrono::NaiveDate;
use thiserror::Error;

pub const NICKNAME_MAX_LEN: usize = 100;

/// A credit card a `User` keeps track of.
///
/// The only field the inactivity alerts care about is `last_used`. A `Card`
/// without it has never been pinged and is never alerted on.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub id: ID,
    /// The `User` this `Card` belongs to
    pub user_id: ID,
    pub nickname: String,
    /// Free text notes about the perks of the card, at most 350 characters in the store
    pub benefits: Option<String>,
    /// Reference to a stored image of the card
    pub image_path: Option<String>,
    pub last_used: Option<NaiveDate>,
    /// Creation timestamp in millis
    pub created: i64,
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidCardError {
    #[error("Card nickname can not be empty")]
    EmptyNickname,
    #[error("Card nickname can not be longer than {max} characters, was {0}", max = NICKNAME_MAX_LEN)]
    NicknameTooLong(usize),
}

impl Card {
    pub fn new(user_id: ID, nickname: String, created: i64) -> Result<Self, InvalidCardError> {
        let mut card = Self {
            id: Default::default(),
            user_id,
            nickname: String::new(),
            benefits: None,
            image_path: None,
            last_used: None,
            created,
        };
        card.set_nickname(nickname)?;
        Ok(card)
    }

    pub fn set_nickname(&mut self, nickname: String) -> Result<(), InvalidCardError> {
        let len = nickname.chars().count();
        if nickname.trim().is_empty() {
            return Err(InvalidCardError::EmptyNickname);
        }
        if len > NICKNAME_MAX_LEN {
            return Err(InvalidCardError::NicknameTooLong(len));
        }
        self.nickname = nickname;
        Ok(())
    }

    /// Whole days between `last_used` and `reference_date`.
    /// `None` if the card has never been used.
    pub fn inactivity_days(&self, reference_date: NaiveDate) -> Option<i64> {
        self.last_used
            .map(|last_used| (reference_date - last_used).num_days())
    }
}
