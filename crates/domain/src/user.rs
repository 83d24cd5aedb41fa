use crate::shared::entity::ID;

/// An account holder. The `email` is where inactivity alerts are delivered.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: ID,
    pub username: String,
    pub email: String,
}

impl User {
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: Default::default(),
            username: username.into(),
            email: email.into(),
        }
    }
}
