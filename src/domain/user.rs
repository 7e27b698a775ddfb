//! User accounts.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::types::{PersonName, UserEmail, UserId, Username};

/// A registered account as stored in the database.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub email: UserEmail,
    pub first_name: PersonName,
    pub last_name: PersonName,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_admin: bool,
    pub is_deleted: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl User {
    /// Name shown in page headers.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Whether the account may still sign in and own sessions.
    pub fn is_active(&self) -> bool {
        !self.is_deleted
    }
}

/// Data required to register a new account.
#[derive(Clone, Debug)]
pub struct NewUser {
    pub username: Username,
    pub email: UserEmail,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub password_hash: String,
}

impl NewUser {
    #[must_use]
    pub fn new(
        username: Username,
        email: UserEmail,
        first_name: PersonName,
        last_name: PersonName,
        password_hash: String,
    ) -> Self {
        Self {
            username,
            email,
            first_name,
            last_name,
            password_hash,
        }
    }
}
