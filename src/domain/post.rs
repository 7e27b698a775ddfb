//! Blog posts owned by users.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::types::{PostBody, PostId, PostTitle, UserId};

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Post {
    pub id: PostId,
    pub user_id: UserId,
    pub title: PostTitle,
    pub body: PostBody,
    pub is_deleted: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Post {
    /// Returns `true` when the post belongs to the given user.
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }
}

#[derive(Clone, Debug)]
pub struct NewPost {
    pub user_id: UserId,
    pub title: PostTitle,
    pub body: PostBody,
}

impl NewPost {
    #[must_use]
    pub fn new(user_id: UserId, title: PostTitle, body: PostBody) -> Self {
        Self {
            user_id,
            title,
            body,
        }
    }
}

#[derive(Clone, Debug)]
pub struct UpdatePost {
    pub title: PostTitle,
    pub body: PostBody,
}

impl UpdatePost {
    #[must_use]
    pub fn new(title: PostTitle, body: PostBody) -> Self {
        Self { title, body }
    }
}
