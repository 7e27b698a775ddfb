//! Diesel models for blog posts.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::post::{NewPost as DomainNewPost, Post as DomainPost, UpdatePost as DomainUpdatePost};
use crate::domain::types::{PostBody, PostId, PostTitle, TypeConstraintError, UserId};
use crate::models::user::User;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(belongs_to(User, foreign_key = user_id))]
#[diesel(table_name = crate::schema::posts)]
pub struct Post {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub body: String,
    pub is_deleted: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::posts)]
pub struct NewPost<'a> {
    pub user_id: i32,
    pub title: &'a str,
    pub body: &'a str,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::posts)]
/// Data used when editing a [`Post`] record.
pub struct UpdatePost<'a> {
    pub title: &'a str,
    pub body: &'a str,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Post> for DomainPost {
    type Error = TypeConstraintError;

    fn try_from(post: Post) -> Result<Self, Self::Error> {
        Ok(Self {
            id: PostId::try_from(post.id)?,
            user_id: UserId::try_from(post.user_id)?,
            title: PostTitle::new(post.title)?,
            body: PostBody::new(post.body)?,
            is_deleted: post.is_deleted,
            created_at: post.created_at,
            updated_at: post.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewPost> for NewPost<'a> {
    fn from(post: &'a DomainNewPost) -> Self {
        Self {
            user_id: post.user_id.get(),
            title: post.title.as_str(),
            body: post.body.as_str(),
        }
    }
}

impl<'a> UpdatePost<'a> {
    /// Builds a changeset stamped with the provided modification time.
    pub fn new(post: &'a DomainUpdatePost, updated_at: NaiveDateTime) -> Self {
        Self {
            title: post.title.as_str(),
            body: post.body.as_str(),
            updated_at,
        }
    }
}
