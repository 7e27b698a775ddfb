//! Forms for writing and editing posts.

use serde::Deserialize;
use validator::Validate;

use crate::domain::post::{NewPost, UpdatePost};
use crate::domain::types::{PostBody, PostTitle, UserId};
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
/// Form data shared by the new-post and edit-post pages.
pub struct PostForm {
    #[validate(length(min = 1, message = "Title cannot be empty."))]
    pub title: String,
    #[validate(length(min = 1, message = "Post body cannot be empty."))]
    pub body: String,
}

pub struct PostPayload {
    pub title: PostTitle,
    pub body: PostBody,
}

impl TryFrom<PostForm> for PostPayload {
    type Error = FormError;

    fn try_from(form: PostForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(Self {
            title: PostTitle::new(form.title)?,
            body: PostBody::new(form.body)?,
        })
    }
}

impl PostPayload {
    pub fn into_new_post(self, user_id: UserId) -> NewPost {
        NewPost::new(user_id, self.title, self.body)
    }

    pub fn into_update(self) -> UpdatePost {
        UpdatePost::new(self.title, self.body)
    }
}
