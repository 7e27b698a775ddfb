//! DTOs shaped for the profile and post editor templates.

use crate::domain::post::Post;
use crate::domain::user::User;
use crate::pagination::Paginated;

/// Data required to render the signed-in user's profile page.
pub struct ProfilePageData {
    pub user: User,
    /// The user's own non-deleted posts, newest first.
    pub posts: Paginated<Post>,
}

/// Data required to render the edit form of a post.
#[derive(Debug)]
pub struct EditPostPageData {
    pub post: Post,
}
