//! DTOs used in the admin panel.

use crate::domain::post::Post;
use crate::domain::user::User;
use crate::pagination::Paginated;

/// Data required to render the admin user list.
pub struct AdminUsersPageData {
    pub users: Paginated<User>,
}

/// A single user as seen by an admin, with their visible posts.
#[derive(Debug)]
pub struct AdminUserPageData {
    pub user: User,
    pub posts: Vec<Post>,
}
