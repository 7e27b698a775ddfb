//! Persistence boundary of the blog.
//!
//! Services depend on the reader/writer traits below; [`DieselRepository`]
//! implements all of them over the SQLite pool.

use crate::db::{DbConnection, DbPool, get_connection};
use crate::domain::post::{NewPost, Post, UpdatePost};
use crate::domain::types::{PostId, UserId, Username};
use crate::domain::user::{NewUser, User};
use crate::repository::errors::RepositoryResult;

pub mod errors;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod post;
pub mod user;

#[derive(Debug, Clone)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    /// Row offset of the first item on the page (pages start at 1).
    ///
    /// Saturates at `i64::MAX`, which simply yields an empty page.
    pub fn offset(&self) -> i64 {
        let offset = (self.page.max(1) - 1).saturating_mul(self.per_page);
        i64::try_from(offset).unwrap_or(i64::MAX)
    }

    pub fn limit(&self) -> i64 {
        i64::try_from(self.per_page).unwrap_or(i64::MAX)
    }
}

#[derive(Debug, Clone, Default)]
pub struct UserListQuery {
    pub include_deleted: bool,
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Clone)]
pub struct PostListQuery {
    pub user_id: UserId,
    pub pagination: Option<Pagination>,
}

impl UserListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn include_deleted(mut self) -> Self {
        self.include_deleted = true;
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

impl PostListQuery {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            pagination: None,
        }
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

pub trait UserReader {
    /// Fetches a user by id, deleted or not.
    fn get_user_by_id(&self, id: UserId) -> RepositoryResult<Option<User>>;
    fn get_user_by_username(&self, username: &Username) -> RepositoryResult<Option<User>>;
    fn list_users(&self, query: UserListQuery) -> RepositoryResult<(usize, Vec<User>)>;
}

pub trait UserWriter {
    fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
    fn set_user_admin(&self, id: UserId, is_admin: bool) -> RepositoryResult<User>;
    /// Marks the user and every post they own as deleted in one transaction.
    /// Returns the number of posts that were marked.
    fn soft_delete_user(&self, id: UserId) -> RepositoryResult<usize>;
}

pub trait PostReader {
    /// Fetches a post that has not been deleted.
    fn get_post_by_id(&self, id: PostId) -> RepositoryResult<Option<Post>>;
    /// Lists a user's non-deleted posts, newest first.
    fn list_posts(&self, query: PostListQuery) -> RepositoryResult<(usize, Vec<Post>)>;
}

pub trait PostWriter {
    fn create_post(&self, new_post: &NewPost) -> RepositoryResult<Post>;
    fn update_post(&self, id: PostId, updates: &UpdatePost) -> RepositoryResult<Post>;
    fn soft_delete_post(&self, id: PostId) -> RepositoryResult<()>;
}

/// Diesel-backed implementation of every repository trait.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_starts_at_zero() {
        let first = Pagination { page: 1, per_page: 20 };
        let zero = Pagination { page: 0, per_page: 20 };
        let third = Pagination { page: 3, per_page: 20 };
        assert_eq!(first.offset(), 0);
        assert_eq!(zero.offset(), 0);
        assert_eq!(third.offset(), 40);
    }

    #[test]
    fn huge_page_saturates() {
        let pagination = Pagination {
            page: usize::MAX,
            per_page: 20,
        };
        assert_eq!(pagination.offset(), i64::MAX);
        assert_eq!(pagination.limit(), 20);
    }
}
