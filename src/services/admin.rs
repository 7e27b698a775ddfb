//! Admin panel services. Every operation requires the stored admin flag.

use crate::domain::types::{PostId, UserId};
use crate::dto::admin::{AdminUserPageData, AdminUsersPageData};
use crate::models::auth::AuthenticatedUser;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{PostListQuery, PostReader, PostWriter, UserListQuery, UserReader, UserWriter};
use crate::services::auth::require_admin;
use crate::services::{ServiceError, ServiceResult};

/// Lists non-deleted users.
pub fn list_users<R>(
    repo: &R,
    session: &AuthenticatedUser,
    page: Option<usize>,
) -> ServiceResult<AdminUsersPageData>
where
    R: UserReader + ?Sized,
{
    require_admin(repo, session)?;

    let page = page.unwrap_or(1);
    let (total, users) = repo.list_users(UserListQuery::new().paginate(page, DEFAULT_ITEMS_PER_PAGE))?;

    Ok(AdminUsersPageData {
        users: Paginated::new(users, page, total, DEFAULT_ITEMS_PER_PAGE),
    })
}

/// Loads any user, deleted or not, together with their non-deleted posts.
pub fn view_user<R>(
    repo: &R,
    session: &AuthenticatedUser,
    user_id: i32,
) -> ServiceResult<AdminUserPageData>
where
    R: UserReader + PostReader + ?Sized,
{
    require_admin(repo, session)?;

    let user_id = UserId::new(user_id).map_err(|_| ServiceError::NotFound)?;
    let user = repo.get_user_by_id(user_id)?.ok_or(ServiceError::NotFound)?;
    let (_, posts) = repo.list_posts(PostListQuery::new(user.id))?;

    Ok(AdminUserPageData { user, posts })
}

/// Soft-deletes a user together with all of their posts.
pub fn delete_user<R>(repo: &R, session: &AuthenticatedUser, user_id: i32) -> ServiceResult<()>
where
    R: UserReader + UserWriter + ?Sized,
{
    let admin = require_admin(repo, session)?;

    let user_id = UserId::new(user_id).map_err(|_| ServiceError::NotFound)?;
    if user_id == admin.id {
        return Err(ServiceError::Form(
            "You cannot delete your own account.".to_string(),
        ));
    }

    let user = repo.get_user_by_id(user_id)?.ok_or(ServiceError::NotFound)?;
    let deleted_posts = repo.soft_delete_user(user.id)?;

    log::info!(
        "Admin {} deleted user {} and {deleted_posts} of their posts",
        admin.username,
        user.username
    );
    Ok(())
}

/// Soft-deletes any post and returns its author so the caller can go back
/// to that user's page.
pub fn delete_post<R>(repo: &R, session: &AuthenticatedUser, post_id: i32) -> ServiceResult<UserId>
where
    R: UserReader + PostReader + PostWriter + ?Sized,
{
    let admin = require_admin(repo, session)?;

    let post_id = PostId::new(post_id).map_err(|_| ServiceError::NotFound)?;
    let post = repo.get_post_by_id(post_id)?.ok_or(ServiceError::NotFound)?;

    repo.soft_delete_post(post.id)?;

    log::info!("Admin {} deleted post {}", admin.username, post.id);
    Ok(post.user_id)
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::post::Post;
    use crate::domain::types::{PersonName, PostBody, PostTitle, UserEmail, Username};
    use crate::domain::user::User;
    use crate::repository::mock::MockRepository;

    fn user(id: i32, is_admin: bool) -> User {
        let now = Utc::now().naive_utc();
        User {
            id: UserId::new(id).unwrap(),
            username: Username::new(format!("user{id}")).unwrap(),
            email: UserEmail::new(format!("user{id}@example.com")).unwrap(),
            first_name: PersonName::new("First").unwrap(),
            last_name: PersonName::new("Last").unwrap(),
            password_hash: "hash".to_string(),
            is_admin,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }

    fn post(id: i32, user_id: i32) -> Post {
        let now = Utc::now().naive_utc();
        Post {
            id: PostId::new(id).unwrap(),
            user_id: UserId::new(user_id).unwrap(),
            title: PostTitle::new("Title").unwrap(),
            body: PostBody::new("Body").unwrap(),
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }

    fn session(user_id: i32) -> AuthenticatedUser {
        AuthenticatedUser {
            sub: user_id.to_string(),
            username: format!("user{user_id}"),
            name: "First Last".to_string(),
            is_admin: true,
            iat: 0,
            exp: i64::MAX,
        }
    }

    /// Admin is user 1, everyone else is a regular user.
    fn repo_with_users() -> MockRepository {
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_id()
            .returning(|id| Ok(Some(user(id.get(), id.get() == 1))));
        repo
    }

    #[test]
    fn non_admin_cannot_list_users() {
        let mut repo = repo_with_users();
        repo.expect_list_users().times(0);

        let result = list_users(&repo, &session(2), None);
        assert!(matches!(result, Err(ServiceError::Forbidden)));
    }

    #[test]
    fn admin_lists_users() {
        let mut repo = repo_with_users();
        repo.expect_list_users()
            .withf(|query| !query.include_deleted)
            .returning(|_| Ok((2, vec![user(1, true), user(2, false)])));

        let data = list_users(&repo, &session(1), Some(1)).expect("users");
        assert_eq!(data.users.items.len(), 2);
    }

    #[test]
    fn admin_views_user_with_posts() {
        let mut repo = repo_with_users();
        repo.expect_list_posts()
            .withf(|query| query.user_id.get() == 2)
            .returning(|_| Ok((1, vec![post(4, 2)])));

        let data = view_user(&repo, &session(1), 2).expect("user page");
        assert_eq!(data.user.id.get(), 2);
        assert_eq!(data.posts.len(), 1);
    }

    #[test]
    fn admin_deletes_user() {
        let mut repo = repo_with_users();
        repo.expect_soft_delete_user()
            .withf(|id| id.get() == 2)
            .times(1)
            .returning(|_| Ok(3));

        delete_user(&repo, &session(1), 2).expect("deleted");
    }

    #[test]
    fn admin_cannot_delete_self() {
        let mut repo = repo_with_users();
        repo.expect_soft_delete_user().times(0);

        let result = delete_user(&repo, &session(1), 1);
        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn non_admin_cannot_delete_posts() {
        let mut repo = repo_with_users();
        repo.expect_get_post_by_id().times(0);
        repo.expect_soft_delete_post().times(0);

        let result = delete_post(&repo, &session(2), 4);
        assert!(matches!(result, Err(ServiceError::Forbidden)));
    }

    #[test]
    fn admin_delete_post_returns_author() {
        let mut repo = repo_with_users();
        repo.expect_get_post_by_id().returning(|_| Ok(Some(post(4, 2))));
        repo.expect_soft_delete_post().times(1).returning(|_| Ok(()));

        let author = delete_post(&repo, &session(1), 4).expect("deleted");
        assert_eq!(author.get(), 2);
    }
}
