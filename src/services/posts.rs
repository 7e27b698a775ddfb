//! Services for a user's own posts.

use crate::domain::post::Post;
use crate::domain::types::PostId;
use crate::domain::user::User;
use crate::dto::posts::{EditPostPageData, ProfilePageData};
use crate::forms::posts::{PostForm, PostPayload};
use crate::models::auth::AuthenticatedUser;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{PostListQuery, PostReader, PostWriter, UserReader};
use crate::services::auth::current_user;
use crate::services::{ServiceError, ServiceResult};

/// Loads the current user and a page of their non-deleted posts.
pub fn load_profile<R>(
    repo: &R,
    session: &AuthenticatedUser,
    page: Option<usize>,
) -> ServiceResult<ProfilePageData>
where
    R: UserReader + PostReader + ?Sized,
{
    let user = current_user(repo, session)?;
    let page = page.unwrap_or(1);

    let (total, posts) =
        repo.list_posts(PostListQuery::new(user.id).paginate(page, DEFAULT_ITEMS_PER_PAGE))?;

    Ok(ProfilePageData {
        user,
        posts: Paginated::new(posts, page, total, DEFAULT_ITEMS_PER_PAGE),
    })
}

/// Validates the form and stores a post authored by the current user.
pub fn create_post<R>(repo: &R, session: &AuthenticatedUser, form: PostForm) -> ServiceResult<Post>
where
    R: UserReader + PostWriter + ?Sized,
{
    let user = current_user(repo, session)?;
    let payload = PostPayload::try_from(form)?;

    let post = repo.create_post(&payload.into_new_post(user.id))?;
    log::info!("User {} created post {}", user.username, post.id);
    Ok(post)
}

/// Returns the post when it exists, is not deleted and belongs to `user`.
///
/// Other users' posts are reported as missing.
fn owned_post<R>(repo: &R, user: &User, post_id: i32) -> ServiceResult<Post>
where
    R: PostReader + ?Sized,
{
    let post_id = PostId::new(post_id).map_err(|_| ServiceError::NotFound)?;

    match repo.get_post_by_id(post_id)? {
        Some(post) if post.is_owned_by(user.id) => Ok(post),
        Some(_) => {
            log::warn!(
                "User {} tried to access post {post_id} owned by someone else",
                user.username
            );
            Err(ServiceError::NotFound)
        }
        None => Err(ServiceError::NotFound),
    }
}

/// Loads a post for the edit form.
pub fn load_post_for_edit<R>(
    repo: &R,
    session: &AuthenticatedUser,
    post_id: i32,
) -> ServiceResult<EditPostPageData>
where
    R: UserReader + PostReader + ?Sized,
{
    let user = current_user(repo, session)?;
    let post = owned_post(repo, &user, post_id)?;
    Ok(EditPostPageData { post })
}

/// Applies an edit to one of the current user's posts.
pub fn update_post<R>(
    repo: &R,
    session: &AuthenticatedUser,
    post_id: i32,
    form: PostForm,
) -> ServiceResult<Post>
where
    R: UserReader + PostReader + PostWriter + ?Sized,
{
    let user = current_user(repo, session)?;
    let post = owned_post(repo, &user, post_id)?;
    let payload = PostPayload::try_from(form)?;

    Ok(repo.update_post(post.id, &payload.into_update())?)
}

/// Soft-deletes one of the current user's posts.
pub fn delete_post<R>(repo: &R, session: &AuthenticatedUser, post_id: i32) -> ServiceResult<()>
where
    R: UserReader + PostReader + PostWriter + ?Sized,
{
    let user = current_user(repo, session)?;
    let post = owned_post(repo, &user, post_id)?;

    repo.soft_delete_post(post.id)?;
    log::info!("User {} deleted post {}", user.username, post.id);
    Ok(())
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::types::{PersonName, PostBody, PostTitle, UserEmail, UserId, Username};
    use crate::repository::mock::MockRepository;

    fn user(id: i32) -> User {
        let now = Utc::now().naive_utc();
        User {
            id: UserId::new(id).unwrap(),
            username: Username::new(format!("user{id}")).unwrap(),
            email: UserEmail::new(format!("user{id}@example.com")).unwrap(),
            first_name: PersonName::new("First").unwrap(),
            last_name: PersonName::new("Last").unwrap(),
            password_hash: "hash".to_string(),
            is_admin: false,
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
            is_admin: false,
            iat: 0,
            exp: i64::MAX,
        }
    }

    fn form() -> PostForm {
        PostForm {
            title: "Updated".to_string(),
            body: "New body".to_string(),
        }
    }

    #[test]
    fn profile_lists_own_posts() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_id().returning(|_| Ok(Some(user(1))));
        repo.expect_list_posts()
            .withf(|query| query.user_id.get() == 1)
            .returning(|_| Ok((2, vec![post(2, 1), post(1, 1)])));

        let data = load_profile(&repo, &session(1), None).expect("profile");
        assert_eq!(data.user.id.get(), 1);
        assert_eq!(data.posts.items.len(), 2);
        assert_eq!(data.posts.total, 2);
    }

    #[test]
    fn create_post_uses_session_user_as_author() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_id().returning(|_| Ok(Some(user(3))));
        repo.expect_create_post()
            .withf(|new_post| new_post.user_id.get() == 3 && new_post.title.as_str() == "Updated")
            .times(1)
            .returning(|_| Ok(post(9, 3)));

        let created = create_post(&repo, &session(3), form()).expect("created");
        assert_eq!(created.id.get(), 9);
    }

    #[test]
    fn editing_foreign_post_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_id().returning(|_| Ok(Some(user(1))));
        repo.expect_get_post_by_id().returning(|_| Ok(Some(post(5, 2))));
        repo.expect_update_post().times(0);

        let result = update_post(&repo, &session(1), 5, form());
        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn deleting_foreign_post_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_id().returning(|_| Ok(Some(user(1))));
        repo.expect_get_post_by_id().returning(|_| Ok(Some(post(5, 2))));
        repo.expect_soft_delete_post().times(0);

        let result = delete_post(&repo, &session(1), 5);
        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn owner_can_delete_post() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_id().returning(|_| Ok(Some(user(1))));
        repo.expect_get_post_by_id().returning(|_| Ok(Some(post(5, 1))));
        repo.expect_soft_delete_post()
            .withf(|id| id.get() == 5)
            .times(1)
            .returning(|_| Ok(()));

        delete_post(&repo, &session(1), 5).expect("deleted");
    }

    #[test]
    fn missing_post_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_id().returning(|_| Ok(Some(user(1))));
        repo.expect_get_post_by_id().returning(|_| Ok(None));

        let result = load_post_for_edit(&repo, &session(1), 42);
        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn invalid_post_id_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_id().returning(|_| Ok(Some(user(1))));
        repo.expect_get_post_by_id().times(0);

        let result = load_post_for_edit(&repo, &session(1), 0);
        assert!(matches!(result, Err(ServiceError::NotFound)));
    }
}
