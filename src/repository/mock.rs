//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::post::{NewPost, Post, UpdatePost};
use crate::domain::types::{PostId, UserId, Username};
use crate::domain::user::{NewUser, User};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    PostListQuery, PostReader, PostWriter, UserListQuery, UserReader, UserWriter,
};

mock! {
    pub Repository {}

    impl UserReader for Repository {
        fn get_user_by_id(&self, id: UserId) -> RepositoryResult<Option<User>>;
        fn get_user_by_username(&self, username: &Username) -> RepositoryResult<Option<User>>;
        fn list_users(&self, query: UserListQuery) -> RepositoryResult<(usize, Vec<User>)>;
    }

    impl UserWriter for Repository {
        fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
        fn set_user_admin(&self, id: UserId, is_admin: bool) -> RepositoryResult<User>;
        fn soft_delete_user(&self, id: UserId) -> RepositoryResult<usize>;
    }

    impl PostReader for Repository {
        fn get_post_by_id(&self, id: PostId) -> RepositoryResult<Option<Post>>;
        fn list_posts(&self, query: PostListQuery) -> RepositoryResult<(usize, Vec<Post>)>;
    }

    impl PostWriter for Repository {
        fn create_post(&self, new_post: &NewPost) -> RepositoryResult<Post>;
        fn update_post(&self, id: PostId, updates: &UpdatePost) -> RepositoryResult<Post>;
        fn soft_delete_post(&self, id: PostId) -> RepositoryResult<()>;
    }
}
