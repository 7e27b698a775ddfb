//! Repository implementation for blog posts.

use chrono::Utc;
use diesel::prelude::*;

use crate::{
    domain::{
        post::{NewPost, Post, UpdatePost},
        types::PostId,
    },
    models::post::{NewPost as DbNewPost, Post as DbPost, UpdatePost as DbUpdatePost},
    repository::{
        DieselRepository, PostListQuery, PostReader, PostWriter,
        errors::{RepositoryError, RepositoryResult},
    },
};

impl PostReader for DieselRepository {
    fn get_post_by_id(&self, id: PostId) -> RepositoryResult<Option<Post>> {
        use crate::schema::posts;

        let mut conn = self.conn()?;
        let db_post = posts::table
            .filter(posts::id.eq(id.get()))
            .filter(posts::is_deleted.eq(false))
            .first::<DbPost>(&mut conn)
            .optional()?;

        db_post
            .map(|post| Post::try_from(post).map_err(RepositoryError::from))
            .transpose()
    }

    fn list_posts(&self, query: PostListQuery) -> RepositoryResult<(usize, Vec<Post>)> {
        use crate::schema::posts;

        let mut conn = self.conn()?;

        let query_builder = || {
            posts::table
                .filter(posts::user_id.eq(query.user_id.get()))
                .filter(posts::is_deleted.eq(false))
                .into_boxed::<diesel::sqlite::Sqlite>()
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder().order((posts::created_at.desc(), posts::id.desc()));
        if let Some(pagination) = &query.pagination {
            items = items
                .offset(pagination.offset())
                .limit(pagination.limit());
        }

        let posts = items
            .load::<DbPost>(&mut conn)?
            .into_iter()
            .map(|post| Post::try_from(post).map_err(RepositoryError::from))
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok((total, posts))
    }
}

impl PostWriter for DieselRepository {
    fn create_post(&self, new_post: &NewPost) -> RepositoryResult<Post> {
        use crate::schema::posts;

        let mut conn = self.conn()?;
        let insertable: DbNewPost = new_post.into();

        let db_post = diesel::insert_into(posts::table)
            .values(&insertable)
            .get_result::<DbPost>(&mut conn)?;

        Post::try_from(db_post).map_err(RepositoryError::from)
    }

    fn update_post(&self, id: PostId, updates: &UpdatePost) -> RepositoryResult<Post> {
        use crate::schema::posts;

        let mut conn = self.conn()?;
        let changeset = DbUpdatePost::new(updates, Utc::now().naive_utc());

        let db_post = diesel::update(
            posts::table
                .filter(posts::id.eq(id.get()))
                .filter(posts::is_deleted.eq(false)),
        )
        .set(&changeset)
        .get_result::<DbPost>(&mut conn)?;

        Post::try_from(db_post).map_err(RepositoryError::from)
    }

    fn soft_delete_post(&self, id: PostId) -> RepositoryResult<()> {
        use crate::schema::posts;

        let mut conn = self.conn()?;
        let updated = diesel::update(
            posts::table
                .filter(posts::id.eq(id.get()))
                .filter(posts::is_deleted.eq(false)),
        )
        .set((
            posts::is_deleted.eq(true),
            posts::updated_at.eq(Utc::now().naive_utc()),
        ))
        .execute(&mut conn)?;

        if updated == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
