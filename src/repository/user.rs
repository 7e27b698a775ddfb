//! Repository implementation for user accounts.

use chrono::Utc;
use diesel::{Connection, prelude::*};

use crate::{
    domain::{
        types::{UserId, Username},
        user::{NewUser, User},
    },
    models::user::{NewUser as DbNewUser, User as DbUser},
    repository::{
        DieselRepository, UserListQuery, UserReader, UserWriter,
        errors::{RepositoryError, RepositoryResult},
    },
};

impl UserReader for DieselRepository {
    fn get_user_by_id(&self, id: UserId) -> RepositoryResult<Option<User>> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let db_user = users::table
            .find(id.get())
            .first::<DbUser>(&mut conn)
            .optional()?;

        db_user
            .map(|user| User::try_from(user).map_err(RepositoryError::from))
            .transpose()
    }

    fn get_user_by_username(&self, username: &Username) -> RepositoryResult<Option<User>> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let db_user = users::table
            .filter(users::username.eq(username.as_str()))
            .first::<DbUser>(&mut conn)
            .optional()?;

        db_user
            .map(|user| User::try_from(user).map_err(RepositoryError::from))
            .transpose()
    }

    fn list_users(&self, query: UserListQuery) -> RepositoryResult<(usize, Vec<User>)> {
        use crate::schema::users;

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = users::table.into_boxed::<diesel::sqlite::Sqlite>();
            if !query.include_deleted {
                items = items.filter(users::is_deleted.eq(false));
            }
            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder().order(users::id.asc());
        if let Some(pagination) = &query.pagination {
            items = items
                .offset(pagination.offset())
                .limit(pagination.limit());
        }

        let users = items
            .load::<DbUser>(&mut conn)?
            .into_iter()
            .map(|user| User::try_from(user).map_err(RepositoryError::from))
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok((total, users))
    }
}

impl UserWriter for DieselRepository {
    fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let insertable: DbNewUser = new_user.into();

        let db_user = diesel::insert_into(users::table)
            .values(&insertable)
            .get_result::<DbUser>(&mut conn)?;

        User::try_from(db_user).map_err(RepositoryError::from)
    }

    fn set_user_admin(&self, id: UserId, is_admin: bool) -> RepositoryResult<User> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let db_user = diesel::update(users::table.find(id.get()))
            .set((
                users::is_admin.eq(is_admin),
                users::updated_at.eq(Utc::now().naive_utc()),
            ))
            .get_result::<DbUser>(&mut conn)?;

        User::try_from(db_user).map_err(RepositoryError::from)
    }

    fn soft_delete_user(&self, id: UserId) -> RepositoryResult<usize> {
        use crate::schema::{posts, users};

        let mut conn = self.conn()?;
        let now = Utc::now().naive_utc();

        conn.transaction::<usize, diesel::result::Error, _>(|conn| {
            let updated = diesel::update(users::table.find(id.get()))
                .set((users::is_deleted.eq(true), users::updated_at.eq(now)))
                .execute(conn)?;
            if updated == 0 {
                return Err(diesel::result::Error::NotFound);
            }

            diesel::update(
                posts::table
                    .filter(posts::user_id.eq(id.get()))
                    .filter(posts::is_deleted.eq(false)),
            )
            .set((posts::is_deleted.eq(true), posts::updated_at.eq(now)))
            .execute(conn)
        })
        .map_err(RepositoryError::from)
    }
}
