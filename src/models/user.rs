//! Diesel models representing user accounts.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::types::{PersonName, TypeConstraintError, UserEmail, UserId, Username};
use crate::domain::user::{NewUser as DomainNewUser, User as DomainUser};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::users)]
/// Diesel model for [`crate::domain::user::User`].
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub is_admin: bool,
    pub is_deleted: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::users)]
/// Insertable form of [`User`].
pub struct NewUser<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub password_hash: &'a str,
}

impl TryFrom<User> for DomainUser {
    type Error = TypeConstraintError;

    fn try_from(user: User) -> Result<Self, Self::Error> {
        Ok(Self {
            id: UserId::try_from(user.id)?,
            username: Username::new(user.username)?,
            email: UserEmail::new(user.email)?,
            first_name: PersonName::new(user.first_name)?,
            last_name: PersonName::new(user.last_name)?,
            password_hash: user.password_hash,
            is_admin: user.is_admin,
            is_deleted: user.is_deleted,
            created_at: user.created_at,
            updated_at: user.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewUser> for NewUser<'a> {
    fn from(user: &'a DomainNewUser) -> Self {
        Self {
            username: user.username.as_str(),
            email: user.email.as_str(),
            first_name: user.first_name.as_str(),
            last_name: user.last_name.as_str(),
            password_hash: user.password_hash.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn from_domain_new_user() {
        let domain = DomainNewUser::new(
            Username::new("alice").unwrap(),
            UserEmail::new("Alice@Example.com").unwrap(),
            PersonName::new("Alice").unwrap(),
            PersonName::new("Liddell").unwrap(),
            "hash".to_string(),
        );
        let new: NewUser = (&domain).into();
        assert_eq!(new.username, "alice");
        assert_eq!(new.email, "alice@example.com");
        assert_eq!(new.first_name, "Alice");
        assert_eq!(new.last_name, "Liddell");
        assert_eq!(new.password_hash, "hash");
    }

    #[test]
    fn user_into_domain() {
        let now = Utc::now().naive_utc();
        let db = User {
            id: 3,
            username: "bob".into(),
            email: "bob@example.com".into(),
            first_name: "Bob".into(),
            last_name: "Builder".into(),
            password_hash: "hash".into(),
            is_admin: true,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        };
        let domain = DomainUser::try_from(db).expect("valid user");
        assert_eq!(domain.id.get(), 3);
        assert_eq!(domain.username.as_str(), "bob");
        assert!(domain.is_admin);
        assert!(domain.is_active());
        assert_eq!(domain.display_name(), "Bob Builder");
    }

    #[test]
    fn user_with_bad_id_is_rejected() {
        let now = Utc::now().naive_utc();
        let db = User {
            id: 0,
            username: "bob".into(),
            email: "bob@example.com".into(),
            first_name: "Bob".into(),
            last_name: "Builder".into(),
            password_hash: "hash".into(),
            is_admin: false,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        };
        assert_eq!(
            DomainUser::try_from(db),
            Err(TypeConstraintError::NonPositiveId)
        );
    }
}
