//! Services handling signup, login and session resolution.

use chrono::Duration;

use crate::domain::types::Username;
use crate::domain::user::{NewUser, User};
use crate::forms::auth::{LoginForm, SignupForm, SignupPayload};
use crate::models::auth::AuthenticatedUser;
use crate::repository::errors::RepositoryError;
use crate::repository::{UserReader, UserWriter};
use crate::services::{ServiceError, ServiceResult};

/// Message shown when the username or email is already registered.
pub const USER_EXISTS_MESSAGE: &str = "This user already exists";

#[cfg(not(test))]
const PASSWORD_HASH_COST: u32 = bcrypt::DEFAULT_COST;
#[cfg(test)]
const PASSWORD_HASH_COST: u32 = 4;

/// Hashes a plain-text password with bcrypt.
pub fn hash_password(password: &str) -> ServiceResult<String> {
    Ok(bcrypt::hash(password, PASSWORD_HASH_COST)?)
}

/// Checks a plain-text password against a stored bcrypt hash.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    bcrypt::verify(password, password_hash).unwrap_or_else(|err| {
        log::error!("Failed to verify password hash: {err}");
        false
    })
}

/// Validates the signup form and registers a new, non-admin account.
pub fn signup<R>(repo: &R, form: SignupForm) -> ServiceResult<User>
where
    R: UserReader + UserWriter + ?Sized,
{
    let payload = SignupPayload::try_from(form)?;

    if repo.get_user_by_username(&payload.username)?.is_some() {
        return Err(ServiceError::Conflict(USER_EXISTS_MESSAGE.to_string()));
    }

    let new_user = NewUser::new(
        payload.username,
        payload.email,
        payload.first_name,
        payload.last_name,
        hash_password(&payload.password)?,
    );

    // The email index can still reject the insert.
    let user = repo.create_user(&new_user).map_err(|err| match err {
        RepositoryError::UniqueViolation(_) => {
            ServiceError::Conflict(USER_EXISTS_MESSAGE.to_string())
        }
        other => ServiceError::from(other),
    })?;

    log::info!("Registered user {}", user.username);
    Ok(user)
}

/// Checks credentials and returns a signed session token.
///
/// Unknown users and wrong passwords both yield [`ServiceError::Unauthorized`];
/// a deleted account with the right password yields [`ServiceError::Forbidden`].
pub fn login<R>(repo: &R, form: LoginForm, secret: &str, ttl: Duration) -> ServiceResult<String>
where
    R: UserReader + ?Sized,
{
    let Ok(username) = Username::new(form.username) else {
        return Err(ServiceError::Unauthorized);
    };

    let Some(user) = repo.get_user_by_username(&username)? else {
        log::info!("Login attempt for unknown user {username}");
        return Err(ServiceError::Unauthorized);
    };

    if !verify_password(&form.password, &user.password_hash) {
        log::info!("Wrong password for user {username}");
        return Err(ServiceError::Unauthorized);
    }

    if !user.is_active() {
        log::info!("Login attempt for deleted user {username}");
        return Err(ServiceError::Forbidden);
    }

    let token = AuthenticatedUser::issue(&user, ttl).to_jwt(secret)?;
    Ok(token)
}

/// Resolves the live account behind a session token.
///
/// Tokens of deleted or vanished accounts are rejected even before they expire.
pub fn current_user<R>(repo: &R, session: &AuthenticatedUser) -> ServiceResult<User>
where
    R: UserReader + ?Sized,
{
    let user_id = session
        .user_id()
        .map_err(|_| ServiceError::Unauthorized)?;

    match repo.get_user_by_id(user_id)? {
        Some(user) if user.is_active() => Ok(user),
        _ => Err(ServiceError::Unauthorized),
    }
}

/// Like [`current_user`] but also requires the stored admin flag.
pub fn require_admin<R>(repo: &R, session: &AuthenticatedUser) -> ServiceResult<User>
where
    R: UserReader + ?Sized,
{
    let user = current_user(repo, session)?;
    if !user.is_admin {
        log::warn!("User {} tried to access the admin panel", user.username);
        return Err(ServiceError::Forbidden);
    }
    Ok(user)
}
