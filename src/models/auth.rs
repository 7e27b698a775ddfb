//! Session claims carried in the identity cookie.
//!
//! On login the user's claims are signed into a JWT which actix-identity
//! stores in the session cookie. Every protected handler extracts
//! [`AuthenticatedUser`], which verifies the signature and expiry again.

use std::future::{Ready, ready};

use actix_identity::IdentityExt;
use actix_web::{FromRequest, HttpRequest, dev::Payload, error::ErrorUnauthorized, web};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::domain::types::{TypeConstraintError, UserId};
use crate::domain::user::User;
use crate::models::config::ServerConfig;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// User id as a string, per the JWT `sub` convention.
    pub sub: String,
    pub username: String,
    pub name: String,
    /// Snapshot at login time; admin checks re-read the stored flag.
    pub is_admin: bool,
    pub iat: i64,
    pub exp: i64,
}

impl AuthenticatedUser {
    /// Builds claims for `user` valid for `ttl` from now.
    pub fn issue(user: &User, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: user.id.to_string(),
            username: user.username.to_string(),
            name: user.display_name(),
            is_admin: user.is_admin,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }

    /// Signs the claims with HS256.
    pub fn to_jwt(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        encode(
            &Header::new(Algorithm::HS256),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Verifies signature and expiry and returns the embedded claims.
    pub fn from_jwt(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        let validation = Validation::new(Algorithm::HS256);
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &validation,
        )?;
        Ok(token_data.claims)
    }

    /// Parses the subject back into a [`UserId`].
    pub fn user_id(&self) -> Result<UserId, TypeConstraintError> {
        let id = self
            .sub
            .parse::<i32>()
            .map_err(|_| TypeConstraintError::NonPositiveId)?;
        UserId::new(id)
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(server_config) = req.app_data::<web::Data<ServerConfig>>() else {
            log::error!("ServerConfig is not registered as app data");
            return ready(Err(ErrorUnauthorized("Must be logged in")));
        };

        let token = match req.get_identity().and_then(|identity| identity.id()) {
            Ok(token) => token,
            Err(_) => return ready(Err(ErrorUnauthorized("Must be logged in"))),
        };

        ready(
            AuthenticatedUser::from_jwt(&token, &server_config.secret).map_err(|err| {
                log::warn!("Rejected session token: {err}");
                ErrorUnauthorized("Invalid session token")
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    fn claims(exp_offset: i64) -> AuthenticatedUser {
        let now = Utc::now().timestamp();
        AuthenticatedUser {
            sub: "7".to_string(),
            username: "alice".to_string(),
            name: "Alice Liddell".to_string(),
            is_admin: false,
            iat: now,
            exp: now + exp_offset,
        }
    }

    #[test]
    fn signed_token_is_accepted() {
        let original = claims(3600);
        let token = original.to_jwt(SECRET).unwrap();
        let decoded = AuthenticatedUser::from_jwt(&token, SECRET).unwrap();
        assert_eq!(decoded, original);
        assert_eq!(decoded.user_id().unwrap().get(), 7);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = claims(3600).to_jwt(SECRET).unwrap();
        assert!(AuthenticatedUser::from_jwt(&token, "other-secret").is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let token = claims(-3600).to_jwt(SECRET).unwrap();
        assert!(AuthenticatedUser::from_jwt(&token, SECRET).is_err());
    }

    #[test]
    fn malformed_subject_is_rejected() {
        let mut bad = claims(3600);
        bad.sub = "abc".to_string();
        assert_eq!(bad.user_id(), Err(TypeConstraintError::NonPositiveId));
    }
}
