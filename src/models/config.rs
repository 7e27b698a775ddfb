//! Configuration model loaded from external sources.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    /// Cookie domain; host-only cookies when unset.
    #[serde(default)]
    pub domain: Option<String>,
    pub address: String,
    pub port: u16,
    pub database_url: String,
    pub templates_dir: String,
    /// Signs session cookies, flash messages and JWTs. Must be at least 64 bytes.
    pub secret: String,
    #[serde(default = "default_jwt_ttl_hours")]
    pub jwt_ttl_hours: i64,
    #[serde(default)]
    pub cookie_secure: bool,
}

fn default_jwt_ttl_hours() -> i64 {
    1
}

/// Longest accepted session lifetime: one year.
pub const MAX_JWT_TTL_HOURS: i64 = 24 * 366;

impl ServerConfig {
    /// Session lifetime in hours, clamped to `1..=MAX_JWT_TTL_HOURS`.
    pub fn session_ttl_hours(&self) -> i64 {
        self.jwt_ttl_hours.clamp(1, MAX_JWT_TTL_HOURS)
    }
}
