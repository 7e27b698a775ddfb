//! Database models and request-scoped records shared across the blog.

#[cfg(feature = "server")]
pub mod auth;
#[cfg(feature = "server")]
pub mod config;
pub mod post;
pub mod user;
