//! Domain aggregates exposed by the blog service layer.

pub mod post;
pub mod types;
pub mod user;
