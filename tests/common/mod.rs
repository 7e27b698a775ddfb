//! Shared fixtures for the integration tests.

use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tempfile::TempDir;

use pushkind_blog::db::{DbPool, establish_connection_pool};
use pushkind_blog::domain::types::{PersonName, UserEmail, Username};
use pushkind_blog::domain::user::NewUser;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// A migrated SQLite database living in its own temporary directory.
///
/// The directory, and with it the database and its WAL files, is removed on
/// drop.
pub struct TestDb {
    pool: DbPool,
    _dir: TempDir,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join(name);
        let pool = establish_connection_pool(path.to_str().expect("utf-8 path"))
            .expect("create pool");

        let mut conn = pool.get().expect("get connection");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("run migrations");

        Self { pool, _dir: dir }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }
}

/// Builds a registration with a fixed hash; repository tests never verify it.
#[allow(dead_code)]
pub fn new_user(username: &str) -> NewUser {
    NewUser::new(
        Username::new(username).unwrap(),
        UserEmail::new(format!("{username}@example.com")).unwrap(),
        PersonName::new("Test").unwrap(),
        PersonName::new(username).unwrap(),
        "$2b$04$not-a-real-hash".to_string(),
    )
}
