//! Shared helpers for integration tests.

#![allow(dead_code)]

use lognest::db::{DbPool, establish_connection_pool, get_connection, run_migrations};
use lognest::repository::DieselRepository;
use tempfile::TempDir;

/// A migrated SQLite database living in its own temporary directory.
pub struct TestDb {
    pool: DbPool,
    _dir: TempDir,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join(name);
        let pool = establish_connection_pool(path.to_str().expect("utf-8 path"))
            .expect("build connection pool");

        let mut conn = get_connection(&pool).expect("get connection");
        run_migrations(&mut conn, false).expect("run migrations");

        Self { pool, _dir: dir }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn repository(&self) -> DieselRepository {
        DieselRepository::new(self.pool())
    }
}
