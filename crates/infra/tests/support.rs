//! Shared fixtures for infra integration tests

#![allow(dead_code)]

use std::sync::Arc;

use tempfile::TempDir;
use tempo_infra::{DbManager, SqliteTagRepository, SqliteTemplateRepository, SqliteTimerRepository};

/// Temporary database wrapper that keeps the underlying file alive for the
/// duration of a test run.
pub struct TestDatabase {
    pub manager: Arc<DbManager>,
    _temp_dir: TempDir,
}

impl TestDatabase {
    /// Create a new temporary database with the schema applied.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("temp dir should be created");
        let db_path = temp_dir.path().join("test.db");

        let manager = DbManager::new(&db_path, 4).expect("db manager should be created");
        manager.run_migrations().expect("schema should apply");

        Self { manager: Arc::new(manager), _temp_dir: temp_dir }
    }

    pub fn timers(&self) -> Arc<SqliteTimerRepository> {
        Arc::new(SqliteTimerRepository::new(Arc::clone(&self.manager)))
    }

    pub fn tags(&self) -> Arc<SqliteTagRepository> {
        Arc::new(SqliteTagRepository::new(Arc::clone(&self.manager)))
    }

    pub fn templates(&self) -> Arc<SqliteTemplateRepository> {
        Arc::new(SqliteTemplateRepository::new(Arc::clone(&self.manager)))
    }

    /// Count rows in `table`
    pub fn count(&self, table: &str) -> i64 {
        let conn = self.manager.get_connection().expect("connection should be available");
        conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
            .expect("count query should succeed")
    }
}

impl Default for TestDatabase {
    fn default() -> Self {
        Self::new()
    }
}
