// Shared test helpers for database setup and test data creation.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use sqlx::{Row, SqlitePool};
use std::path::Path;

use cocina_retriever::run_migrations;

/// Creates a test database pool with migrations applied.
/// Uses an in-memory database for fast test execution.
#[allow(dead_code)] // Used by other test files
pub async fn create_test_pool() -> SqlitePool {
    let pool = SqlitePool::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database pool");
    run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

/// Creates a test database pool from a file path.
/// Useful for tests that need persistence or that pre-seed a database for a
/// later `run_retrieval` over the same file.
/// If the database file already exists, it will be reused (not truncated).
#[allow(dead_code)] // Used by other test files
pub async fn create_test_pool_with_path(db_path: &Path) -> SqlitePool {
    // Create the database file first (SQLite requires the file to exist or be created)
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    // Use OpenOptions to avoid truncating existing database files
    std::fs::OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .read(true)
        .open(db_path)
        .expect("Failed to create/open database file");

    let pool = SqlitePool::connect(&format!("sqlite:{}", db_path.to_string_lossy()))
        .await
        .expect("Failed to create test database");

    // Only run migrations if the database is new (check if druids table exists)
    let table_exists: bool = sqlx::query_scalar(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='druids'",
    )
    .fetch_one(&pool)
    .await
    .map(|count: i64| count > 0)
    .unwrap_or(false);

    if !table_exists {
        run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
    }

    pool
}

/// Creates a registry row for a druid and returns its ID.
/// Uses direct SQL insertion so tests can seed state without going through
/// the retrieval workflow.
#[allow(dead_code)] // Used by other test files
pub async fn create_test_druid(pool: &SqlitePool, druid: &str, timestamp: i64) -> i64 {
    sqlx::query(
        "INSERT INTO druids (druid, created_at, updated_at) VALUES (?, ?, ?) RETURNING id",
    )
    .bind(druid)
    .bind(timestamp)
    .bind(timestamp)
    .fetch_one(pool)
    .await
    .expect("Failed to insert test druid")
    .get::<i64, _>(0)
}

/// Creates a retrieval attempt row linked to a registry entry.
/// Convenience for tests that need a druid to already count as attempted.
#[allow(dead_code)] // Used by other test files
pub async fn create_test_attempt(pool: &SqlitePool, druid_id: i64, status: u16, timestamp: i64) {
    sqlx::query(
        "INSERT INTO retrieval_attempts (druid_id, response_status, response_reason_phrase, output_path, created_at)
         VALUES (?, ?, ?, NULL, ?)",
    )
    .bind(druid_id)
    .bind(status)
    .bind("OK")
    .bind(timestamp)
    .execute(pool)
    .await
    .expect("Failed to insert test attempt");
}
