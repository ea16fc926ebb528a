//! Druid identifier registry.
//!
//! Find-or-create bookkeeping over the `druids` table. Atomicity of
//! find-or-create is delegated to SQLite's `ON CONFLICT` upsert, so parallel
//! writers cannot produce duplicate rows for the same druid string.

use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::error_handling::DatabaseError;
use crate::storage::models::DruidRecord;

fn druid_record_from_row(row: &SqliteRow) -> DruidRecord {
    DruidRecord {
        id: row.get("id"),
        druid: row.get("druid"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

/// Finds the registry entry for `druid`, creating it if absent.
///
/// Exactly one row ever exists per druid string. On conflict the existing
/// row's `updated_at` is bumped, so a new attempt "touches" its entry.
/// Returns the durable row either way.
///
/// # Errors
///
/// Returns `DatabaseError::SqlError` if the upsert fails.
pub async fn get_or_create(pool: &SqlitePool, druid: &str) -> Result<DruidRecord, DatabaseError> {
    let now = Utc::now().timestamp_millis();
    let row = sqlx::query(
        "INSERT INTO druids (druid, created_at, updated_at)
         VALUES (?, ?, ?)
         ON CONFLICT(druid) DO UPDATE SET updated_at = excluded.updated_at
         RETURNING id, druid, created_at, updated_at",
    )
    .bind(druid)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
    .map_err(DatabaseError::SqlError)?;

    Ok(druid_record_from_row(&row))
}

/// Re-reads a registry entry from the database by id.
///
/// The attempt recorder links attempts against the durable row state, never
/// against a value cached across calls.
///
/// # Errors
///
/// Returns `DatabaseError::SqlError` if the row cannot be read (including
/// when it no longer exists, which would indicate outside interference).
pub async fn refresh(
    pool: &SqlitePool,
    record: &DruidRecord,
) -> Result<DruidRecord, DatabaseError> {
    let row = sqlx::query("SELECT id, druid, created_at, updated_at FROM druids WHERE id = ?")
        .bind(record.id)
        .fetch_one(pool)
        .await
        .map_err(DatabaseError::SqlError)?;

    Ok(druid_record_from_row(&row))
}

/// Returns up to `limit` druids that have no retrieval attempts yet.
///
/// Ordered by registry insertion order. Druids with at least one attempt
/// row, even a failed one, are excluded.
///
/// # Errors
///
/// Returns `DatabaseError::SqlError` if the selection query fails.
pub async fn unretrieved(pool: &SqlitePool, limit: usize) -> Result<Vec<String>, DatabaseError> {
    let rows = sqlx::query(
        "SELECT d.druid
         FROM druids d
         LEFT JOIN retrieval_attempts ra ON ra.druid_id = d.id
         WHERE ra.id IS NULL
         ORDER BY d.id
         LIMIT ?",
    )
    .bind(limit as i64)
    .fetch_all(pool)
    .await
    .map_err(DatabaseError::SqlError)?;

    Ok(rows.iter().map(|row| row.get("druid")).collect())
}
