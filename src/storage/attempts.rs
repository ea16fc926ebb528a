//! Retrieval attempt log.
//!
//! Appends one row per completed attempt, linked to the druid registry.
//! Rows are created after any archiving, so they carry the archived path or
//! its absence, and are never mutated afterwards.

use std::path::Path;

use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::error_handling::DatabaseError;
use crate::storage::models::RetrievalAttempt;
use crate::storage::registry;

/// Records one retrieval attempt for `druid`.
///
/// Resolves the registry entry (creating or touching it), refreshes it to
/// durable state, then appends the attempt row. Returns the attempt row id.
///
/// # Errors
///
/// Returns `DatabaseError` if the registry upsert, the refresh, or the
/// insert fails. Callers above this layer catch and log so one bad attempt
/// never aborts a batch.
pub async fn record_attempt(
    pool: &SqlitePool,
    druid: &str,
    status: u16,
    reason_phrase: &str,
    output_path: Option<&Path>,
) -> Result<i64, DatabaseError> {
    let entry = registry::get_or_create(pool, druid).await?;
    let entry = registry::refresh(pool, &entry).await?;

    log::debug!("Recording attempt: druid={druid} status={status}");

    let output_path = output_path.map(|p| p.to_string_lossy().to_string());
    let attempt_id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO retrieval_attempts
         (druid_id, response_status, response_reason_phrase, output_path, created_at)
         VALUES (?, ?, ?, ?, ?)
         RETURNING id",
    )
    .bind(entry.id)
    .bind(status)
    .bind(reason_phrase)
    .bind(&output_path)
    .bind(Utc::now().timestamp_millis())
    .fetch_one(pool)
    .await
    .map_err(|e| {
        log::error!("Failed to insert retrieval attempt for druid {druid} (status: {status}): {e}");
        DatabaseError::SqlError(e)
    })?;

    Ok(attempt_id)
}

/// Returns all attempt rows for `druid`, oldest first.
///
/// # Errors
///
/// Returns `DatabaseError::SqlError` if the query fails.
pub async fn attempts_for_druid(
    pool: &SqlitePool,
    druid: &str,
) -> Result<Vec<RetrievalAttempt>, DatabaseError> {
    let rows = sqlx::query(
        "SELECT ra.id, ra.druid_id, ra.response_status, ra.response_reason_phrase,
                ra.output_path, ra.created_at
         FROM retrieval_attempts ra
         JOIN druids d ON d.id = ra.druid_id
         WHERE d.druid = ?
         ORDER BY ra.id",
    )
    .bind(druid)
    .fetch_all(pool)
    .await
    .map_err(DatabaseError::SqlError)?;

    Ok(rows.iter().map(attempt_from_row).collect())
}

fn attempt_from_row(row: &SqliteRow) -> RetrievalAttempt {
    RetrievalAttempt {
        id: row.get("id"),
        druid_id: row.get("druid_id"),
        response_status: row.get("response_status"),
        response_reason_phrase: row.get("response_reason_phrase"),
        output_path: row.get("output_path"),
        created_at: row.get("created_at"),
    }
}
