//! Database row types.

/// One row of the druid identifier registry.
///
/// Registry entries are created lazily the first time an attempt touches a
/// druid and are never deleted; `updated_at` is bumped whenever a new attempt
/// links to the entry. Timestamps are milliseconds since the Unix epoch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DruidRecord {
    /// Row id, referenced by `retrieval_attempts.druid_id`.
    pub id: i64,
    /// The druid string, unique across the registry.
    pub druid: String,
    /// Creation time in epoch milliseconds.
    pub created_at: i64,
    /// Last touch time in epoch milliseconds.
    pub updated_at: i64,
}

/// One row of the retrieval attempt log.
///
/// Append-only: rows are never mutated after creation. `output_path` is
/// `None` when archiving was skipped, disabled, or failed for the attempt.
/// A `response_status` of 0 marks a transport-level failure where no HTTP
/// response arrived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrievalAttempt {
    /// Row id.
    pub id: i64,
    /// Parent registry entry.
    pub druid_id: i64,
    /// HTTP status of the response, or 0 for transport failures.
    pub response_status: u16,
    /// Canonical reason phrase, or the transport error text.
    pub response_reason_phrase: String,
    /// Where the payload was archived, if it was.
    pub output_path: Option<String>,
    /// Creation time in epoch milliseconds.
    pub created_at: i64,
}
