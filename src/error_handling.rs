//! Error type definitions.
//!
//! One enum per concern: initialization, database access, remote fetching,
//! archiving, and druid parsing. Everything below the retrieval orchestrator
//! returns these types; only the orchestrator decides to log-and-suppress.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// The configured repository service URL is unusable.
    #[error("Invalid DSA base URL {url:?}: {reason}")]
    InvalidDsaUrl {
        /// The URL as it appeared in configuration.
        url: String,
        /// Why the URL was rejected.
        reason: String,
    },
}

/// Error types for database operations.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error creating the database file.
    #[error("Database file creation error: {0}")]
    FileCreationError(String),

    /// SQL execution error.
    #[error("SQL error: {0}")]
    SqlError(#[from] sqlx::Error),
}

/// Error types for fetching an object from the repository service.
///
/// These cover transport-level failures only. A response that arrives with a
/// non-200 status is not an error here; the retrieval workflow classifies it.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request could not be sent or no response arrived.
    #[error("request for {druid} failed: {source}")]
    Request {
        /// The druid being fetched.
        druid: String,
        /// The underlying client error.
        source: ReqwestError,
    },

    /// The response arrived but its body could not be read.
    #[error("reading response body for {druid} failed: {source}")]
    Body {
        /// The druid being fetched.
        druid: String,
        /// The underlying client error.
        source: ReqwestError,
    },
}

/// Error types for archiving a response payload to disk.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// The identifier does not fit the druid scheme, so no path can be derived.
    #[error(transparent)]
    InvalidDruid(#[from] DruidError),

    /// The response envelope could not be serialized.
    #[error("failed to serialize response: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Directory creation or the file write failed.
    #[error("failed to write archive file: {0}")]
    Io(#[from] std::io::Error),
}

/// Error types for druid identifier parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DruidError {
    /// The input does not match the druid identifier scheme.
    #[error("malformed druid identifier: {0:?}")]
    Malformed(String),
}
