//! Response envelope for repository service requests.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error_handling::FetchError;

/// Everything worth keeping from one repository service response.
///
/// This envelope is what gets archived to disk, so it derives serde both ways:
/// archived attempts can be decoded back for inspection. Headers use a
/// `BTreeMap` so the serialized document is deterministic; duplicate header
/// values are joined with `", "`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectResponse {
    /// HTTP status code; 0 for a transport-level failure.
    pub status: u16,
    /// Canonical reason phrase for the status, or the transport error text.
    pub reason_phrase: String,
    /// Response headers; empty for transport-level failures.
    pub headers: BTreeMap<String, String>,
    /// Raw response body; empty for transport-level failures.
    pub body: String,
}

impl ObjectResponse {
    /// Whether this response counts as a retrieval success.
    ///
    /// Only status 200 qualifies; redirects were already followed by the
    /// client, so anything else that remains is a failure outcome.
    pub fn is_success(&self) -> bool {
        self.status == 200
    }

    /// Builds a response-shaped value for a fetch that never produced one.
    ///
    /// Transport failures (connect, timeout, body read) are classified and
    /// recorded like any other failure outcome. Status 0 marks them apart
    /// from real HTTP statuses, and the error text stands in for the reason
    /// phrase.
    pub fn from_transport_error(error: &FetchError) -> Self {
        Self {
            status: 0,
            reason_phrase: error.to_string(),
            headers: BTreeMap::new(),
            body: String::new(),
        }
    }
}
