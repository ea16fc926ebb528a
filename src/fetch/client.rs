//! Repository service (DSA) client.

use std::collections::BTreeMap;
use std::sync::Arc;

use log::debug;
use reqwest::header::{HeaderMap, ACCEPT};

use crate::error_handling::{FetchError, InitializationError};
use crate::fetch::response::ObjectResponse;

/// Client for the repository service's object endpoint.
///
/// Wraps the shared `reqwest::Client` with the validated base URL, exposing
/// one call: fetch the cocina document for a druid.
#[derive(Debug, Clone)]
pub struct DsaClient {
    base_url: String,
    client: Arc<reqwest::Client>,
}

impl DsaClient {
    /// Creates a client for the repository service at `base_url`.
    ///
    /// The URL is validated up front so a bad `--dsa-url` fails the run
    /// before any druid is attempted, not on the first request.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::InvalidDsaUrl` if the URL does not
    /// parse, uses a scheme other than http/https, or has no host.
    pub fn new(base_url: &str, client: Arc<reqwest::Client>) -> Result<Self, InitializationError> {
        let parsed = url::Url::parse(base_url).map_err(|e| InitializationError::InvalidDsaUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(InitializationError::InvalidDsaUrl {
                url: base_url.to_string(),
                reason: format!("unsupported scheme {:?}", parsed.scheme()),
            });
        }
        if parsed.host().is_none() {
            return Err(InitializationError::InvalidDsaUrl {
                url: base_url.to_string(),
                reason: "missing host".to_string(),
            });
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Fetches the cocina document for `druid` from the repository service.
    ///
    /// Issues `GET {base_url}/v1/objects/{druid}` with
    /// `Accept: application/json` and captures the whole response as an
    /// [`ObjectResponse`]. Non-200 statuses are not errors here; the caller
    /// classifies them.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Request` if the request could not be sent and
    /// `FetchError::Body` if the response body could not be read.
    pub async fn object_show(&self, druid: &str) -> Result<ObjectResponse, FetchError> {
        let url = format!("{}/v1/objects/{}", self.base_url, druid);
        debug!("GET {url}");

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|source| FetchError::Request {
                druid: druid.to_string(),
                source,
            })?;

        let status = response.status();
        let headers = fold_headers(response.headers());
        let body = response.text().await.map_err(|source| FetchError::Body {
            druid: druid.to_string(),
            source,
        })?;

        Ok(ObjectResponse {
            status: status.as_u16(),
            reason_phrase: status.canonical_reason().unwrap_or("").to_string(),
            headers,
            body,
        })
    }
}

/// Collapses a `HeaderMap` into name → value pairs, joining duplicates.
fn fold_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    headers
        .keys()
        .map(|name| {
            let joined = headers
                .get_all(name)
                .iter()
                .map(|value| value.to_str().unwrap_or(""))
                .collect::<Vec<_>>()
                .join(", ");
            (name.as_str().to_string(), joined)
        })
        .collect()
}
