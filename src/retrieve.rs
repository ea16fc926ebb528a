//! The retrieval attempt workflow.
//!
//! This is the heart of the tool: fetch the cocina document for one druid,
//! classify the outcome, archive the payload per policy, and append an
//! attempt record. The public entry points never return errors for a single
//! druid; anything unexpected is logged and swallowed so a batch of many
//! druids always runs to completion.

use std::sync::Arc;

use anyhow::Context;
use log::{debug, error, info, warn};
use sqlx::SqlitePool;

use crate::archive::archive_response;
use crate::config::CocinaOutputConfig;
use crate::error_handling::DatabaseError;
use crate::fetch::{DsaClient, ObjectResponse};
use crate::storage::{record_attempt, registry};

/// Retrieves cocina documents and logs every attempt.
///
/// Holds the repository service client, the database pool, and the archive
/// policies for both outcome kinds. One value drives a whole batch run.
#[derive(Debug, Clone)]
pub struct CocinaRetriever {
    client: DsaClient,
    pool: Arc<SqlitePool>,
    output: CocinaOutputConfig,
}

impl CocinaRetriever {
    /// Creates a retriever over the given client, pool, and archive policies.
    pub fn new(client: DsaClient, pool: Arc<SqlitePool>, output: CocinaOutputConfig) -> Self {
        Self {
            client,
            pool,
            output,
        }
    }

    /// Attempts retrieval for up to `max_count` druids with no attempts yet.
    ///
    /// Druids are processed sequentially and independently; an attempt that
    /// goes wrong is logged by [`Self::try_retrieval_and_log_result`] and the
    /// batch moves on. Returns the number of druids attempted.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` only if the unretrieved-druids selection
    /// itself fails, which precedes any attempt.
    pub async fn try_retrieving_unseen_druids(
        &self,
        max_count: usize,
    ) -> Result<usize, DatabaseError> {
        let druids = registry::unretrieved(&self.pool, max_count).await?;
        info!("Retrieving {} unseen druids", druids.len());

        for druid in &druids {
            self.try_retrieval_and_log_result(druid).await;
        }

        Ok(druids.len())
    }

    /// Runs one complete attempt for `druid`, suppressing unexpected errors.
    ///
    /// Returns the response envelope that was classified and recorded, or
    /// `None` if the workflow itself failed (in practice: the attempt record
    /// could not be persisted). Transport-level fetch failures do not come
    /// back as `None`; they are classified as failure outcomes with status 0
    /// and recorded like any other attempt.
    pub async fn try_retrieval_and_log_result(&self, druid: &str) -> Option<ObjectResponse> {
        match self.attempt(druid).await {
            Ok(response) => Some(response),
            Err(e) => {
                error!("Tried to retrieve {druid} and log result, but an unexpected error occurred: {e:#}");
                None
            }
        }
    }

    /// The fallible attempt body: fetch, classify, archive, record.
    async fn attempt(&self, druid: &str) -> anyhow::Result<ObjectResponse> {
        info!("Retrieving {druid}");

        let response = match self.client.object_show(druid).await {
            Ok(response) => response,
            Err(e) => {
                debug!("Transport failure for {druid}: {e}");
                ObjectResponse::from_transport_error(&e)
            }
        };

        let output_path = if response.is_success() {
            info!(
                "Success: {} {} retrieving {druid}",
                response.status, response.reason_phrase
            );
            archive_response(druid, &response, &self.output.success)
        } else {
            warn!(
                "Failure: {} {} retrieving {druid} : {}",
                response.status, response.reason_phrase, response.body
            );
            archive_response(druid, &response, &self.output.failure)
        };

        record_attempt(
            &self.pool,
            druid,
            response.status,
            &response.reason_phrase,
            output_path.as_deref(),
        )
        .await
        .with_context(|| format!("Failed to record retrieval attempt for {druid}"))?;

        Ok(response)
    }
}
