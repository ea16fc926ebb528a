//! cocina_retriever library: druid metadata retrieval and archiving
//!
//! This library registers druid identifiers in a local SQLite database,
//! retrieves their cocina metadata from a repository service (DSA), archives
//! the raw response payloads to druid-derived timestamped file paths, and
//! records every retrieval attempt so that one batch run never touches the
//! same druid twice.
//!
//! # Example
//!
//! ```no_run
//! use cocina_retriever::{run_retrieval, Config};
//! use tokio;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     druid_file: Some(std::path::PathBuf::from("druids.txt")),
//!     dsa_url: "http://dsa.example.org:3000".to_string(),
//!     max_unseen_druids: 50,
//!     ..Default::default()
//! };
//!
//! let report = run_retrieval(config).await?;
//! println!("Registered {} druids, attempted {} in {:.1}s",
//!          report.registered_druids, report.attempted_druids, report.elapsed_seconds);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your
//! application or ensure you're calling library functions within an async
//! context.

#![warn(missing_docs)]

pub mod archive;
pub mod config;
pub mod druid;
pub mod error_handling;
pub mod fetch;
pub mod initialization;
pub mod retrieve;
pub mod storage;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use druid::Druid;
pub use fetch::{DsaClient, ObjectResponse};
pub use retrieve::CocinaRetriever;
pub use run::{run_retrieval, RetrievalReport};
pub use storage::run_migrations;

// Internal run module (contains the main retrieval workflow)
mod run {
    use std::path::{Path, PathBuf};
    use std::sync::Arc;

    use anyhow::{Context, Result};
    use log::{info, warn};
    use sqlx::SqlitePool;
    use tokio::io::{AsyncBufReadExt, BufReader};

    use crate::config::Config;
    use crate::druid::Druid;
    use crate::fetch::DsaClient;
    use crate::initialization::init_client;
    use crate::retrieve::CocinaRetriever;
    use crate::storage::registry;
    use crate::storage::{init_db_pool_with_path, run_migrations};

    /// Results of a retrieval run.
    ///
    /// Contains summary statistics and metadata about the completed run.
    #[derive(Debug, Clone)]
    pub struct RetrievalReport {
        /// Number of druids registered (or refreshed) from the druid file
        pub registered_druids: usize,
        /// Number of previously unseen druids attempted in this run
        pub attempted_druids: usize,
        /// Path to the SQLite database containing the attempt log
        pub db_path: PathBuf,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
    }

    /// Runs a retrieval batch with the provided configuration.
    ///
    /// This is the main entry point for the library. If a druid file is
    /// configured, its druids are registered first; then every registered
    /// druid without a prior retrieval attempt (up to the configured cap) is
    /// fetched from the repository service, archived per policy, and
    /// recorded in the attempt log.
    ///
    /// # Arguments
    ///
    /// * `config` - Configuration for the run (druid file, service URL,
    ///   archive policies, etc.)
    ///
    /// # Returns
    ///
    /// Returns a `RetrievalReport` containing summary statistics, or an
    /// error if the run failed to complete.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The druid file cannot be opened
    /// - Database initialization or migration fails
    /// - The HTTP client or service URL cannot be initialized
    ///
    /// Individual retrieval attempts that go wrong never fail the run; they
    /// are logged and recorded like any other attempt.
    pub async fn run_retrieval(config: Config) -> Result<RetrievalReport> {
        let start_time = std::time::Instant::now();

        let pool = init_db_pool_with_path(&config.db_path)
            .await
            .context("Failed to initialize database pool")?;
        run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;

        let client = init_client(&config).context("Failed to initialize HTTP client")?;
        let dsa_client = DsaClient::new(&config.dsa_url, client)
            .context("Failed to initialize repository service client")?;
        let retriever = CocinaRetriever::new(dsa_client, Arc::clone(&pool), config.cocina_output());

        let registered_druids = match &config.druid_file {
            Some(path) => register_druids_from_file(&pool, path).await?,
            None => 0,
        };

        info!("Starting retrieval run against {}", config.dsa_url);
        let attempted_druids = retriever
            .try_retrieving_unseen_druids(config.max_unseen_druids)
            .await
            .context("Failed to retrieve unseen druids")?;

        if let Err(e) = sqlx::query("PRAGMA wal_checkpoint(TRUNCATE)")
            .execute(pool.as_ref())
            .await
        {
            warn!("Failed to checkpoint WAL file (this is non-critical): {e}");
        }

        Ok(RetrievalReport {
            registered_druids,
            attempted_druids,
            db_path: config.db_path.clone(),
            elapsed_seconds: start_time.elapsed().as_secs_f64(),
        })
    }

    /// Registers every druid listed in `path`, one per line.
    ///
    /// Blank lines and `#` comments are skipped; lines that do not parse as
    /// druids are logged and skipped. Druids are stored in bare form, so a
    /// `druid:`-prefixed line registers the same entry as its bare twin.
    async fn register_druids_from_file(pool: &SqlitePool, path: &Path) -> Result<usize> {
        let file = tokio::fs::File::open(path)
            .await
            .with_context(|| format!("Failed to open druid file {}", path.display()))?;
        let mut lines = BufReader::new(file).lines();
        let mut registered = 0usize;

        loop {
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(e) => {
                    warn!("Failed to read line from druid file: {e}");
                    continue;
                }
            };

            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            match Druid::parse(trimmed) {
                Ok(druid) => {
                    registry::get_or_create(pool, druid.as_str())
                        .await
                        .with_context(|| format!("Failed to register druid {druid}"))?;
                    registered += 1;
                }
                Err(e) => {
                    warn!("Skipping druid file line: {e}");
                }
            }
        }

        info!("Registered {} druids from {}", registered, path.display());
        Ok(registered)
    }
}
