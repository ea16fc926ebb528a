//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (defaults for paths, timeouts, batch size)
//! - CLI option types and parsing
//! - Archive output policy types

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

// constants (used as defaults)
/// Default SQLite database file path.
pub const DB_PATH: &str = "./cocina_retriever.db";
/// Default base URL of the repository service (DSA).
pub const DEFAULT_DSA_URL: &str = "http://localhost:3000";
/// Default cap on how many unretrieved druids one batch run attempts.
pub const DEFAULT_MAX_UNSEEN_DRUIDS: usize = 100;
/// Default archive directory for success responses.
pub const SUCCESS_OUTPUT_DIR: &str = "./cocina/success";
/// Default archive directory for failure responses.
pub const FAILURE_OUTPUT_DIR: &str = "./cocina/failure";
/// Per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default User-Agent string for HTTP requests.
///
/// Identifies this tool to the repository service. Users can override it via
/// the `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str = concat!("cocina_retriever/", env!("CARGO_PKG_VERSION"));

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Archive policy for one response outcome kind.
///
/// Read at archive time; `should_output = false` means the archiver returns
/// without touching the filesystem.
#[derive(Debug, Clone)]
pub struct OutputPolicy {
    /// Whether responses of this kind are written to disk at all.
    pub should_output: bool,
    /// Base directory under which druid-derived paths are created.
    pub location: PathBuf,
}

/// Archive policies for both outcome kinds, as handed to the retriever.
#[derive(Debug, Clone)]
pub struct CocinaOutputConfig {
    /// Policy applied to 200 responses.
    pub success: OutputPolicy,
    /// Policy applied to everything else, including transport failures.
    pub failure: OutputPolicy,
}

/// Command-line options and configuration.
///
/// This struct is automatically generated by `clap` from the field attributes.
/// All options have sensible defaults and can be overridden via command-line
/// flags; it can also be constructed programmatically for library usage.
///
/// # Examples
///
/// ```bash
/// # Register druids from a file, then retrieve the unseen ones
/// cocina_retriever druids.txt --dsa-url http://dsa.example.org:3000
///
/// # Retrieve up to 500 already-registered druids, skipping failure payloads
/// cocina_retriever --max-druids 500 --skip-failure-output
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "cocina_retriever",
    about = "Retrieves cocina metadata for druids, archives payloads, and logs every attempt."
)]
pub struct Config {
    /// Optional newline-delimited druid file to register before the batch
    #[arg(value_parser)]
    pub druid_file: Option<PathBuf>,

    /// Base URL of the repository service (DSA)
    #[arg(long, default_value = DEFAULT_DSA_URL)]
    pub dsa_url: String,

    /// Database path (SQLite file)
    #[arg(long, value_parser, default_value = DB_PATH)]
    pub db_path: PathBuf,

    /// Maximum number of unretrieved druids to attempt in this run
    #[arg(long = "max-druids", default_value_t = DEFAULT_MAX_UNSEEN_DRUIDS)]
    pub max_unseen_druids: usize,

    /// Directory where success (200) response payloads are archived
    #[arg(long, value_parser, default_value = SUCCESS_OUTPUT_DIR)]
    pub success_dir: PathBuf,

    /// Do not write success response payloads to disk
    #[arg(long)]
    pub skip_success_output: bool,

    /// Directory where failure (non-200) response payloads are archived
    #[arg(long, value_parser, default_value = FAILURE_OUTPUT_DIR)]
    pub failure_dir: PathBuf,

    /// Do not write failure response payloads to disk
    #[arg(long)]
    pub skip_failure_output: bool,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl Config {
    /// Builds the archive output policies from the directory and skip flags.
    pub fn cocina_output(&self) -> CocinaOutputConfig {
        CocinaOutputConfig {
            success: OutputPolicy {
                should_output: !self.skip_success_output,
                location: self.success_dir.clone(),
            },
            failure: OutputPolicy {
                should_output: !self.skip_failure_output,
                location: self.failure_dir.clone(),
            },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            druid_file: None,
            dsa_url: DEFAULT_DSA_URL.to_string(),
            db_path: PathBuf::from(DB_PATH),
            max_unseen_druids: DEFAULT_MAX_UNSEEN_DRUIDS,
            success_dir: PathBuf::from(SUCCESS_OUTPUT_DIR),
            skip_success_output: false,
            failure_dir: PathBuf::from(FAILURE_OUTPUT_DIR),
            skip_failure_output: false,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}
