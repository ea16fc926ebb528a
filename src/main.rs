//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `cocina_retriever` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use cocina_retriever::initialization::init_logger_with;
use cocina_retriever::{run_retrieval, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file (if it exists)
    // Try loading from current directory first, then from the executable's directory
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    // Parse command-line arguments into Config
    let config = Config::parse();

    // Initialize logger based on config
    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    // Run the retrieval batch using the library
    match run_retrieval(config).await {
        Ok(report) => {
            println!(
                "✅ Attempted {} druid{} ({} registered from file) in {:.1}s - see database for details",
                report.attempted_druids,
                if report.attempted_druids == 1 { "" } else { "s" },
                report.registered_druids,
                report.elapsed_seconds
            );
            println!("Attempt log saved in {}", report.db_path.display());
            Ok(())
        }
        Err(e) => {
            eprintln!("cocina_retriever error: {:#}", e);
            process::exit(1);
        }
    }
}
