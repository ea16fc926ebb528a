//! Database operations: pool setup, migrations, the druid registry, and
//! the append-only retrieval attempt log.

pub mod attempts;
pub mod migrations;
pub mod models;
pub mod pool;
pub mod registry;

// Re-export commonly used items
pub use attempts::{attempts_for_druid, record_attempt};
pub use migrations::run_migrations;
pub use models::{DruidRecord, RetrievalAttempt};
pub use pool::init_db_pool_with_path;
