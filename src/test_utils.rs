use std::sync::Arc;

use crate::config::DatabaseConfig;
use crate::database::Database;

/// Fresh in-memory SQLite database with every migration applied.
pub async fn test_db() -> Arc<Database> {
    // every pooled connection to `:memory:` is its own database, so keep one
    let config = DatabaseConfig {
        url: Some("sqlite::memory:".to_string()),
        max_connections: 1,
        min_connections: 1,
        ..Default::default()
    };

    let database = Database::open(&config).await.unwrap();
    Arc::new(database)
}
