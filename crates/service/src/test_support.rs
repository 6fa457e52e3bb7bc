#![cfg(test)]
use configs::DatabaseConfig;
use sea_orm::DatabaseConnection;

/// Fresh migrated in-memory SQLite database for one test.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    // one connection, otherwise each pooled connection sees its own empty memory db
    let cfg = DatabaseConfig {
        url: "sqlite::memory:".into(),
        max_connections: 1,
        min_connections: 1,
        ..DatabaseConfig::default()
    };
    models::db::connect_and_migrate(&cfg).await
}
