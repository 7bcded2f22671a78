//! Database access for eco-coach
//!
//! SQLite storage for waste logs

pub mod waste_logs;

use anyhow::Result;
use sqlx::SqlitePool;
use std::path::Path;

/// Initialize database connection pool
pub async fn init_database_pool(db_path: &Path) -> Result<SqlitePool> {
    // Ensure parent directory exists
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Use proper SQLite URI with mode=rwc (read, write, create)
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    tracing::debug!("Connecting to database: {}", db_url);

    let pool = SqlitePool::connect(&db_url).await?;

    init_tables(&pool).await?;

    Ok(pool)
}

/// Create eco-coach tables if they don't exist
pub async fn init_tables(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS waste_logs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL,
            item_name TEXT NOT NULL,
            category TEXT NOT NULL DEFAULT 'other',
            quantity REAL NOT NULL DEFAULT 1.0,
            disposal_instruction TEXT NOT NULL DEFAULT '',
            tip TEXT NOT NULL DEFAULT '',
            co2_saved REAL NOT NULL DEFAULT 0.0,
            timestamp TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_waste_logs_user ON waste_logs(user_id)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_waste_logs_timestamp ON waste_logs(timestamp)")
        .execute(pool)
        .await?;

    tracing::info!("Database tables initialized (waste_logs)");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewWasteLog;
    use chrono::Utc;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_pool_creates_nested_file_and_persists() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("nested").join("eco.db");

        let pool = init_database_pool(&db_path).await.unwrap();
        assert!(db_path.exists());

        let inserted = waste_logs::insert_log(
            &pool,
            NewWasteLog {
                user_id: 3,
                item_name: "glass jar".to_string(),
                category: "glass".to_string(),
                quantity: 2.0,
                disposal_instruction: "Rinse and recycle.".to_string(),
                tip: "Reuse jars for storage.".to_string(),
                co2_saved: 0.3,
                timestamp: Utc::now(),
            },
        )
        .await
        .unwrap();
        pool.close().await;

        // Reopening must find the existing table and row
        let pool = init_database_pool(&db_path).await.unwrap();
        let loaded = waste_logs::get_log(&pool, inserted.id).await.unwrap().unwrap();
        assert_eq!(loaded.item_name, "glass jar");
        assert_eq!(loaded.user_id, 3);
    }
}
