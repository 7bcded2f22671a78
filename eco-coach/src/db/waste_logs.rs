//! Waste log database operations
//!
//! Timestamps are stored as fixed-width UTC RFC 3339 text so lexical order
//! matches chronological order.

use chrono::{DateTime, SecondsFormat, Utc};
use eco_common::{Error, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::models::{NewWasteLog, WasteLog};

fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn row_to_log(row: &SqliteRow) -> Result<WasteLog> {
    let timestamp: String = row.get("timestamp");
    let timestamp = DateTime::parse_from_rfc3339(&timestamp)
        .map_err(|e| Error::Internal(format!("Failed to parse timestamp: {}", e)))?
        .with_timezone(&Utc);

    Ok(WasteLog {
        id: row.get("id"),
        user_id: row.get("user_id"),
        item_name: row.get("item_name"),
        category: row.get("category"),
        quantity: row.get("quantity"),
        disposal_instruction: row.get("disposal_instruction"),
        tip: row.get("tip"),
        co2_saved: row.get("co2_saved"),
        timestamp,
    })
}

/// Insert a log and return it with its assigned id
pub async fn insert_log(pool: &SqlitePool, log: NewWasteLog) -> Result<WasteLog> {
    let result = sqlx::query(
        r#"
        INSERT INTO waste_logs (
            user_id, item_name, category, quantity,
            disposal_instruction, tip, co2_saved, timestamp
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(log.user_id)
    .bind(&log.item_name)
    .bind(&log.category)
    .bind(log.quantity)
    .bind(&log.disposal_instruction)
    .bind(&log.tip)
    .bind(log.co2_saved)
    .bind(format_timestamp(&log.timestamp))
    .execute(pool)
    .await?;

    let id = result.last_insert_rowid();
    tracing::debug!(id, user_id = log.user_id, item = %log.item_name, "Waste log inserted");

    Ok(WasteLog {
        id,
        user_id: log.user_id,
        item_name: log.item_name,
        category: log.category,
        quantity: log.quantity,
        disposal_instruction: log.disposal_instruction,
        tip: log.tip,
        co2_saved: log.co2_saved,
        timestamp: log.timestamp,
    })
}

/// Load a single log by id
pub async fn get_log(pool: &SqlitePool, id: i64) -> Result<Option<WasteLog>> {
    let row = sqlx::query("SELECT * FROM waste_logs WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(row_to_log).transpose()
}

/// A user's logs, newest first
pub async fn list_logs_for_user(
    pool: &SqlitePool,
    user_id: i64,
    limit: Option<i64>,
) -> Result<Vec<WasteLog>> {
    // SQLite treats a negative LIMIT as unlimited
    let rows = sqlx::query(
        "SELECT * FROM waste_logs WHERE user_id = ? ORDER BY timestamp DESC, id DESC LIMIT ?",
    )
    .bind(user_id)
    .bind(limit.unwrap_or(-1))
    .fetch_all(pool)
    .await?;

    rows.iter().map(row_to_log).collect()
}

/// A user's logs with `start <= timestamp < end`, oldest first
pub async fn list_logs_in_range(
    pool: &SqlitePool,
    user_id: i64,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<Vec<WasteLog>> {
    let rows = sqlx::query(
        r#"
        SELECT * FROM waste_logs
        WHERE user_id = ? AND timestamp >= ? AND timestamp < ?
        ORDER BY timestamp ASC, id ASC
        "#,
    )
    .bind(user_id)
    .bind(format_timestamp(&start))
    .bind(format_timestamp(&end))
    .fetch_all(pool)
    .await?;

    rows.iter().map(row_to_log).collect()
}
