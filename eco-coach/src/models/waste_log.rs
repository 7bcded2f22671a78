//! Persisted waste log records and dashboard view models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One logged item as stored in `waste_logs`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WasteLog {
    pub id: i64,
    pub user_id: i64,
    pub item_name: String,
    pub category: String,
    pub quantity: f64,
    pub disposal_instruction: String,
    pub tip: String,
    pub co2_saved: f64,
    pub timestamp: DateTime<Utc>,
}

/// Insert payload (id assigned by the database)
#[derive(Debug, Clone)]
pub struct NewWasteLog {
    pub user_id: i64,
    pub item_name: String,
    pub category: String,
    pub quantity: f64,
    pub disposal_instruction: String,
    pub tip: String,
    pub co2_saved: f64,
    pub timestamp: DateTime<Utc>,
}

/// Items and CO2 for one seven-day window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyStat {
    /// "Week 1" is the oldest window
    pub week: String,
    pub items: usize,
    pub co2_saved: f64,
}

/// Dashboard payload
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub total_items: usize,
    pub total_co2_saved: f64,
    pub category_counts: BTreeMap<String, usize>,
    /// Newest first
    pub recent_logs: Vec<WasteLog>,
    /// Oldest first
    pub weekly_trend: Vec<WeeklyStat>,
}
