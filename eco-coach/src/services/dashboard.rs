//! Dashboard aggregation over a user's waste logs
//!
//! Pure functions; callers fetch the logs and supply `now`.

use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeMap;

use crate::impact::round2;
use crate::models::{DashboardSummary, WasteLog, WeeklyStat};

/// Recent entries shown on the dashboard
pub const DASHBOARD_RECENT_LIMIT: usize = 10;
/// Weeks in the dashboard trend
pub const DASHBOARD_WEEKS: usize = 4;

pub fn total_co2_saved(logs: &[WasteLog]) -> f64 {
    round2(logs.iter().map(|log| log.co2_saved).sum())
}

/// Log count per category. Blank categories count as "other".
pub fn category_counts(logs: &[WasteLog]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for log in logs {
        let category = if log.category.trim().is_empty() {
            "other"
        } else {
            log.category.as_str()
        };
        *counts.entry(category.to_string()).or_insert(0) += 1;
    }
    counts
}

/// Items and CO2 per seven-day window ending at `now`, oldest first
///
/// Window `i` covers `[now - 7(i+1) days, now - 7i days)` and is labelled
/// `Week {weeks - i}`.
pub fn weekly_trend(logs: &[WasteLog], now: DateTime<Utc>, weeks: usize) -> Vec<WeeklyStat> {
    let mut stats: Vec<WeeklyStat> = (0..weeks)
        .map(|i| {
            let week_start = now - Duration::days(7 * (i as i64 + 1));
            let week_end = now - Duration::days(7 * i as i64);

            let in_week: Vec<&WasteLog> = logs
                .iter()
                .filter(|log| log.timestamp >= week_start && log.timestamp < week_end)
                .collect();

            WeeklyStat {
                week: format!("Week {}", weeks - i),
                items: in_week.len(),
                co2_saved: round2(in_week.iter().map(|log| log.co2_saved).sum()),
            }
        })
        .collect();

    stats.reverse();
    stats
}

/// Logs strictly newer than `now - days`
pub fn recent_count(logs: &[WasteLog], now: DateTime<Utc>, days: i64) -> usize {
    let cutoff = now - Duration::days(days);
    logs.iter().filter(|log| log.timestamp > cutoff).count()
}

/// Build the dashboard view. `logs` must be ordered newest first.
pub fn summarize(logs: &[WasteLog], now: DateTime<Utc>) -> DashboardSummary {
    DashboardSummary {
        total_items: logs.len(),
        total_co2_saved: total_co2_saved(logs),
        category_counts: category_counts(logs),
        recent_logs: logs.iter().take(DASHBOARD_RECENT_LIMIT).cloned().collect(),
        weekly_trend: weekly_trend(logs, now, DASHBOARD_WEEKS),
    }
}
