//! Dashboard and statistics endpoints

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use std::collections::BTreeMap;

use crate::api::logs::UserQuery;
use crate::db::waste_logs;
use crate::error::ApiResult;
use crate::models::{DashboardSummary, WeeklyStat};
use crate::services::dashboard;
use crate::AppState;

const DEFAULT_STATS_WEEKS: usize = 8;
const MAX_STATS_WEEKS: usize = 52;

/// GET /api/weekly-stats query
#[derive(Debug, Deserialize)]
pub struct WeeklyStatsQuery {
    pub user_id: i64,
    #[serde(default)]
    pub weeks: Option<usize>,
}

/// GET /api/dashboard?user_id=
pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> ApiResult<Json<DashboardSummary>> {
    let logs = waste_logs::list_logs_for_user(&state.db, query.user_id, None).await?;
    Ok(Json(dashboard::summarize(&logs, Utc::now())))
}

/// GET /api/weekly-stats?user_id=&weeks=
///
/// `weeks` defaults to 8 and is clamped to 1..=52.
pub async fn get_weekly_stats(
    State(state): State<AppState>,
    Query(query): Query<WeeklyStatsQuery>,
) -> ApiResult<Json<Vec<WeeklyStat>>> {
    let weeks = query
        .weeks
        .unwrap_or(DEFAULT_STATS_WEEKS)
        .clamp(1, MAX_STATS_WEEKS);

    let now = Utc::now();
    let start = now - chrono::Duration::days(7 * weeks as i64);
    let logs = waste_logs::list_logs_in_range(&state.db, query.user_id, start, now).await?;

    Ok(Json(dashboard::weekly_trend(&logs, now, weeks)))
}

/// GET /api/category-breakdown?user_id=
pub async fn get_category_breakdown(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> ApiResult<Json<BTreeMap<String, usize>>> {
    let logs = waste_logs::list_logs_for_user(&state.db, query.user_id, None).await?;
    Ok(Json(dashboard::category_counts(&logs)))
}

pub fn stats_routes() -> Router<AppState> {
    Router::new()
        .route("/api/dashboard", get(get_dashboard))
        .route("/api/weekly-stats", get(get_weekly_stats))
        .route("/api/category-breakdown", get(get_category_breakdown))
}
