//! Waste logging and history endpoints
//!
//! POST /api/logs, GET /api/logs, GET /api/logs/:id
//!
//! Users are identified by the caller-supplied `user_id`; authentication is
//! handled upstream.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::api::analyze::default_quantity;
use crate::db::waste_logs;
use crate::error::{ApiError, ApiResult};
use crate::models::{AnalysisRequest, NewWasteLog, WasteLog};
use crate::services::dashboard;
use crate::AppState;

/// Window for `recent_logs_count` in the history view
const RECENT_WINDOW_DAYS: i64 = 7;

/// `?user_id=` query
#[derive(Debug, Deserialize)]
pub struct UserQuery {
    pub user_id: i64,
}

/// POST /api/logs request
#[derive(Debug, Deserialize)]
pub struct LogWasteRequest {
    pub user_id: i64,
    #[serde(default)]
    pub item_name: String,
    #[serde(default = "default_quantity")]
    pub quantity: f64,
    #[serde(default)]
    pub location: Option<String>,
}

/// GET /api/logs response
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub logs: Vec<WasteLog>,
    pub recent_logs_count: usize,
}

/// POST /api/logs
///
/// Validates the item, runs the analysis pipeline and stores the result.
/// Returns 201 with the stored log.
pub async fn log_waste(
    State(state): State<AppState>,
    Json(request): Json<LogWasteRequest>,
) -> ApiResult<(StatusCode, Json<WasteLog>)> {
    let analysis_request = AnalysisRequest::new(
        &request.item_name,
        request.quantity,
        request.location.as_deref(),
    )?;

    let result = state.analysis.analyze(&analysis_request).await;

    let log = waste_logs::insert_log(
        &state.db,
        NewWasteLog {
            user_id: request.user_id,
            item_name: analysis_request.item_name().to_string(),
            category: result.category,
            quantity: analysis_request.quantity(),
            disposal_instruction: result.disposal_instruction,
            tip: result.tip,
            co2_saved: result.co2_saved,
            timestamp: Utc::now(),
        },
    )
    .await?;

    tracing::info!(
        log_id = log.id,
        user_id = log.user_id,
        category = %log.category,
        co2_saved = log.co2_saved,
        source = ?result.source,
        "Waste logged"
    );

    Ok((StatusCode::CREATED, Json(log)))
}

/// GET /api/logs?user_id=
///
/// All of a user's logs, newest first, plus the count from the last 7 days.
pub async fn list_history(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> ApiResult<Json<HistoryResponse>> {
    let logs = waste_logs::list_logs_for_user(&state.db, query.user_id, None).await?;
    let recent_logs_count = dashboard::recent_count(&logs, Utc::now(), RECENT_WINDOW_DAYS);

    Ok(Json(HistoryResponse {
        logs,
        recent_logs_count,
    }))
}

/// GET /api/logs/:id?user_id=
///
/// 404 if the log does not exist, 403 if it belongs to another user.
pub async fn view_log(
    State(state): State<AppState>,
    Path(log_id): Path<i64>,
    Query(query): Query<UserQuery>,
) -> ApiResult<Json<WasteLog>> {
    let log = waste_logs::get_log(&state.db, log_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Waste log {}", log_id)))?;

    if log.user_id != query.user_id {
        tracing::warn!(log_id, user_id = query.user_id, "Denied access to another user's log");
        return Err(ApiError::Forbidden(format!("Waste log {}", log_id)));
    }

    Ok(Json(log))
}

pub fn log_routes() -> Router<AppState> {
    Router::new()
        .route("/api/logs", get(list_history).post(log_waste))
        .route("/api/logs/:id", get(view_log))
}
