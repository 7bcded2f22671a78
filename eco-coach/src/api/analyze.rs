//! Stateless analysis endpoint
//!
//! POST /api/analyze classifies an item without recording it.

use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;

use crate::error::ApiResult;
use crate::models::{AnalysisRequest, AnalysisResult};
use crate::AppState;

pub(crate) fn default_quantity() -> f64 {
    1.0
}

/// POST /api/analyze request
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub item_name: String,
    #[serde(default = "default_quantity")]
    pub quantity: f64,
    #[serde(default)]
    pub location: Option<String>,
}

/// POST /api/analyze
///
/// 400 if the item name is blank or quantity is not positive. Advisor
/// failures never surface here; they produce a heuristic result.
pub async fn analyze_item(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> ApiResult<Json<AnalysisResult>> {
    let request = AnalysisRequest::new(
        &request.item_name,
        request.quantity,
        request.location.as_deref(),
    )?;

    let result = state.analysis.analyze(&request).await;
    Ok(Json(result))
}

pub fn analyze_routes() -> Router<AppState> {
    Router::new().route("/api/analyze", post(analyze_item))
}
