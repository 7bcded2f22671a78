//! Analysis facade
//!
//! Sole entry point of the classification pipeline. Tries the remote advisor
//! once; on any advisor failure it falls back to the heuristic classifier.
//! Callers always receive one complete [`AnalysisResult`].

use std::sync::Arc;

use crate::models::{AnalysisRequest, AnalysisResult};
use crate::services::advisor_client::WasteAdvisor;
use crate::services::{co2_estimator, heuristic_classifier};

/// Waste analysis service
#[derive(Clone)]
pub struct AnalysisService {
    advisor: Arc<dyn WasteAdvisor>,
}

impl AnalysisService {
    pub fn new(advisor: Arc<dyn WasteAdvisor>) -> Self {
        Self { advisor }
    }

    /// Whether the remote path will be attempted
    pub fn advisor_configured(&self) -> bool {
        self.advisor.is_configured()
    }

    /// Analyze one item. Never fails.
    pub async fn analyze(&self, request: &AnalysisRequest) -> AnalysisResult {
        match self.advisor.fetch_advice(request).await {
            Ok(reply) => co2_estimator::estimate(Some(&reply), request.item_name(), request.quantity()),
            Err(e) => {
                if e.is_expected() {
                    tracing::debug!(
                        advisor = self.advisor.name(),
                        item = request.item_name(),
                        "Advisor not configured, using heuristic classifier"
                    );
                } else {
                    tracing::warn!(
                        advisor = self.advisor.name(),
                        item = request.item_name(),
                        error = %e,
                        "Advisor failed, falling back to heuristic classifier"
                    );
                }
                heuristic_classifier::classify(request.item_name(), request.quantity())
            }
        }
    }
}
