//! CO2 estimate for advisor replies
//!
//! Turns a (possibly sparse) advisor reply into a complete result. Every
//! missing field has a default, so estimation cannot fail.

use crate::impact::{finite_co2, IMPACT_TABLE};
use crate::models::{AnalysisResult, ResultSource};
use crate::services::advisor_client::RawAdvisorReply;

/// Category when the reply names none
pub const DEFAULT_CATEGORY: &str = "other";
/// Assumed weight per unit when the reply gives none (kg)
pub const DEFAULT_WEIGHT_KG: f64 = 0.5;
/// Disposal instruction when the reply gives none
pub const DEFAULT_INSTRUCTION: &str = "Please recycle responsibly.";
/// Tip when the reply gives none
pub const DEFAULT_TIP: &str = "Reduce, reuse, recycle.";

/// Estimate CO2 saved for an item
///
/// - weight = (reply weight or 0.5 kg) × quantity
/// - coefficient = first table keyword found in the item name or category,
///   else a direct category lookup (default coefficient if unknown)
/// - category keeps the advisor's casing; only the lookup is lowercased
pub fn estimate(reply: Option<&RawAdvisorReply>, item_name: &str, quantity: f64) -> AnalysisResult {
    let category = reply
        .and_then(|r| r.category.as_deref())
        .unwrap_or(DEFAULT_CATEGORY);
    let unit_weight = reply
        .and_then(|r| r.estimated_weight_kg)
        .unwrap_or(DEFAULT_WEIGHT_KG);
    let weight_kg = unit_weight * quantity;

    let coefficient = match IMPACT_TABLE.keyword_match(item_name, category) {
        Some((keyword, ratio)) => {
            tracing::debug!(keyword, ratio, "Impact keyword matched");
            ratio
        }
        None => IMPACT_TABLE.direct(category),
    };

    let co2 = weight_kg * coefficient;
    let co2_saved = finite_co2(co2);

    AnalysisResult {
        category: category.to_string(),
        disposal_instruction: reply
            .and_then(|r| r.disposal_instruction.as_deref())
            .unwrap_or(DEFAULT_INSTRUCTION)
            .to_string(),
        tip: reply
            .and_then(|r| r.tip.as_deref())
            .unwrap_or(DEFAULT_TIP)
            .to_string(),
        co2_saved,
        source: ResultSource::Remote,
    }
}
