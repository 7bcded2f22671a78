//! Keyword heuristic classifier
//!
//! Offline fallback used whenever the remote advisor is unavailable or its
//! reply is unusable. Pure and total: the same input always yields the same
//! result.

use crate::impact::{finite_co2, IMPACT_TABLE};
use crate::models::{AnalysisResult, ResultSource};

/// Assumed weight per unit on this path (kg)
pub const HEURISTIC_UNIT_WEIGHT_KG: f64 = 0.5;

/// Keyword groups, tested in order against the lowercased item name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WasteGroup {
    Food,
    Plastic,
    Paper,
    Hazardous,
    Other,
}

const GROUP_KEYWORDS: &[(WasteGroup, &[&str])] = &[
    (
        WasteGroup::Food,
        &[
            "food", "meat", "vegetable", "fruit", "bread", "dairy", "banana", "apple", "peel",
            "leftover", "scraps", "coffee grounds",
        ],
    ),
    (WasteGroup::Plastic, &["plastic", "bottle", "container"]),
    (WasteGroup::Paper, &["paper", "cardboard", "box"]),
    (WasteGroup::Hazardous, &["battery", "electronic"]),
];

fn group_for(item_lower: &str) -> WasteGroup {
    GROUP_KEYWORDS
        .iter()
        .find(|(_, words)| words.iter().any(|word| item_lower.contains(word)))
        .map(|(group, _)| *group)
        .unwrap_or(WasteGroup::Other)
}

/// Classify an item without any network access
pub fn classify(item_name: &str, quantity: f64) -> AnalysisResult {
    let group = group_for(&item_name.to_lowercase());

    let (category, disposal_instruction, tip) = match group {
        WasteGroup::Food => (
            "food",
            format!("Compost {} if possible. Otherwise, dispose in food waste bin.", item_name),
            format!("Plan meals to reduce {} waste.", item_name),
        ),
        WasteGroup::Plastic => (
            "recyclable",
            format!("Rinse {}, remove labels, place in recycling bin.", item_name),
            format!("Use reusable alternatives instead of {}.", item_name),
        ),
        WasteGroup::Paper => (
            "recyclable",
            format!("Flatten {} and recycle paper components.", item_name),
            "Go digital to reduce paper waste.".to_string(),
        ),
        WasteGroup::Hazardous => (
            "hazardous",
            format!("Take {} to hazardous waste collection center.", item_name),
            "Use rechargeable alternatives.".to_string(),
        ),
        WasteGroup::Other => (
            "other",
            format!("Dispose of {} in regular waste.", item_name),
            "Check if it can be reused, donated, or repaired.".to_string(),
        ),
    };

    let co2 = quantity * HEURISTIC_UNIT_WEIGHT_KG * IMPACT_TABLE.coefficient_for(category);
    let co2_saved = finite_co2(co2);

    tracing::debug!(item = item_name, category, co2_saved, "Heuristic classification");

    AnalysisResult {
        category: category.to_string(),
        disposal_instruction,
        tip,
        co2_saved,
        source: ResultSource::Heuristic,
    }
}
