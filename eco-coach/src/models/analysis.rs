//! Analysis request and result records

use eco_common::{Error, Result};
use serde::{Deserialize, Serialize};

/// Location used when the caller does not supply one
pub const DEFAULT_LOCATION: &str = "general";

/// One item to analyze
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    item_name: String,
    quantity: f64,
    location: String,
}

impl AnalysisRequest {
    /// Build a validated request
    ///
    /// Item name must be non-blank (surrounding whitespace is dropped) and
    /// quantity must be a positive finite number. A blank or missing
    /// location becomes `"general"`.
    pub fn new(item_name: &str, quantity: f64, location: Option<&str>) -> Result<Self> {
        let item_name = item_name.trim();
        if item_name.is_empty() {
            return Err(Error::InvalidInput("item name is required".to_string()));
        }
        if !quantity.is_finite() || quantity <= 0.0 {
            return Err(Error::InvalidInput(format!(
                "quantity must be a positive number, got {}",
                quantity
            )));
        }

        let location = location
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(DEFAULT_LOCATION);

        Ok(Self {
            item_name: item_name.to_string(),
            quantity,
            location: location.to_string(),
        })
    }

    pub fn item_name(&self) -> &str {
        &self.item_name
    }

    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    pub fn location(&self) -> &str {
        &self.location
    }
}

/// Which path produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultSource {
    /// Remote advisor reply, estimated by the CO2 estimator
    Remote,
    /// Local keyword heuristic
    Heuristic,
}

/// Complete output of the analysis pipeline
///
/// Always fully populated: `category` is non-empty and `co2_saved` is finite,
/// non-negative and rounded to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub category: String,
    pub disposal_instruction: String,
    pub tip: String,
    /// kg CO2e
    pub co2_saved: f64,
    pub source: ResultSource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_request_defaults_location() {
        let request = AnalysisRequest::new("  glass jar ", 2.0, None).unwrap();
        assert_eq!(request.item_name(), "glass jar");
        assert_eq!(request.quantity(), 2.0);
        assert_eq!(request.location(), DEFAULT_LOCATION);

        let request = AnalysisRequest::new("glass jar", 1.0, Some("  ")).unwrap();
        assert_eq!(request.location(), DEFAULT_LOCATION);
    }

    #[test]
    fn test_blank_item_name_rejected() {
        assert!(matches!(
            AnalysisRequest::new("   ", 1.0, None),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_non_positive_quantity_rejected() {
        for quantity in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(
                AnalysisRequest::new("can", quantity, None).is_err(),
                "quantity {} should be rejected",
                quantity
            );
        }
    }

    #[test]
    fn test_source_serializes_lowercase() {
        let json = serde_json::to_string(&ResultSource::Heuristic).unwrap();
        assert_eq!(json, "\"heuristic\"");
    }
}
