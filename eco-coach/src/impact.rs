//! CO2 impact coefficients
//!
//! Static mapping from material/category keyword to kg CO2e per kg of
//! material, plus a default used when nothing matches.
//!
//! Lookup is plain substring containment over a small fixed vocabulary. It is
//! a rough estimate, not a precision instrument. The first keyword in
//! declaration order wins, with no specificity ranking, so an earlier keyword
//! can shadow a later, more specific one ("fruit" is checked before
//! "cardboard", "food" before everything else).

/// Coefficient used when no keyword matches
pub const DEFAULT_COEFFICIENT: f64 = 0.5;

/// Keyword → coefficient pairs in precedence order
const COEFFICIENTS: &[(&str, f64)] = &[
    ("food", 0.5),
    ("vegetables", 0.3),
    ("fruit", 0.3),
    ("meat", 1.5),
    ("dairy", 0.8),
    ("bread", 0.4),
    ("plastic", 2.0),
    ("paper", 0.9),
    ("cardboard", 0.7),
    ("glass", 0.3),
    ("aluminum", 9.0),
    ("steel", 1.7),
    ("electronics", 5.0),
    ("batteries", 3.0),
];

/// Immutable impact table. Shared freely across threads without locking.
#[derive(Debug, Clone, Copy)]
pub struct ImpactTable {
    entries: &'static [(&'static str, f64)],
    default: f64,
}

/// The table every analysis path reads
pub static IMPACT_TABLE: ImpactTable = ImpactTable {
    entries: COEFFICIENTS,
    default: DEFAULT_COEFFICIENT,
};

impl ImpactTable {
    /// Coefficient for free text (a category or an item description)
    ///
    /// First keyword contained in the lowercased text wins, else the default.
    pub fn coefficient_for(&self, text: &str) -> f64 {
        let text = text.to_lowercase();
        self.entries
            .iter()
            .find(|(keyword, _)| text.contains(keyword))
            .map(|(_, ratio)| *ratio)
            .unwrap_or(self.default)
    }

    /// First keyword (in declaration order) contained in either the item name
    /// or the category, case-insensitive
    pub fn keyword_match(&self, item_name: &str, category: &str) -> Option<(&'static str, f64)> {
        let item = item_name.to_lowercase();
        let category = category.to_lowercase();
        self.entries
            .iter()
            .find(|(keyword, _)| item.contains(keyword) || category.contains(keyword))
            .copied()
    }

    /// Exact keyword lookup, else the default
    pub fn direct(&self, category: &str) -> f64 {
        let category = category.to_lowercase();
        self.entries
            .iter()
            .find(|(keyword, _)| *keyword == category)
            .map(|(_, ratio)| *ratio)
            .unwrap_or(self.default)
    }
}

/// Round to two decimal places
///
/// Values too large to scale are returned as-is; they carry no fractional
/// digits at that magnitude anyway.
pub fn round2(value: f64) -> f64 {
    let scaled = value * 100.0;
    if scaled.is_finite() {
        scaled.round() / 100.0
    } else {
        value
    }
}

/// Clamp a raw CO2 figure to a finite, non-negative, two-decimal value
pub fn finite_co2(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        round2(value)
    } else {
        0.0
    }
}
