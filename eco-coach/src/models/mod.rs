//! Data models for eco-coach

pub mod analysis;
pub mod waste_log;

pub use analysis::{AnalysisRequest, AnalysisResult, ResultSource, DEFAULT_LOCATION};
pub use waste_log::{DashboardSummary, NewWasteLog, WasteLog, WeeklyStat};
