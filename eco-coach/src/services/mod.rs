//! Service modules for waste analysis
//!
//! Classification pipeline (leaf first): heuristic classifier, advisor
//! client, CO2 estimator, analysis facade. Dashboard aggregation sits on top
//! of persisted logs.

pub mod advisor_client;
pub mod analysis;
pub mod co2_estimator;
pub mod dashboard;
pub mod heuristic_classifier;

pub use advisor_client::{AdvisorError, RawAdvisorReply, RemoteAdvisorClient, WasteAdvisor};
pub use analysis::AnalysisService;
