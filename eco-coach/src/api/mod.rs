//! HTTP API handlers for eco-coach

pub mod analyze;
pub mod health;
pub mod logs;
pub mod stats;

pub use analyze::analyze_routes;
pub use health::health_routes;
pub use logs::log_routes;
pub use stats::stats_routes;
