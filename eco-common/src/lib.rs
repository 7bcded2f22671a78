//! # Eco Coach Common Library
//!
//! Shared code for the Eco Coach service crates:
//! - Error types
//! - TOML bootstrap configuration and data folder resolution

pub mod config;
pub mod error;

pub use error::{Error, Result};
