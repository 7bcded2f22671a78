//! Configuration resolution for eco-coach
//!
//! Advisor settings come from the TOML `[advisor]` table with built-in
//! defaults. The credential is resolved with ENV → TOML priority and handed to
//! the advisor client at construction; nothing reads the environment later.

use eco_common::config::AdvisorToml;
use std::time::Duration;
use tracing::{info, warn};

/// Environment variable holding the advisor bearer credential
pub const API_KEY_ENV: &str = "BYTEZ_API_KEY";

/// Environment variable overriding the advisor endpoint
pub const ENDPOINT_ENV: &str = "ECO_COACH_ADVISOR_URL";

pub const DEFAULT_ENDPOINT: &str = "https://api.bytez.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "qwen3-4b-instruct-2507";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 500;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Remote advisor settings
#[derive(Debug, Clone)]
pub struct AdvisorConfig {
    pub endpoint: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Duration,
    /// `None` routes every analysis to the heuristic path
    pub api_key: Option<String>,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            api_key: None,
        }
    }
}

impl AdvisorConfig {
    /// Build from the TOML table, the process environment and defaults
    pub fn resolve(toml: &AdvisorToml) -> Self {
        let env_key = std::env::var(API_KEY_ENV).ok();
        let env_endpoint = std::env::var(ENDPOINT_ENV).ok();
        Self::resolve_with(toml, env_key, env_endpoint)
    }

    /// Same as [`AdvisorConfig::resolve`] with the environment passed in
    pub fn resolve_with(
        toml: &AdvisorToml,
        env_key: Option<String>,
        env_endpoint: Option<String>,
    ) -> Self {
        let endpoint = env_endpoint
            .filter(|e| !e.trim().is_empty())
            .or_else(|| toml.endpoint.clone())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        Self {
            endpoint,
            model: toml.model.clone().unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature: toml.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            max_tokens: toml.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            timeout: Duration::from_secs(toml.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
            api_key: resolve_api_key(env_key, toml.api_key.clone()),
        }
    }
}

/// Resolve advisor credential
///
/// **Priority:** ENV → TOML. Blank values are ignored. Absence is a normal
/// condition (offline/demo operation) and is not an error.
pub fn resolve_api_key(env_key: Option<String>, toml_key: Option<String>) -> Option<String> {
    let env_key = env_key.filter(|k| is_valid_key(k));
    let toml_key = toml_key.filter(|k| is_valid_key(k));

    if env_key.is_some() && toml_key.is_some() {
        warn!(
            "Advisor API key found in environment and TOML. Using environment (highest priority)."
        );
    }

    if let Some(key) = env_key {
        info!("Advisor API key loaded from environment variable");
        return Some(key.trim().to_string());
    }

    if let Some(key) = toml_key {
        info!("Advisor API key loaded from TOML config");
        return Some(key.trim().to_string());
    }

    info!("No advisor API key configured, using heuristic classification only");
    None
}

/// Validate API key (non-empty, non-whitespace)
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_overrides_toml() {
        let key = resolve_api_key(Some("env-key".into()), Some("toml-key".into()));
        assert_eq!(key.as_deref(), Some("env-key"));
    }

    #[test]
    fn test_toml_fallback_when_env_blank() {
        let key = resolve_api_key(Some("   ".into()), Some("toml-key".into()));
        assert_eq!(key.as_deref(), Some("toml-key"));
    }

    #[test]
    fn test_no_key_is_none() {
        assert_eq!(resolve_api_key(None, None), None);
        assert_eq!(resolve_api_key(None, Some("".into())), None);
    }

    #[test]
    fn test_defaults_applied() {
        let config = AdvisorConfig::resolve_with(&AdvisorToml::default(), None, None);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.max_tokens, 500);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_endpoint_env_override() {
        let toml = AdvisorToml {
            endpoint: Some("http://toml.example/v1".into()),
            timeout_secs: Some(5),
            ..Default::default()
        };
        let config =
            AdvisorConfig::resolve_with(&toml, None, Some("http://localhost:1234/v1".into()));
        assert_eq!(config.endpoint, "http://localhost:1234/v1");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}
