//! Remote waste advisor client
//!
//! Asks a chat-completion endpoint for a disposal recommendation and parses
//! the model's JSON reply defensively. Single attempt, no retries: the caller
//! always has the heuristic classifier to fall back on.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::config::AdvisorConfig;
use crate::models::AnalysisRequest;

const USER_AGENT: &str = concat!("eco-coach/", env!("CARGO_PKG_VERSION"));

/// Advisor failures. Every variant routes the facade to the fallback path.
#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("No advisor API key configured")]
    MissingCredential,

    #[error("Advisor rejected API key")]
    InvalidCredential,

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl AdvisorError {
    /// Missing credential is a normal offline condition, not a fault
    pub fn is_expected(&self) -> bool {
        matches!(self, AdvisorError::MissingCredential)
    }
}

/// Untrusted advisor reply after normalization
///
/// Absent, blank, wrong-typed, negative or non-finite fields are `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawAdvisorReply {
    pub category: Option<String>,
    pub disposal_instruction: Option<String>,
    pub tip: Option<String>,
    pub estimated_weight_kg: Option<f64>,
}

impl RawAdvisorReply {
    /// Normalize a parsed JSON value. Anything but an object is rejected.
    pub fn from_value(value: &Value) -> Result<Self, AdvisorError> {
        let object = value.as_object().ok_or_else(|| {
            AdvisorError::MalformedResponse("reply is not a JSON object".to_string())
        })?;

        let text_field = |key: &str| {
            object
                .get(key)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        let estimated_weight_kg = object
            .get("estimated_weight_kg")
            .and_then(|v| match v {
                Value::Number(n) => n.as_f64(),
                Value::String(s) => s.trim().parse::<f64>().ok(),
                _ => None,
            })
            .filter(|w| w.is_finite() && *w >= 0.0);

        Ok(Self {
            category: text_field("category"),
            disposal_instruction: text_field("disposal_instruction"),
            tip: text_field("tip"),
            estimated_weight_kg,
        })
    }
}

/// Source of disposal advice
///
/// The facade depends only on this trait so it can be exercised offline.
#[async_trait]
pub trait WasteAdvisor: Send + Sync {
    /// Advisor name for logging
    fn name(&self) -> &'static str;

    /// Whether a credential is configured (remote path can be attempted)
    fn is_configured(&self) -> bool;

    async fn fetch_advice(&self, request: &AnalysisRequest) -> Result<RawAdvisorReply, AdvisorError>;
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ChatReplyMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Build the instruction prompt for one item
pub fn build_prompt(item_name: &str, quantity: f64, location: &str) -> String {
    format!(
        "You are an expert environmental coach specializing in waste reduction and recycling.\n\
         \n\
         A user has thrown away: {item_name} (quantity: {quantity})\n\
         Location: {location}\n\
         \n\
         Please respond in JSON only with fields:\n\
         category, disposal_instruction, tip, estimated_weight_kg\n"
    )
}

/// Drop a surrounding code fence
///
/// If the trimmed text starts with a triple backtick, the first and last
/// lines are removed. A single fenced line leaves nothing behind.
pub fn strip_code_fence(text: &str) -> String {
    let trimmed = text.trim();
    if !trimmed.starts_with("```") {
        return trimmed.to_string();
    }

    let lines: Vec<&str> = trimmed.lines().collect();
    if lines.len() < 2 {
        return String::new();
    }
    lines[1..lines.len() - 1].join("\n")
}

/// Parse model message text into a normalized reply
pub fn parse_reply_text(content: &str) -> Result<RawAdvisorReply, AdvisorError> {
    let json_text = strip_code_fence(content);
    let value: Value =
        serde_json::from_str(&json_text).map_err(|e| AdvisorError::Parse(e.to_string()))?;
    RawAdvisorReply::from_value(&value)
}

/// Chat-completion advisor client
pub struct RemoteAdvisorClient {
    http_client: reqwest::Client,
    config: AdvisorConfig,
}

impl RemoteAdvisorClient {
    pub fn new(config: AdvisorConfig) -> Result<Self, AdvisorError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()
            .map_err(|e| AdvisorError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            config,
        })
    }
}

#[async_trait]
impl WasteAdvisor for RemoteAdvisorClient {
    fn name(&self) -> &'static str {
        "remote"
    }

    fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    async fn fetch_advice(&self, request: &AnalysisRequest) -> Result<RawAdvisorReply, AdvisorError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(AdvisorError::MissingCredential)?;

        let prompt = build_prompt(request.item_name(), request.quantity(), request.location());
        let body = ChatCompletionRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &prompt,
            }],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        tracing::debug!(
            endpoint = %self.config.endpoint,
            model = %self.config.model,
            item = request.item_name(),
            "Querying waste advisor"
        );

        let response = self
            .http_client
            .post(&self.config.endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AdvisorError::Network(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AdvisorError::InvalidCredential);
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AdvisorError::Api(status.as_u16(), error_text));
        }

        let text = response
            .text()
            .await
            .map_err(|e| AdvisorError::Network(e.to_string()))?;

        let completion: ChatCompletionResponse = serde_json::from_str(&text)
            .map_err(|e| AdvisorError::MalformedResponse(e.to_string()))?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| AdvisorError::MalformedResponse("no message content".to_string()))?;

        let reply = parse_reply_text(&content)?;

        tracing::info!(
            item = request.item_name(),
            category = reply.category.as_deref().unwrap_or("-"),
            estimated_weight_kg = reply.estimated_weight_kg,
            "Advisor reply parsed"
        );

        Ok(reply)
    }
}
