/// LLM Client: the single point of entry for every model call in the service.
///
/// ARCHITECTURAL RULE: no other module talks to a provider API directly.
/// Providers are adapters behind `LlmProvider`; the `ProviderGateway` walks
/// them in order (primary first), one attempt each, and returns the first
/// response that parses into the requested analysis type.
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::analysis::models::AnalysisOutput;
use crate::analysis::prompts::PromptPair;

pub mod gemini;
pub mod openai;
pub mod prompts;

pub use gemini::GeminiProvider;
pub use openai::OpenAiProvider;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("response does not match the expected schema: {0}")]
    Schema(String),

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("no response within {0:?}")]
    Timeout(Duration),
}

/// One failed provider attempt, kept for server-side diagnostics.
#[derive(Debug, Clone)]
pub struct ProviderFailure {
    pub provider: &'static str,
    pub message: String,
}

impl fmt::Display for ProviderFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.provider, self.message)
    }
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("all providers exhausted: {}", join_failures(.failures))]
    AllProvidersExhausted { failures: Vec<ProviderFailure> },
}

fn join_failures(failures: &[ProviderFailure]) -> String {
    if failures.is_empty() {
        return "no providers configured".to_string();
    }
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A provider adapter. Implementations issue exactly one request and return
/// the model's raw text; parsing and validation happen in the gateway.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn complete(&self, prompt: &PromptPair) -> Result<String, LlmError>;
}

/// Ordered fallback chain over provider adapters.
#[derive(Clone)]
pub struct ProviderGateway {
    providers: Vec<Arc<dyn LlmProvider>>,
    timeout: Duration,
}

impl ProviderGateway {
    pub fn new(providers: Vec<Arc<dyn LlmProvider>>, timeout: Duration) -> Self {
        Self { providers, timeout }
    }

    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Sends `prompt` to each provider in turn until one returns output that
    /// parses as `T`. Every provider gets a single attempt bounded by the
    /// gateway timeout; a timeout, transport error, API error or malformed
    /// body all count as that provider's failure.
    pub async fn invoke<T: AnalysisOutput>(&self, prompt: &PromptPair) -> Result<T, GatewayError> {
        let mut failures = Vec::with_capacity(self.providers.len());

        for provider in &self.providers {
            debug!(provider = provider.name(), "invoking provider");
            match self.invoke_one::<T>(provider.as_ref(), prompt).await {
                Ok(output) => {
                    info!(provider = provider.name(), "provider returned a valid analysis");
                    return Ok(output);
                }
                Err(e) => {
                    warn!(provider = provider.name(), error = %e, "provider failed");
                    failures.push(ProviderFailure {
                        provider: provider.name(),
                        message: e.to_string(),
                    });
                }
            }
        }

        Err(GatewayError::AllProvidersExhausted { failures })
    }

    async fn invoke_one<T: AnalysisOutput>(
        &self,
        provider: &dyn LlmProvider,
        prompt: &PromptPair,
    ) -> Result<T, LlmError> {
        let text = tokio::time::timeout(self.timeout, provider.complete(prompt))
            .await
            .map_err(|_| LlmError::Timeout(self.timeout))??;
        parse_output(&text)
    }
}

/// Parses raw model text into `T`: strips code fences, requires valid JSON,
/// then checks the JSON against the result shape.
pub fn parse_output<T: AnalysisOutput>(text: &str) -> Result<T, LlmError> {
    let body = strip_json_fences(text);
    if body.is_empty() {
        return Err(LlmError::EmptyContent);
    }
    let value: serde_json::Value = serde_json::from_str(body)?;
    let parsed: T = serde_json::from_value(value).map_err(|e| LlmError::Schema(e.to_string()))?;
    Ok(parsed.normalize())
}

/// Strips a leading ```` ``` ```` or ```` ```json ```` fence and its closing
/// fence from model output. Text without a fence is returned trimmed.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };

    let rest = match rest.find('\n') {
        Some(i) if rest[..i].trim().is_empty() || rest[..i].trim().eq_ignore_ascii_case("json") => {
            &rest[i + 1..]
        }
        _ => rest.strip_prefix("json").unwrap_or(rest),
    };

    let rest = rest.trim();
    rest.strip_suffix("```").map(str::trim).unwrap_or(rest)
}

/// Shared HTTP client for every provider adapter.
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    Client::builder().connect_timeout(CONNECT_TIMEOUT).build()
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Maps a non-2xx response to `LlmError::Api`, preferring the provider's
/// `{"error": {"message": ...}}` text over the raw body.
pub(crate) fn api_error(status: u16, body: String) -> LlmError {
    let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body);
    LlmError::Api { status, message }
}
