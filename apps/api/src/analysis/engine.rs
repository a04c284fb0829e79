//! Analysis engines: the live provider-backed engine and the mock engine,
//! behind one trait. Which one runs is decided once at startup.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{error, info};

use crate::analysis::mock::{mock_general, mock_tailored};
use crate::analysis::models::{GeneralAnalysis, TailoredAnalysis};
use crate::analysis::prompts::build_prompt;
use crate::analysis::{AnalysisError, AnalysisMode, JobDescription};
use crate::config::Config;
use crate::llm_client::{
    build_http_client, GeminiProvider, LlmProvider, OpenAiProvider, ProviderGateway,
};

/// Produces an analysis from extracted resume text.
#[async_trait]
pub trait AnalysisEngine: Send + Sync {
    /// "live" or "mock", reported by the health endpoint.
    fn mode(&self) -> &'static str;

    fn providers(&self) -> Vec<&'static str> {
        Vec::new()
    }

    async fn general(&self, resume_text: &str) -> Result<GeneralAnalysis, AnalysisError>;

    async fn tailored(
        &self,
        resume_text: &str,
        job_description: &JobDescription,
    ) -> Result<TailoredAnalysis, AnalysisError>;
}

/// Builds the engine the config calls for: mock when no provider key is
/// usable, otherwise a live engine over the configured providers, OpenAI
/// first.
pub fn engine_from_config(config: &Config) -> anyhow::Result<Arc<dyn AnalysisEngine>> {
    if config.is_mock_mode() {
        info!("No provider API keys configured; running in mock mode");
        return Ok(Arc::new(MockEngine::new(config.mock_delay)));
    }

    let client = build_http_client()?;
    let mut providers: Vec<Arc<dyn LlmProvider>> = Vec::new();
    if let Some(openai) = &config.openai {
        providers.push(Arc::new(OpenAiProvider::new(client.clone(), openai)));
    }
    if let Some(gemini) = &config.gemini {
        providers.push(Arc::new(GeminiProvider::new(client, gemini)));
    }

    let gateway = ProviderGateway::new(providers, config.provider_timeout);
    info!(
        "Live analysis enabled (providers: {})",
        gateway.provider_names().join(" -> ")
    );
    Ok(Arc::new(LiveEngine::new(gateway)))
}

// ────────────────────────────────────────────────────────────────────────────
// LiveEngine
// ────────────────────────────────────────────────────────────────────────────

pub struct LiveEngine {
    gateway: ProviderGateway,
}

impl LiveEngine {
    pub fn new(gateway: ProviderGateway) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl AnalysisEngine for LiveEngine {
    fn mode(&self) -> &'static str {
        "live"
    }

    fn providers(&self) -> Vec<&'static str> {
        self.gateway.provider_names()
    }

    async fn general(&self, resume_text: &str) -> Result<GeneralAnalysis, AnalysisError> {
        let prompt = build_prompt(AnalysisMode::General, resume_text, None)?;
        self.gateway.invoke(&prompt).await.map_err(|e| {
            error!("General analysis failed: {e}");
            AnalysisError::ProvidersExhausted(e)
        })
    }

    async fn tailored(
        &self,
        resume_text: &str,
        job_description: &JobDescription,
    ) -> Result<TailoredAnalysis, AnalysisError> {
        let prompt = build_prompt(
            AnalysisMode::Tailored,
            resume_text,
            Some(job_description.as_str()),
        )?;
        self.gateway.invoke(&prompt).await.map_err(|e| {
            error!("Tailored analysis failed: {e}");
            AnalysisError::ProvidersExhausted(e)
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// MockEngine
// ────────────────────────────────────────────────────────────────────────────

/// Serves the fixed mock payloads after an artificial delay.
pub struct MockEngine {
    delay: Duration,
}

impl MockEngine {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl AnalysisEngine for MockEngine {
    fn mode(&self) -> &'static str {
        "mock"
    }

    async fn general(&self, _resume_text: &str) -> Result<GeneralAnalysis, AnalysisError> {
        tokio::time::sleep(self.delay).await;
        Ok(mock_general())
    }

    async fn tailored(
        &self,
        _resume_text: &str,
        _job_description: &JobDescription,
    ) -> Result<TailoredAnalysis, AnalysisError> {
        tokio::time::sleep(self.delay).await;
        Ok(mock_tailored())
    }
}
