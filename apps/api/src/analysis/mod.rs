// Resume analysis pipeline: extraction -> prompt -> provider gateway -> validated result.
// All model calls go through llm_client; this module never talks to a provider directly.

pub mod analyzer;
pub mod engine;
pub mod extractor;
pub mod mock;
pub mod models;
pub mod prompts;

use thiserror::Error;

use crate::llm_client::GatewayError;

pub use analyzer::Analyzer;
pub use engine::engine_from_config;
pub use extractor::PdfTextExtractor;
pub use models::{GeneralAnalysis, TailoredAnalysis};

pub const MSG_RESUME_REQUIRED: &str = "Resume PDF is required.";
pub const MSG_JOB_DESCRIPTION_REQUIRED: &str = "Job description is required.";
pub const MSG_UNREADABLE_DOCUMENT: &str =
    "Could not read the PDF file. It might be corrupted or in an unsupported format.";
pub const MSG_PROVIDERS_EXHAUSTED: &str =
    "All AI providers failed to analyze the resume. Please check your API keys and quotas.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisMode {
    General,
    Tailored,
}

/// A job description known to contain non-whitespace text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDescription(String);

impl JobDescription {
    pub fn parse(text: impl Into<String>) -> Result<Self, AnalysisError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(AnalysisError::InvalidInput(
                MSG_JOB_DESCRIPTION_REQUIRED.to_string(),
            ));
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Failures the orchestrator reports to its caller. Each maps to a single
/// sentence via `user_message`; the `Display` text may carry internal
/// detail and is for logs only.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("unreadable document: {0}")]
    UnreadableDocument(#[from] extractor::ExtractError),

    #[error(transparent)]
    ProvidersExhausted(#[from] GatewayError),
}

impl AnalysisError {
    pub fn user_message(&self) -> &str {
        match self {
            AnalysisError::InvalidInput(msg) => msg,
            AnalysisError::UnreadableDocument(_) => MSG_UNREADABLE_DOCUMENT,
            AnalysisError::ProvidersExhausted(_) => MSG_PROVIDERS_EXHAUSTED,
        }
    }

    pub fn is_client_error(&self) -> bool {
        matches!(self, AnalysisError::InvalidInput(_))
    }
}
