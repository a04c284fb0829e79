use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

const OPENAI_KEY_PLACEHOLDER: &str = "YOUR_OPENAI_API_KEY_HERE";
const GEMINI_KEY_PLACEHOLDER: &str = "YOUR_GEMINI_KEY_HERE";

/// Credentials and endpoint for one LLM provider.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

/// Application configuration loaded from environment variables.
///
/// Provider keys are optional. When neither provider has a usable key the
/// service runs in mock mode; that decision is made once, from this value,
/// when the analyzer is built.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai: Option<ProviderConfig>,
    pub gemini: Option<ProviderConfig>,
    pub provider_timeout: Duration,
    pub mock_delay: Duration,
    pub upload_dir: PathBuf,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. `from_env` passes the
    /// process environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let openai = usable_key(lookup("OPENAI_API_KEY"), OPENAI_KEY_PLACEHOLDER).map(|api_key| {
            ProviderConfig {
                api_key,
                model: lookup("OPENAI_MODEL").unwrap_or_else(|| "gpt-4o-mini".to_string()),
                base_url: lookup("OPENAI_BASE_URL")
                    .unwrap_or_else(|| "https://api.openai.com".to_string()),
            }
        });

        let gemini = usable_key(lookup("GEMINI_API_KEY"), GEMINI_KEY_PLACEHOLDER).map(|api_key| {
            ProviderConfig {
                api_key,
                model: lookup("GEMINI_MODEL").unwrap_or_else(|| "gemini-2.5-flash".to_string()),
                base_url: lookup("GEMINI_BASE_URL")
                    .unwrap_or_else(|| "https://generativelanguage.googleapis.com".to_string()),
            }
        });

        let provider_timeout_secs = lookup("PROVIDER_TIMEOUT_SECS")
            .unwrap_or_else(|| "60".to_string())
            .parse::<u64>()
            .context("PROVIDER_TIMEOUT_SECS must be a whole number of seconds")?;

        let mock_delay_ms = lookup("MOCK_DELAY_MS")
            .unwrap_or_else(|| "1500".to_string())
            .parse::<u64>()
            .context("MOCK_DELAY_MS must be a whole number of milliseconds")?;

        Ok(Config {
            openai,
            gemini,
            provider_timeout: Duration::from_secs(provider_timeout_secs),
            mock_delay: Duration::from_millis(mock_delay_ms),
            upload_dir: PathBuf::from(lookup("UPLOAD_DIR").unwrap_or_else(|| "tmp".to_string())),
            port: lookup("PORT")
                .unwrap_or_else(|| "5000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }

    /// True when no provider has usable credentials.
    pub fn is_mock_mode(&self) -> bool {
        self.openai.is_none() && self.gemini.is_none()
    }
}

/// Treats empty values and the `.env.example` placeholder as "not configured".
fn usable_key(value: Option<String>, placeholder: &str) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && v != placeholder)
}
