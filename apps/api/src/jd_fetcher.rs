//! Job-description resolver: when the submitted job description is a link,
//! fetch the page and use its visible body text instead.
//!
//! Resolution never fails the request. Any fetch or parse problem falls back
//! to the text the user submitted.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, Url};
use scraper::{Html, Node};
use tracing::{info, warn};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Elements whose text is page chrome rather than posting content.
const SKIPPED_ELEMENTS: &[&str] = &[
    "head", "script", "style", "noscript", "header", "footer", "nav",
];

#[derive(Clone)]
pub struct JdResolver {
    client: Client,
}

impl JdResolver {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(FETCH_TIMEOUT)
            .build()
            .context("Failed to create job description HTTP client")?;
        Ok(Self { client })
    }

    /// Returns the page text for an http(s) link, or `input` unchanged.
    pub async fn resolve(&self, input: &str) -> String {
        let Some(url) = job_url(input) else {
            return input.to_string();
        };

        match self.fetch_text(url.clone()).await {
            Ok(text) if !text.is_empty() => {
                info!(%url, chars = text.len(), "Resolved job description from URL");
                text
            }
            Ok(_) => {
                warn!(%url, "Job posting page had no text; using input as is");
                input.to_string()
            }
            Err(e) => {
                warn!(%url, "Failed to fetch job posting: {e:#}");
                input.to_string()
            }
        }
    }

    async fn fetch_text(&self, url: Url) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to fetch job post")?;

        if !response.status().is_success() {
            anyhow::bail!("HTTP error: {}", response.status());
        }

        let html = response
            .text()
            .await
            .context("Failed to read response body")?;
        Ok(html_to_text(&html))
    }
}

/// Parses `input` as a job posting link. Only http and https qualify.
fn job_url(input: &str) -> Option<Url> {
    let url = Url::parse(input.trim()).ok()?;
    matches!(url.scheme(), "http" | "https").then_some(url)
}

/// Visible document text with page chrome removed and whitespace collapsed.
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut words: Vec<&str> = Vec::new();

    for node in document.root_element().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let skipped = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| SKIPPED_ELEMENTS.contains(&el.name()))
        });
        if !skipped {
            words.extend(text.split_whitespace());
        }
    }

    words.join(" ")
}
