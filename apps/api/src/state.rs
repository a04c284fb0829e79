use crate::analysis::Analyzer;
use crate::config::Config;
use crate::jd_fetcher::JdResolver;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Analyzer,
    /// Turns job posting links into posting text before tailored analysis.
    pub jd_resolver: JdResolver,
    pub config: Config,
}
