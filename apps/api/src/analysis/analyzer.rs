//! Analysis Orchestrator.
//!
//! Flow per request: validate input → extract text → delete upload →
//! engine (mock or live) → typed result.
//!
//! The upload is handed over as a `tempfile::TempPath`, so the orchestrator
//! owns it exclusively. It is deleted right after extraction on every path;
//! if anything unwinds first, the `TempPath` drop guard removes it instead.

use std::sync::Arc;

use tempfile::TempPath;
use tracing::{debug, error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::analysis::engine::AnalysisEngine;
use crate::analysis::extractor::TextExtractor;
use crate::analysis::models::{GeneralAnalysis, TailoredAnalysis};
use crate::analysis::{AnalysisError, JobDescription};

#[derive(Clone)]
pub struct Analyzer {
    extractor: Arc<dyn TextExtractor>,
    engine: Arc<dyn AnalysisEngine>,
}

impl Analyzer {
    pub fn new(extractor: Arc<dyn TextExtractor>, engine: Arc<dyn AnalysisEngine>) -> Self {
        Self { extractor, engine }
    }

    pub fn engine(&self) -> &dyn AnalysisEngine {
        self.engine.as_ref()
    }

    /// General ATS check of the uploaded resume.
    pub async fn run_general(&self, upload: TempPath) -> Result<GeneralAnalysis, AnalysisError> {
        let request_id = Uuid::new_v4();
        async move {
            info!("Received general analysis request");
            let resume_text = self.extract_and_discard(upload).await?;
            let result = self.engine.general(&resume_text).await?;
            info!(ats_score = result.ats_score, "General analysis complete");
            Ok(result)
        }
        .instrument(info_span!("analysis", %request_id, mode = "general"))
        .await
    }

    /// Tailors the uploaded resume to `job_description`. A blank description
    /// is rejected before the upload is read.
    pub async fn run_tailored(
        &self,
        upload: TempPath,
        job_description: &str,
    ) -> Result<TailoredAnalysis, AnalysisError> {
        let request_id = Uuid::new_v4();
        async move {
            info!("Received tailored analysis request");
            let job_description = match JobDescription::parse(job_description) {
                Ok(jd) => jd,
                Err(e) => {
                    discard_upload(upload).await;
                    return Err(e);
                }
            };

            let resume_text = self.extract_and_discard(upload).await?;
            let result = self.engine.tailored(&resume_text, &job_description).await?;
            info!(match_score = result.match_score, "Tailored analysis complete");
            Ok(result)
        }
        .instrument(info_span!("analysis", %request_id, mode = "tailored"))
        .await
    }

    async fn extract_and_discard(&self, upload: TempPath) -> Result<String, AnalysisError> {
        debug!("Extracting resume text");
        let extracted = self.extractor.extract(&upload).await;
        discard_upload(upload).await;

        match extracted {
            Ok(text) => {
                if text.trim().is_empty() {
                    warn!("Resume has no extractable text layer");
                }
                info!(chars = text.len(), "Resume text extracted");
                Ok(text)
            }
            Err(e) => {
                error!("Resume extraction failed: {e}");
                Err(AnalysisError::UnreadableDocument(e))
            }
        }
    }
}

/// Deletes the upload. Failures are logged and swallowed so they never mask
/// the request's own result or error.
async fn discard_upload(upload: TempPath) {
    let path = upload.to_path_buf();
    match tokio::task::spawn_blocking(move || upload.close()).await {
        Ok(Ok(())) => debug!(path = %path.display(), "Upload deleted"),
        Ok(Err(e)) => warn!(path = %path.display(), error = %e, "Failed to delete upload"),
        Err(e) => warn!(path = %path.display(), error = %e, "Upload cleanup task failed"),
    }
}
