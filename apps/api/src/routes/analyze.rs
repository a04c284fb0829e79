use std::path::Path;

use anyhow::Context;
use axum::{
    extract::{
        multipart::{Field, MultipartError},
        Multipart, State,
    },
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use tempfile::TempPath;
use tracing::debug;

use crate::analysis::{
    GeneralAnalysis, TailoredAnalysis, MSG_JOB_DESCRIPTION_REQUIRED, MSG_RESUME_REQUIRED,
};
use crate::errors::AppError;
use crate::state::AppState;

/// Largest accepted resume upload.
pub const MAX_RESUME_BYTES: usize = 5 * 1024 * 1024;

const MSG_FILE_TOO_LARGE: &str = "File too large. Maximum size is 5MB.";
const PDF_CONTENT_TYPE: &str = "application/pdf";
const RESUME_FIELD: &str = "resume";
const JOB_DESCRIPTION_FIELD: &str = "jobDescription";

/// The multipart fields this API understands. Unknown fields are ignored.
#[derive(Default)]
struct AnalyzeForm {
    resume: Option<Bytes>,
    job_description: Option<String>,
}

/// POST /api/general
pub async fn handle_general(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<GeneralAnalysis>, AppError> {
    let form = read_form(multipart).await?;
    let resume = form
        .resume
        .ok_or_else(|| AppError::Validation(MSG_RESUME_REQUIRED.to_string()))?;

    let upload = store_upload(&state.config.upload_dir, resume).await?;
    let result = state.analyzer.run_general(upload).await?;
    Ok(Json(result))
}

/// POST /api/tailored (also served at POST /api)
pub async fn handle_tailored(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<TailoredAnalysis>, AppError> {
    let form = read_form(multipart).await?;
    let job_description = form
        .job_description
        .filter(|jd| !jd.trim().is_empty())
        .ok_or_else(|| AppError::Validation(MSG_JOB_DESCRIPTION_REQUIRED.to_string()))?;
    let resume = form
        .resume
        .ok_or_else(|| AppError::Validation(MSG_RESUME_REQUIRED.to_string()))?;

    let job_description = state.jd_resolver.resolve(&job_description).await;
    let upload = store_upload(&state.config.upload_dir, resume).await?;
    let result = state
        .analyzer
        .run_tailored(upload, &job_description)
        .await?;
    Ok(Json(result))
}

async fn read_form(mut multipart: Multipart) -> Result<AnalyzeForm, AppError> {
    let mut form = AnalyzeForm::default();

    while let Some(field) = multipart.next_field().await.map_err(invalid_upload)? {
        match field.name() {
            Some(RESUME_FIELD) => form.resume = Some(read_resume(field).await?),
            Some(JOB_DESCRIPTION_FIELD) => {
                form.job_description = Some(field.text().await.map_err(invalid_upload)?);
            }
            other => debug!(field = ?other, "Ignoring unexpected multipart field"),
        }
    }

    Ok(form)
}

async fn read_resume(field: Field<'_>) -> Result<Bytes, AppError> {
    if field.content_type() != Some(PDF_CONTENT_TYPE) {
        return Err(AppError::Validation(
            "Only PDF files are allowed.".to_string(),
        ));
    }

    let bytes = field.bytes().await.map_err(invalid_upload)?;
    if bytes.len() > MAX_RESUME_BYTES {
        return Err(AppError::Validation(MSG_FILE_TOO_LARGE.to_string()));
    }
    if bytes.is_empty() {
        return Err(AppError::Validation(MSG_RESUME_REQUIRED.to_string()));
    }
    Ok(bytes)
}

fn invalid_upload(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::Validation(MSG_FILE_TOO_LARGE.to_string());
    }
    AppError::Validation(format!("Invalid upload: {}", e.body_text()))
}

/// Writes the resume to a uniquely named file under `dir`. The returned
/// handle deletes the file when dropped.
async fn store_upload(dir: &Path, bytes: Bytes) -> Result<TempPath, AppError> {
    let upload = tempfile::Builder::new()
        .prefix("resume-")
        .suffix(".pdf")
        .tempfile_in(dir)
        .with_context(|| format!("Failed to create upload file in {}", dir.display()))?
        .into_temp_path();

    tokio::fs::write(&upload, &bytes)
        .await
        .context("Failed to write upload")?;
    debug!(path = %upload.display(), size = bytes.len(), "Stored upload");
    Ok(upload)
}
