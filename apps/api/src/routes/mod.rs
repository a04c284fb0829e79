pub mod analyze;
pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Room for multipart boundaries, headers and the job description text.
const FORM_OVERHEAD_BYTES: usize = 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/general", post(analyze::handle_general))
        .route("/api/tailored", post(analyze::handle_tailored))
        // Legacy clients post tailored requests to the bare prefix
        .route("/api", post(analyze::handle_tailored))
        .layer(DefaultBodyLimit::max(
            analyze::MAX_RESUME_BYTES + FORM_OVERHEAD_BYTES,
        ))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::extractor::tests::pdf_with_text;
    use crate::analysis::{engine_from_config, Analyzer, PdfTextExtractor};
    use crate::config::Config;
    use crate::jd_fetcher::JdResolver;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::Value;
    use std::collections::HashMap;
    use std::path::Path;
    use std::sync::Arc;
    use tower::ServiceExt;

    const BOUNDARY: &str = "----ats-test-boundary";

    enum Part<'a> {
        File {
            name: &'a str,
            content_type: &'a str,
            bytes: Vec<u8>,
        },
        Text {
            name: &'a str,
            value: &'a str,
        },
    }

    fn multipart_body(parts: Vec<Part<'_>>) -> Vec<u8> {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match part {
                Part::File {
                    name,
                    content_type,
                    bytes,
                } => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{name}\"; filename=\"resume.pdf\"\r\n\
                             Content-Type: {content_type}\r\n\r\n"
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(&bytes);
                }
                Part::Text { name, value } => {
                    body.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}")
                            .as_bytes(),
                    );
                }
            }
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn pdf_part(bytes: Vec<u8>) -> Part<'static> {
        Part::File {
            name: "resume",
            content_type: "application/pdf",
            bytes,
        }
    }

    fn mock_router(upload_dir: &Path) -> Router {
        let vars: HashMap<&str, String> = HashMap::from([
            ("MOCK_DELAY_MS", "0".to_string()),
            ("UPLOAD_DIR", upload_dir.display().to_string()),
        ]);
        let config = Config::from_lookup(|key| vars.get(key).cloned()).unwrap();
        let engine = engine_from_config(&config).unwrap();
        let state = AppState {
            analyzer: Analyzer::new(Arc::new(PdfTextExtractor), engine),
            jd_resolver: JdResolver::new().unwrap(),
            config,
        };
        build_router(state)
    }

    async fn post(router: Router, uri: &str, parts: Vec<Part<'_>>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(parts)))
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn dir_is_empty(dir: &Path) -> bool {
        std::fs::read_dir(dir).unwrap().next().is_none()
    }

    #[tokio::test]
    async fn test_health_reports_mock_mode() {
        let dir = tempfile::tempdir().unwrap();
        let response = mock_router(dir.path())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["mode"], "mock");
        assert_eq!(body["providers"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_general_without_file_is_bad_request() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = post(mock_router(dir.path()), "/api/general", vec![]).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({ "error": "Resume PDF is required." }));
    }

    #[tokio::test]
    async fn test_general_returns_analysis_and_cleans_up() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = post(
            mock_router(dir.path()),
            "/api/general",
            vec![pdf_part(pdf_with_text("Jane Doe Software Engineer"))],
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["ats_score"].as_u64().unwrap() <= 100);
        assert!(body["ats_friendly_rewrite"].is_string());
        assert!(dir_is_empty(dir.path()));
    }

    #[tokio::test]
    async fn test_non_pdf_content_type_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = post(
            mock_router(dir.path()),
            "/api/general",
            vec![Part::File {
                name: "resume",
                content_type: "text/plain",
                bytes: b"plain text resume".to_vec(),
            }],
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Only PDF files are allowed.");
        assert!(dir_is_empty(dir.path()));
    }

    #[tokio::test]
    async fn test_oversized_resume_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut bytes = b"%PDF-1.4\n".to_vec();
        bytes.resize(analyze::MAX_RESUME_BYTES + 1, b' ');

        let (status, body) = post(mock_router(dir.path()), "/api/general", vec![pdf_part(bytes)]).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "File too large. Maximum size is 5MB.");
        assert!(dir_is_empty(dir.path()));
    }

    #[tokio::test]
    async fn test_blank_job_description_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = post(
            mock_router(dir.path()),
            "/api/tailored",
            vec![
                pdf_part(pdf_with_text("Jane Doe")),
                Part::Text {
                    name: "jobDescription",
                    value: "   ",
                },
            ],
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Job description is required.");
        assert!(dir_is_empty(dir.path()));
    }

    #[tokio::test]
    async fn test_tailored_checks_job_description_before_file() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = post(mock_router(dir.path()), "/api/tailored", vec![]).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Job description is required.");
    }

    #[tokio::test]
    async fn test_legacy_prefix_serves_tailored_analysis() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = post(
            mock_router(dir.path()),
            "/api",
            vec![
                Part::Text {
                    name: "jobDescription",
                    value: "Senior Backend Engineer, Node.js, Docker, AWS",
                },
                pdf_part(pdf_with_text("Jane Doe Software Engineer")),
            ],
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["match_score"].as_u64().unwrap() <= 100);
        assert!(body["priority_missing_skills"].as_array().unwrap().len() <= 3);
        assert!(body["resume_data"]["references"].is_array());
        assert!(dir_is_empty(dir.path()));
    }

    #[tokio::test]
    async fn test_corrupt_pdf_is_server_error() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = post(
            mock_router(dir.path()),
            "/api/general",
            vec![pdf_part(b"definitely not a pdf".to_vec())],
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body["error"],
            "Could not read the PDF file. It might be corrupted or in an unsupported format."
        );
        assert!(dir_is_empty(dir.path()));
    }
}
