pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        .route("/api/v1/analyze", post(handlers::handle_analyze))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::io::{Cursor, Write};
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::analysis::engine::AnalysisEngine;
    use crate::analysis::handlers::{FullAnalysisResponse, InsightSource};
    use crate::analysis::models::AnalysisComputations;
    use crate::analysis::ontology::Ontology;
    use crate::analysis::similarity::TermFrequencyCosine;
    use crate::insights::{AiInsights, InsightError, InsightGenerator};

    const BOUNDARY: &str = "resume-intel-test-boundary";

    enum StubBehavior {
        Succeed,
        Fail,
        Hang,
    }

    struct StubInsights(StubBehavior);

    #[async_trait]
    impl InsightGenerator for StubInsights {
        async fn generate(
            &self,
            analysis: &AnalysisComputations,
        ) -> Result<AiInsights, InsightError> {
            match self.0 {
                StubBehavior::Succeed => Ok(AiInsights {
                    summary_explanation: format!(
                        "Overall {}",
                        analysis.scores.overall_score
                    ),
                    ats_suggestions: vec![],
                    rewritten_bullets: vec![],
                }),
                StubBehavior::Fail => Err(InsightError::EmptyContent),
                StubBehavior::Hang => {
                    tokio::time::sleep(Duration::from_secs(30)).await;
                    Err(InsightError::EmptyContent)
                }
            }
        }

        async fn check_connection(&self) -> Result<(), InsightError> {
            match self.0 {
                StubBehavior::Succeed => Ok(()),
                StubBehavior::Fail => Err(InsightError::EmptyContent),
                StubBehavior::Hang => {
                    tokio::time::sleep(Duration::from_secs(30)).await;
                    Ok(())
                }
            }
        }
    }

    fn app(behavior: StubBehavior) -> Router {
        let ontology = Ontology::new(
            vec!["python".into(), "fastapi".into(), "docker".into()],
            BTreeMap::new(),
        );
        let state = AppState {
            engine: AnalysisEngine::new(Arc::new(ontology), Arc::new(TermFrequencyCosine)),
            insights: Arc::new(StubInsights(behavior)),
            insight_timeout: Duration::from_millis(100),
        };
        build_router(state, 1024 * 1024)
    }

    fn docx_bytes(paragraphs: &[&str]) -> Vec<u8> {
        let body: String = paragraphs
            .iter()
            .map(|p| format!("<w:p><w:r><w:t>{p}</w:t></w:r></w:p>"))
            .collect();
        let xml = format!(
            r#"<?xml version="1.0"?><w:document xmlns:w="urn:w"><w:body>{body}</w:body></w:document>"#
        );
        let mut buf = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut buf);
            writer
                .start_file(
                    "word/document.xml",
                    zip::write::SimpleFileOptions::default(),
                )
                .unwrap();
            writer.write_all(xml.as_bytes()).unwrap();
            writer.finish().unwrap();
        }
        buf.into_inner()
    }

    fn multipart_request(jd_text: Option<&str>, file: Option<(&str, &[u8])>) -> Request<Body> {
        let mut body = Vec::new();
        if let Some(jd) = jd_text {
            write!(
                body,
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"jd_text\"\r\n\r\n{jd}\r\n"
            )
            .unwrap();
        }
        if let Some((filename, bytes)) = file {
            write!(
                body,
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"resume_file\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .unwrap();
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        write!(body, "--{BOUNDARY}--\r\n").unwrap();

        Request::builder()
            .method("POST")
            .uri("/api/v1/analyze")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    const RESUME_LINES: &[&str] = &[
        "Experience",
        "Built REST APIs with FastAPI",
        "Skills",
        "python, docker",
    ];
    const JD: &str = "Looking for a python backend developer with fastapi experience";

    #[tokio::test]
    async fn test_root_message() {
        let response = app(StubBehavior::Succeed)
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["message"], "AI Resume Intelligence Engine is Running");
    }

    #[tokio::test]
    async fn test_health_reports_ontology() {
        let response = app(StubBehavior::Succeed)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["ontology"]["skills"], 3);
        assert_eq!(body["ontology"]["roles"], 0);
        assert!(body.get("insights").is_none());
    }

    async fn insights_health(behavior: StubBehavior) -> Value {
        let response = app(behavior)
            .oneshot(
                Request::get("/health?check_insights=true")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        json_body(response).await
    }

    #[tokio::test]
    async fn test_health_checks_insight_backend_on_request() {
        assert_eq!(insights_health(StubBehavior::Succeed).await["insights"], "reachable");
        assert_eq!(insights_health(StubBehavior::Fail).await["insights"], "unreachable");
        assert_eq!(insights_health(StubBehavior::Hang).await["insights"], "unreachable");
    }

    #[tokio::test]
    async fn test_analyze_docx_end_to_end() {
        let docx = docx_bytes(RESUME_LINES);
        let response = app(StubBehavior::Succeed)
            .oneshot(multipart_request(Some(JD), Some(("resume.docx", docx.as_slice()))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: FullAnalysisResponse =
            serde_json::from_value(json_body(response).await).unwrap();
        let computation = &body.computation;
        assert_eq!(computation.resume_data.skills, vec!["python, docker"]);
        assert_eq!(
            computation.resume_data.experience,
            vec!["Built REST APIs with FastAPI"]
        );
        assert_eq!(computation.jd_data.required_skills, vec!["python", "fastapi"]);
        assert_eq!(
            computation.skill_gap.strong_matches,
            vec!["python", "fastapi"]
        );
        assert!(computation.skill_gap.missing_skills.is_empty());
        assert_eq!(body.insights_source, InsightSource::Model);
        assert_eq!(
            body.ai_insights.summary_explanation,
            format!("Overall {}", computation.scores.overall_score)
        );
    }

    #[tokio::test]
    async fn test_insight_failure_uses_fallback() {
        let docx = docx_bytes(RESUME_LINES);
        let response = app(StubBehavior::Fail)
            .oneshot(multipart_request(Some(JD), Some(("resume.docx", docx.as_slice()))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: FullAnalysisResponse =
            serde_json::from_value(json_body(response).await).unwrap();
        assert_eq!(body.insights_source, InsightSource::Fallback);
        assert_eq!(body.ai_insights, AiInsights::fallback());
    }

    #[tokio::test]
    async fn test_insight_timeout_uses_fallback() {
        let docx = docx_bytes(RESUME_LINES);
        let response = app(StubBehavior::Hang)
            .oneshot(multipart_request(Some(JD), Some(("resume.docx", docx.as_slice()))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: FullAnalysisResponse =
            serde_json::from_value(json_body(response).await).unwrap();
        assert_eq!(body.insights_source, InsightSource::Fallback);
    }

    #[tokio::test]
    async fn test_empty_jd_is_bad_request() {
        let docx = docx_bytes(RESUME_LINES);
        let response = app(StubBehavior::Succeed)
            .oneshot(multipart_request(Some("   "), Some(("resume.docx", docx.as_slice()))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["message"], "Job Description cannot be empty.");
    }

    #[tokio::test]
    async fn test_unsupported_format_is_bad_request() {
        let response = app(StubBehavior::Succeed)
            .oneshot(multipart_request(
                Some(JD),
                Some(("resume.txt", b"plain text resume".as_slice())),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "UNSUPPORTED_FORMAT");
    }

    #[tokio::test]
    async fn test_corrupt_docx_is_unprocessable() {
        let response = app(StubBehavior::Succeed)
            .oneshot(multipart_request(
                Some(JD),
                Some(("resume.docx", b"definitely not a zip".as_slice())),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_missing_fields_are_bad_request() {
        let docx = docx_bytes(RESUME_LINES);
        let no_jd = app(StubBehavior::Succeed)
            .oneshot(multipart_request(None, Some(("resume.docx", docx.as_slice()))))
            .await
            .unwrap();
        assert_eq!(no_jd.status(), StatusCode::BAD_REQUEST);

        let no_file = app(StubBehavior::Succeed)
            .oneshot(multipart_request(Some(JD), None))
            .await
            .unwrap();
        assert_eq!(no_file.status(), StatusCode::BAD_REQUEST);
    }
}
