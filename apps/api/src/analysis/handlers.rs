//! Axum route handlers for the Analysis API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::analysis::models::AnalysisComputations;
use crate::documents::decode;
use crate::errors::AppError;
use crate::insights::{AiInsights, InsightError};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Where the `ai_insights` block came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightSource {
    Model,
    Fallback,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FullAnalysisResponse {
    pub analysis_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub computation: AnalysisComputations,
    pub ai_insights: AiInsights,
    pub insights_source: InsightSource,
}

/// The two multipart fields of an analyze request.
struct AnalyzeUpload {
    filename: String,
    file_bytes: bytes::Bytes,
    jd_text: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analyze
///
/// Multipart upload: `resume_file` (PDF or DOCX) + `jd_text`.
/// Pipeline: decode → segment → parse JD → score → insights (or fallback).
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<FullAnalysisResponse>, AppError> {
    let analysis_id = Uuid::new_v4();
    let upload = read_upload(multipart).await?;

    let response = run_analysis(&state, upload, analysis_id)
        .instrument(info_span!("analyze", %analysis_id))
        .await?;

    Ok(Json(response))
}

async fn run_analysis(
    state: &AppState,
    upload: AnalyzeUpload,
    analysis_id: Uuid,
) -> Result<FullAnalysisResponse, AppError> {
    info!(filename = %upload.filename, bytes = upload.file_bytes.len(), "Analyzing resume");

    let engine = state.engine.clone();
    let computation = tokio::task::spawn_blocking(move || -> Result<_, AppError> {
        let raw_text = decode(&upload.filename, &upload.file_bytes)?;
        Ok(engine.analyze_text(&raw_text, &upload.jd_text)?)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("analysis task failed: {e}")))??;

    let (ai_insights, insights_source) = generate_insights(state, &computation).await;

    Ok(FullAnalysisResponse {
        analysis_id,
        generated_at: Utc::now(),
        computation,
        ai_insights,
        insights_source,
    })
}

/// Calls the insight backend under the configured timeout, substituting the fixed fallback on
/// any failure. Insight failures never fail the request.
async fn generate_insights(
    state: &AppState,
    computation: &AnalysisComputations,
) -> (AiInsights, InsightSource) {
    let result = tokio::time::timeout(
        state.insight_timeout,
        state.insights.generate(computation),
    )
    .await
    .unwrap_or_else(|_| Err(InsightError::Timeout(state.insight_timeout.as_secs())));

    match result {
        Ok(insights) => (insights, InsightSource::Model),
        Err(e) => {
            warn!("Insight generation failed, using fallback: {e}");
            (AiInsights::fallback(), InsightSource::Fallback)
        }
    }
}

async fn read_upload(mut multipart: Multipart) -> Result<AnalyzeUpload, AppError> {
    let mut file: Option<(String, bytes::Bytes)> = None;
    let mut jd_text: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("resume_file") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                file = Some((filename, field.bytes().await?));
            }
            Some("jd_text") => jd_text = Some(field.text().await?),
            _ => {}
        }
    }

    let (filename, file_bytes) =
        file.ok_or_else(|| AppError::Validation("resume_file is required".to_string()))?;
    let jd_text = jd_text.ok_or_else(|| AppError::Validation("jd_text is required".to_string()))?;

    Ok(AnalyzeUpload {
        filename,
        file_bytes,
        jd_text,
    })
}
