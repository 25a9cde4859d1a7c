use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::warn;

use crate::insights::InsightError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct HealthParams {
    #[serde(default)]
    pub check_insights: bool,
}

/// GET /
pub async fn root_handler() -> Json<Value> {
    Json(json!({ "message": "AI Resume Intelligence Engine is Running" }))
}

/// GET /health
/// Returns service status, version and the size of the loaded ontology.
/// With `?check_insights=true` it also makes one call to the insight backend.
pub async fn health_handler(
    State(state): State<AppState>,
    Query(params): Query<HealthParams>,
) -> Json<Value> {
    let ontology = state.engine.ontology();
    let mut body = json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "resume-intel-api",
        "ontology": {
            "skills": ontology.skills().len(),
            "roles": ontology.role_count()
        }
    });

    if params.check_insights {
        let result = tokio::time::timeout(state.insight_timeout, state.insights.check_connection())
            .await
            .unwrap_or_else(|_| Err(InsightError::Timeout(state.insight_timeout.as_secs())));
        let insights = match result {
            Ok(()) => "reachable",
            Err(e) => {
                warn!("Insight backend check failed: {e}");
                "unreachable"
            }
        };
        body["insights"] = json!(insights);
    }

    Json(body)
}
