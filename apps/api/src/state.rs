use std::sync::Arc;
use std::time::Duration;

use crate::analysis::engine::AnalysisEngine;
use crate::insights::InsightGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Scoring pipeline with the process-wide ontology and similarity backend bound.
    pub engine: AnalysisEngine,
    /// Pluggable insight backend. Default: GroqInsightClient.
    pub insights: Arc<dyn InsightGenerator>,
    pub insight_timeout: Duration,
}
