mod analysis;
mod config;
mod documents;
mod errors;
mod insights;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::engine::AnalysisEngine;
use crate::analysis::ontology::Ontology;
use crate::analysis::similarity::{TermFrequencyCosine, TextSimilarity};
use crate::config::Config;
use crate::insights::GroqInsightClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Intelligence API v{}", env!("CARGO_PKG_VERSION"));

    // Ontology is loaded once and shared read-only; missing files degrade to empty data
    let ontology = Arc::new(Ontology::load(&config.ontology_dir));

    let similarity: Arc<dyn TextSimilarity> = Arc::new(TermFrequencyCosine);
    info!("Similarity backend: {}", similarity.backend_name());

    let insights = Arc::new(GroqInsightClient::new(config.groq_api_key.clone()));
    info!(
        "Insight client initialized (model: {}, timeout: {}s)",
        crate::insights::MODEL,
        config.insight_timeout_secs
    );

    let state = AppState {
        engine: AnalysisEngine::new(ontology, similarity),
        insights,
        insight_timeout: Duration::from_secs(config.insight_timeout_secs),
    };

    let app = build_router(state, config.max_upload_bytes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the frontend host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
