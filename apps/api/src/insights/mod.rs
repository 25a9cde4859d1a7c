//! Generates narrative insights on top of the deterministic analysis.
//!
//! The analysis is serialized to JSON and sent to an OpenAI-compatible chat-completions
//! endpoint (Groq). The model only explains; it never changes scores. Callers treat any
//! failure as "use `AiInsights::fallback()`".
//!
//! Model: llama-3.1-8b-instant (hardcoded; output shape is tuned against it)

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::analysis::models::AnalysisComputations;

pub mod prompts;

const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const MODEL: &str = "llama-3.1-8b-instant";
const TEMPERATURE: f64 = 0.2;
const MAX_RETRIES: u32 = 2;

#[derive(Debug, Error)]
pub enum InsightError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Model returned empty content")]
    EmptyContent,

    #[error("Insight request timed out after {0}s")]
    Timeout(u64),
}

/// Human-readable insights produced by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiInsights {
    pub summary_explanation: String,
    #[serde(default)]
    pub ats_suggestions: Vec<String>,
    #[serde(default)]
    pub rewritten_bullets: Vec<String>,
}

impl AiInsights {
    /// Fixed insights returned when the model is unavailable.
    pub fn fallback() -> Self {
        Self {
            summary_explanation: "AI service temporarily unavailable. Scores are calculated \
                deterministically and are accurate."
                .to_string(),
            ats_suggestions: vec![
                "Ensure all keywords from the job description are present.".to_string(),
                "Use standardized section headers.".to_string(),
            ],
            rewritten_bullets: vec![
                "[AI Unavailable] Manual review recommended for bullet points.".to_string(),
            ],
        }
    }
}

/// Pluggable insight backend, carried in `AppState` as `Arc<dyn InsightGenerator>`.
#[async_trait]
pub trait InsightGenerator: Send + Sync {
    async fn generate(&self, analysis: &AnalysisComputations) -> Result<AiInsights, InsightError>;

    /// Cheap round trip to the backend, used by `/health?check_insights=true`.
    async fn check_connection(&self) -> Result<(), InsightError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f64,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Groq chat-completions client with retry on 429/5xx.
#[derive(Clone)]
pub struct GroqInsightClient {
    client: Client,
    api_key: String,
    system_prompt: String,
}

impl GroqInsightClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            system_prompt: prompts::system_prompt(),
        }
    }

    async fn complete(&self, user_content: &str) -> Result<String, InsightError> {
        let request_body = ChatRequest {
            model: MODEL,
            temperature: TEMPERATURE,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &self.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_content,
                },
            ],
            response_format: Some(ResponseFormat {
                format_type: "json_object",
            }),
            max_tokens: None,
        };

        let mut last_error: Option<InsightError> = None;

        for attempt in 0..=MAX_RETRIES {
            if attempt > 0 {
                // 500ms, 1s
                let delay = std::time::Duration::from_millis(500 * (1 << (attempt - 1)));
                warn!(
                    "Insight call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = match self
                .client
                .post(GROQ_API_URL)
                .bearer_auth(&self.api_key)
                .json(&request_body)
                .send()
                .await
            {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(InsightError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("Insight API returned {}: {}", status, body);
                last_error = Some(InsightError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(api_error(status.as_u16(), body));
            }

            let chat: ChatResponse = response.json().await?;
            if let Some(usage) = &chat.usage {
                debug!(
                    "Insight call succeeded: prompt_tokens={}, completion_tokens={}",
                    usage.prompt_tokens, usage.completion_tokens
                );
            }

            return chat
                .choices
                .into_iter()
                .next()
                .and_then(|c| c.message.content)
                .filter(|c| !c.trim().is_empty())
                .ok_or(InsightError::EmptyContent);
        }

        Err(last_error.unwrap_or(InsightError::EmptyContent))
    }
}

#[async_trait]
impl InsightGenerator for GroqInsightClient {
    async fn generate(&self, analysis: &AnalysisComputations) -> Result<AiInsights, InsightError> {
        let analysis_json = serde_json::to_string(analysis)?;
        let content = self.complete(&prompts::user_prompt(&analysis_json)).await?;
        parse_insights(&content)
    }

    /// Single short completion, no retries.
    async fn check_connection(&self) -> Result<(), InsightError> {
        let response = self
            .client
            .post(GROQ_API_URL)
            .bearer_auth(&self.api_key)
            .json(&ping_request())
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            debug!("Insight backend reachable");
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(api_error(status.as_u16(), body))
    }
}

/// Prefers the provider's `error.message` over the raw body.
fn api_error(status: u16, body: String) -> InsightError {
    let message = serde_json::from_str::<ApiError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body);
    InsightError::Api { status, message }
}

fn ping_request() -> ChatRequest<'static> {
    ChatRequest {
        model: MODEL,
        temperature: TEMPERATURE,
        messages: vec![ChatMessage {
            role: "user",
            content: "Hello",
        }],
        response_format: None,
        max_tokens: Some(10),
    }
}

/// Parses model output, tolerating markdown code fences around the JSON.
pub fn parse_insights(content: &str) -> Result<AiInsights, InsightError> {
    serde_json::from_str(strip_json_fences(content)).map_err(InsightError::Parse)
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let inner = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"));
    match inner {
        Some(stripped) => {
            let stripped = stripped.trim_start();
            stripped
                .strip_suffix("```")
                .map(str::trim)
                .unwrap_or(stripped)
        }
        None => text,
    }
}
