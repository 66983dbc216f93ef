/// LLM Client is the single point of entry for all model calls.
///
/// Talks to a local model server over the Ollama-style HTTP API
/// (`/api/generate`, `/api/show`). No other module may call the model server
/// directly; everything goes through `TextGenerator`.
///
/// Sampling parameters are hardcoded so every request behaves the same.
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

pub mod prompts;

pub const TEMPERATURE: f32 = 0.7;
pub const TOP_P: f32 = 0.9;
pub const MAX_NEW_TOKENS: u32 = 1000;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Anything that turns a prompt into free text.
///
/// `LlmClient` is the production implementation; tests swap in canned output.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;

    /// Name of the model answering requests, once known.
    fn model_name(&self) -> Option<String>;
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: SamplingOptions,
}

#[derive(Debug, Clone, Copy, Serialize)]
struct SamplingOptions {
    temperature: f32,
    top_p: f32,
    num_predict: u32,
}

impl Default for SamplingOptions {
    fn default() -> Self {
        Self {
            temperature: TEMPERATURE,
            top_p: TOP_P,
            num_predict: MAX_NEW_TOKENS,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    pub response: String,
    #[serde(default)]
    pub prompt_eval_count: Option<u32>,
    #[serde(default)]
    pub eval_count: Option<u32>,
}

#[derive(Debug, Serialize)]
struct ShowRequest<'a> {
    model: &'a str,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: String,
}

/// Model server client with lazy model selection.
///
/// The primary model is checked on first use. If it cannot be loaded the client
/// falls back to the smaller default model for the rest of the process.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    base_url: String,
    primary_model: String,
    fallback_model: String,
    resolved_model: Arc<OnceCell<String>>,
}

impl LlmClient {
    pub fn new(
        base_url: impl Into<String>,
        primary_model: impl Into<String>,
        fallback_model: impl Into<String>,
    ) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            primary_model: primary_model.into(),
            fallback_model: fallback_model.into(),
            resolved_model: Arc::new(OnceCell::new()),
        })
    }

    /// Returns the model used for generation, loading it on first call.
    pub async fn model(&self) -> &str {
        self.resolved_model
            .get_or_init(|| async {
                match self.check_model(&self.primary_model).await {
                    Ok(()) => {
                        info!("Model loaded: {}", self.primary_model);
                        self.primary_model.clone()
                    }
                    Err(e) => {
                        warn!(
                            "Failed to load model {}: {e}. Falling back to {}",
                            self.primary_model, self.fallback_model
                        );
                        self.fallback_model.clone()
                    }
                }
            })
            .await
    }

    async fn check_model(&self, model: &str) -> Result<(), LlmError> {
        let response = self
            .client
            .post(format!("{}/api/show", self.base_url))
            .json(&ShowRequest { model })
            .send()
            .await?;

        check_status(response).await.map(|_| ())
    }

    /// Makes a single non-streaming generation call. No retries.
    pub async fn call(&self, prompt: &str) -> Result<GenerateResponse, LlmError> {
        let model = self.model().await;
        let request_body = GenerateRequest {
            model,
            prompt,
            stream: false,
            options: SamplingOptions::default(),
        };

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&request_body)
            .send()
            .await?;

        let generated: GenerateResponse = check_status(response).await?.json().await?;

        debug!(
            "LLM call succeeded: model={}, prompt_tokens={:?}, output_tokens={:?}",
            model, generated.prompt_eval_count, generated.eval_count
        );

        Ok(generated)
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, LlmError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorBody>(&body)
        .map(|e| e.error)
        .unwrap_or(body);
    Err(LlmError::Api {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let response = self.call(prompt).await?;
        if response.response.trim().is_empty() {
            return Err(LlmError::EmptyContent);
        }
        Ok(response.response)
    }

    fn model_name(&self) -> Option<String> {
        self.resolved_model.get().cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sampling_options_serialize_fixed_values() {
        let json = serde_json::to_value(SamplingOptions::default()).unwrap();
        assert!((json["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
        assert!((json["top_p"].as_f64().unwrap() - 0.9).abs() < 1e-6);
        assert_eq!(json["num_predict"], 1000);
    }

    #[test]
    fn test_generate_request_is_non_streaming() {
        let body = GenerateRequest {
            model: "m",
            prompt: "p",
            stream: false,
            options: SamplingOptions::default(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["stream"], false);
        assert_eq!(json["model"], "m");
    }

    #[test]
    fn test_generate_response_tolerates_missing_counters() {
        let parsed: GenerateResponse = serde_json::from_str(r#"{"response": "hi"}"#).unwrap();
        assert_eq!(parsed.response, "hi");
        assert!(parsed.eval_count.is_none());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = LlmClient::new("http://localhost:11434/", "a", "b").unwrap();
        assert_eq!(client.base_url, "http://localhost:11434");
        assert!(client.model_name().is_none());
    }

    /// Local model server that knows exactly one model. `/api/generate` echoes
    /// the model it was asked for.
    async fn spawn_model_server(known_model: &'static str) -> String {
        use axum::{http::StatusCode, routing::post, Json, Router};
        use serde_json::{json, Value};

        let app = Router::new()
            .route(
                "/api/show",
                post(move |Json(body): Json<Value>| async move {
                    if body["model"] == known_model {
                        (StatusCode::OK, Json(json!({ "modelfile": "" })))
                    } else {
                        (
                            StatusCode::NOT_FOUND,
                            Json(json!({ "error": "model not found" })),
                        )
                    }
                }),
            )
            .route(
                "/api/generate",
                post(|Json(body): Json<Value>| async move {
                    Json(json!({
                        "response": format!("answered by {}", body["model"].as_str().unwrap_or("")),
                        "eval_count": 3
                    }))
                }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_missing_primary_model_falls_back_to_default_model() {
        let base_url = spawn_model_server("small-model").await;
        let client = LlmClient::new(base_url, "big-model", "small-model").unwrap();

        assert_eq!(client.model().await, "small-model");
        assert_eq!(client.model_name().as_deref(), Some("small-model"));
        assert_eq!(
            client.generate("hello").await.unwrap(),
            "answered by small-model"
        );
    }

    #[tokio::test]
    async fn test_available_primary_model_is_used() {
        let base_url = spawn_model_server("big-model").await;
        let client = LlmClient::new(base_url, "big-model", "small-model").unwrap();

        assert_eq!(client.model().await, "big-model");
        assert_eq!(
            client.generate("hello").await.unwrap(),
            "answered by big-model"
        );
    }

    #[tokio::test]
    async fn test_closed_port_falls_back_to_default_model() {
        // Bind then drop so the port is known to be free of any listener.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client =
            LlmClient::new(format!("http://{addr}"), "big-model", "small-model").unwrap();
        assert_eq!(client.model().await, "small-model");
        assert!(client.generate("hello").await.is_err());
    }
}
