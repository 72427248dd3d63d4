/// LLM Client — the single point of entry for all Gemini API calls.
///
/// No other module talks to the generative-language API directly; handlers
/// depend on the `TextGenerator` trait carried in `AppState`.
///
/// Model: gemini-pro (hardcoded, not configurable)
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

/// The model used for all LLM calls.
pub const MODEL: &str = "gemini-pro";
const MAX_RETRIES: u32 = 3;
const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Anything that turns a prompt into free text. Implemented by `LlmClient`;
/// tests substitute canned generators.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenates the text parts of the first candidate.
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

/// Wraps the Gemini `generateContent` endpoint with retry logic.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    api_base: String,
}

impl LlmClient {
    pub fn new(api_key: String, api_base: String) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()?,
            api_key,
            api_base,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            MODEL
        )
    }

    /// Makes a raw call to the Gemini API, returning the full response object.
    /// Retries on 429 (rate limit), 5xx, and transport errors with exponential backoff.
    pub async fn call(&self, prompt: &str) -> Result<GenerateContentResponse, LlmError> {
        let request_body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![RequestPart { text: prompt }],
            }],
        };
        let url = self.endpoint();

        let mut last_error: Option<LlmError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "LLM call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&url)
                .query(&[("key", self.api_key.as_str())])
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("LLM API returned {}: {}", status, body);
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<GeminiError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let parsed: GenerateContentResponse = response.json().await?;
            debug!("LLM call succeeded: candidates={}", parsed.candidates.len());
            return Ok(parsed);
        }

        Err(last_error.unwrap_or(LlmError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.call(prompt).await?.text().ok_or(LlmError::EmptyContent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![RequestPart { text: "hello" }],
            }],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
    }

    #[test]
    fn test_response_text_joins_parts() {
        let json = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "Hello, "}, {"text": "world"}], "role": "model"}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]
        }"#;
        let parsed: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.text().as_deref(), Some("Hello, world"));
    }

    #[test]
    fn test_response_without_candidates_has_no_text() {
        let parsed: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.text().is_none());

        let blocked: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates": [{"finishReason": "SAFETY"}]}"#).unwrap();
        assert!(blocked.text().is_none());
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let client =
            LlmClient::new("k".to_string(), "http://localhost:9999/".to_string()).unwrap();
        assert_eq!(
            client.endpoint(),
            "http://localhost:9999/v1beta/models/gemini-pro:generateContent"
        );
    }

    /// A local stand-in for the Gemini API that replays queued responses
    /// and counts requests.
    mod stub {
        use std::collections::VecDeque;
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::{Arc, Mutex};

        use axum::extract::State;
        use axum::http::StatusCode;
        use axum::Router;

        pub struct Upstream {
            responses: Mutex<VecDeque<(StatusCode, String)>>,
            calls: AtomicUsize,
        }

        impl Upstream {
            pub fn calls(&self) -> usize {
                self.calls.load(Ordering::SeqCst)
            }
        }

        async fn reply(State(upstream): State<Arc<Upstream>>) -> (StatusCode, String) {
            upstream.calls.fetch_add(1, Ordering::SeqCst);
            upstream
                .responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or((StatusCode::INTERNAL_SERVER_ERROR, "queue drained".to_string()))
        }

        /// Serves `responses` in order and returns the base URL to point a client at.
        pub async fn spawn(responses: Vec<(StatusCode, &str)>) -> (String, Arc<Upstream>) {
            let upstream = Arc::new(Upstream {
                responses: Mutex::new(
                    responses
                        .into_iter()
                        .map(|(status, body)| (status, body.to_string()))
                        .collect(),
                ),
                calls: AtomicUsize::new(0),
            });
            let app = Router::new().fallback(reply).with_state(upstream.clone());
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            tokio::spawn(async move {
                axum::serve(listener, app).await.unwrap();
            });
            (format!("http://{addr}"), upstream)
        }
    }

    const OK_BODY: &str = r#"{"candidates": [{"content": {"parts": [{"text": "done"}]}}]}"#;

    fn client_for(base: String) -> LlmClient {
        LlmClient::new("test-key".to_string(), base).unwrap()
    }

    #[tokio::test]
    async fn test_retries_server_errors_then_succeeds() {
        let (base, upstream) = stub::spawn(vec![
            (axum::http::StatusCode::SERVICE_UNAVAILABLE, "busy"),
            (axum::http::StatusCode::SERVICE_UNAVAILABLE, "busy"),
            (axum::http::StatusCode::OK, OK_BODY),
        ])
        .await;

        let text = client_for(base).generate("prompt").await.unwrap();
        assert_eq!(text, "done");
        assert_eq!(upstream.calls(), 3);
    }

    #[tokio::test]
    async fn test_client_error_is_not_retried() {
        let (base, upstream) = stub::spawn(vec![(
            axum::http::StatusCode::BAD_REQUEST,
            r#"{"error": {"code": 400, "message": "API key not valid"}}"#,
        )])
        .await;

        let err = client_for(base).generate("prompt").await.unwrap_err();
        match err {
            LlmError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "API key not valid");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
        assert_eq!(upstream.calls(), 1);
    }

    #[tokio::test]
    async fn test_gives_up_after_three_attempts() {
        let (base, upstream) = stub::spawn(vec![
            (axum::http::StatusCode::TOO_MANY_REQUESTS, "slow down"),
            (axum::http::StatusCode::TOO_MANY_REQUESTS, "slow down"),
            (axum::http::StatusCode::TOO_MANY_REQUESTS, "slow down"),
            (axum::http::StatusCode::OK, OK_BODY),
        ])
        .await;

        let err = client_for(base).generate("prompt").await.unwrap_err();
        assert!(matches!(err, LlmError::Api { status: 429, .. }));
        assert_eq!(upstream.calls(), 3);
    }

    #[tokio::test]
    async fn test_no_candidates_is_empty_content() {
        let (base, upstream) =
            stub::spawn(vec![(axum::http::StatusCode::OK, r#"{"candidates": []}"#)]).await;

        let err = client_for(base).generate("prompt").await.unwrap_err();
        assert!(matches!(err, LlmError::EmptyContent));
        assert_eq!(upstream.calls(), 1);
    }
}
