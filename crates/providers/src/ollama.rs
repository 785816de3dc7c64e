//! Ollama gateway implementation.
//!
//! Talks to the non-streaming `POST /api/generate` endpoint:
//!
//! ```json
//! { "model": "gpt-oss:20b", "prompt": "...", "stream": false }
//! ```
//!
//! and expects a JSON body with a string `response` field. Every failure is
//! mapped onto a [`GatewayError`]; nothing panics or escapes.

use async_trait::async_trait;
use localagent_core::error::GatewayError;
use localagent_core::gateway::{GatewayResult, ModelGateway};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A gateway to an Ollama-compatible completion endpoint.
pub struct OllamaGateway {
    base_url: String,
    model: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl OllamaGateway {
    /// Create a gateway for `model` at `base_url` (e.g. `http://localhost:11434`).
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            timeout: DEFAULT_TIMEOUT,
            client: reqwest::Client::new(),
        }
    }

    /// Create a gateway for the default local Ollama install.
    pub fn local(model: impl Into<String>) -> Self {
        Self::new("http://localhost:11434", model)
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn transport_error(&self, e: reqwest::Error) -> GatewayError {
        if e.is_timeout() {
            GatewayError::ConnectionFailed(format!(
                "request timed out after {}s",
                self.timeout.as_secs_f32()
            ))
        } else {
            GatewayError::ConnectionFailed(e.to_string())
        }
    }
}

#[async_trait]
impl ModelGateway for OllamaGateway {
    fn name(&self) -> &str {
        "ollama"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, prompt: &str) -> GatewayResult {
        let url = format!("{}/api/generate", self.base_url);
        let body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        debug!(model = %self.model, prompt_chars = prompt.len(), "Sending completion request");

        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Model endpoint returned error status");
            return Err(GatewayError::BadStatus(status.as_u16()));
        }

        let text = response.text().await.map_err(|e| self.transport_error(e))?;
        let parsed: GenerateResponse = serde_json::from_str(&text)
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

        Ok(parsed.response)
    }

    async fn health_check(&self) -> Result<bool, GatewayError> {
        let url = format!("{}/api/tags", self.base_url);
        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        Ok(response.status().is_success())
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Json;
    use axum::Router;
    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use serde_json::{Value, json};

    /// Serve `app` on an ephemeral local port and return its base URL.
    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    async fn echo_generate(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
        if body["stream"] != json!(false) || body["model"] != json!("test-model") {
            return (StatusCode::BAD_REQUEST, Json(json!({"error": "bad request"})));
        }
        let prompt = body["prompt"].as_str().unwrap_or_default();
        (
            StatusCode::OK,
            Json(json!({
                "model": "test-model",
                "response": format!("  USE_TOOL:get_weather:{prompt}\n"),
                "done": true
            })),
        )
    }

    #[test]
    fn local_constructor() {
        let gw = OllamaGateway::local("llama3");
        assert_eq!(gw.name(), "ollama");
        assert_eq!(gw.model(), "llama3");
        assert!(gw.base_url().contains("localhost:11434"));
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let gw = OllamaGateway::new("http://host:1234/", "m");
        assert_eq!(gw.base_url(), "http://host:1234");
    }

    #[test]
    fn request_body_shape() {
        let body = GenerateRequest {
            model: "gpt-oss:20b",
            prompt: "hi",
            stream: false,
        };
        let v = serde_json::to_value(&body).unwrap();
        assert_eq!(v, json!({"model": "gpt-oss:20b", "prompt": "hi", "stream": false}));
    }

    #[tokio::test]
    async fn completion_returns_raw_text() {
        let base = serve(Router::new().route("/api/generate", post(echo_generate))).await;
        let gw = OllamaGateway::new(base, "test-model");

        let text = gw.complete("Paris").await.unwrap();
        // No trimming of the completion happens at the gateway.
        assert_eq!(text, "  USE_TOOL:get_weather:Paris\n");
    }

    #[tokio::test]
    async fn non_success_status_is_bad_status() {
        let app = Router::new().route(
            "/api/generate",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "model crashed") }),
        );
        let gw = OllamaGateway::new(serve(app).await, "test-model");

        assert_eq!(gw.complete("hi").await.unwrap_err(), GatewayError::BadStatus(500));
    }

    #[tokio::test]
    async fn missing_model_is_bad_status() {
        let app = Router::new().route(
            "/api/generate",
            post(|| async { (StatusCode::NOT_FOUND, Json(json!({"error": "model not found"}))) }),
        );
        let gw = OllamaGateway::new(serve(app).await, "missing");

        assert_eq!(gw.complete("hi").await.unwrap_err(), GatewayError::BadStatus(404));
    }

    #[tokio::test]
    async fn body_without_response_field_is_invalid() {
        let app = Router::new().route(
            "/api/generate",
            post(|| async { Json(json!({"done": true})) }),
        );
        let gw = OllamaGateway::new(serve(app).await, "test-model");

        let err = gw.complete("hi").await.unwrap_err();
        assert!(matches!(err, GatewayError::InvalidResponse(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn non_json_body_is_invalid() {
        let app = Router::new().route("/api/generate", post(|| async { "plain text" }));
        let gw = OllamaGateway::new(serve(app).await, "test-model");

        let err = gw.complete("hi").await.unwrap_err();
        assert!(matches!(err, GatewayError::InvalidResponse(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn refused_connection_is_connection_failed() {
        // Grab a free port, then close it so nothing is listening.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let gw = OllamaGateway::new(format!("http://{addr}"), "test-model");
        let err = gw.complete("hi").await.unwrap_err();
        assert!(matches!(err, GatewayError::ConnectionFailed(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn slow_endpoint_times_out() {
        let app = Router::new().route(
            "/api/generate",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(json!({"response": "too late"}))
            }),
        );
        let gw = OllamaGateway::new(serve(app).await, "test-model")
            .with_timeout(Duration::from_millis(100));

        let err = gw.complete("hi").await.unwrap_err();
        match err {
            GatewayError::ConnectionFailed(msg) => assert!(msg.contains("timed out"), "{msg}"),
            other => panic!("Expected ConnectionFailed, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn health_check_hits_tags() {
        let app = Router::new().route("/api/tags", get(|| async { Json(json!({"models": []})) }));
        let gw = OllamaGateway::new(serve(app).await, "test-model");
        assert!(gw.health_check().await.unwrap());
    }

    #[tokio::test]
    async fn health_check_reports_unhealthy_status() {
        let app = Router::new().route("/api/tags", get(|| async { StatusCode::SERVICE_UNAVAILABLE }));
        let gw = OllamaGateway::new(serve(app).await, "test-model");
        assert!(!gw.health_check().await.unwrap());
    }
}
