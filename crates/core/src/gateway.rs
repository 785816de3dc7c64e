//! ModelGateway trait — the boundary to the language model.
//!
//! A gateway takes one fully rendered prompt and returns the model's raw
//! completion text. It never interprets the text (directive parsing happens
//! in the agent crate) and never lets a failure escape as anything other
//! than a [`GatewayError`] value.
//!
//! Implementations: Ollama `/api/generate`, a retrying wrapper, and scripted
//! mocks in tests.

use async_trait::async_trait;
use crate::error::GatewayError;

/// Outcome of a single completion request.
pub type GatewayResult = std::result::Result<String, GatewayError>;

#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// A human-readable name for this gateway (e.g., "ollama").
    fn name(&self) -> &str;

    /// The model identifier requests are sent with.
    fn model(&self) -> &str;

    /// Send a prompt and get the raw completion text back.
    async fn complete(&self, prompt: &str) -> GatewayResult;

    /// Whether the endpoint is reachable and answering.
    async fn health_check(&self) -> std::result::Result<bool, GatewayError> {
        Ok(true)
    }
}
