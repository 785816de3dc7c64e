//! Gateway retry with exponential backoff.
//!
//! Wraps another gateway. Transient failures (connection problems, 5xx,
//! 408, 429) are retried up to `max_retries` extra times; anything else is
//! returned immediately. The last error is what the caller sees.

use async_trait::async_trait;
use localagent_core::error::GatewayError;
use localagent_core::gateway::{GatewayResult, ModelGateway};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// A gateway that retries its inner gateway on transient failure.
pub struct RetryingGateway {
    name: String,
    inner: Arc<dyn ModelGateway>,
    max_retries: u32,
    backoff: Duration,
    max_backoff: Duration,
}

impl RetryingGateway {
    /// Wrap `inner` with no retries configured yet.
    pub fn new(inner: Arc<dyn ModelGateway>) -> Self {
        Self {
            name: format!("retry({})", inner.name()),
            inner,
            max_retries: 0,
            backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(8),
        }
    }

    /// Set how many extra attempts follow a transient failure.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the initial backoff; it doubles after every failed attempt.
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    /// Cap the backoff between two attempts.
    pub fn with_max_backoff(mut self, max_backoff: Duration) -> Self {
        self.max_backoff = max_backoff;
        self
    }

    fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.backoff.saturating_mul(factor).min(self.max_backoff)
    }
}

#[async_trait]
impl ModelGateway for RetryingGateway {
    fn name(&self) -> &str {
        &self.name
    }

    fn model(&self) -> &str {
        self.inner.model()
    }

    async fn complete(&self, prompt: &str) -> GatewayResult {
        let mut attempt = 0u32;

        loop {
            match self.inner.complete(prompt).await {
                Ok(text) => return Ok(text),
                Err(e) if e.is_transient() && attempt < self.max_retries => {
                    attempt += 1;
                    let delay = self.delay_for(attempt);
                    warn!(
                        gateway = %self.inner.name(),
                        error = %e,
                        attempt,
                        max_retries = self.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        "Retry: transient gateway failure, backing off"
                    );
                    tokio::time::sleep(delay).await;
                    info!(gateway = %self.inner.name(), attempt, "Retry: trying again");
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn health_check(&self) -> Result<bool, GatewayError> {
        self.inner.health_check().await
    }
}
