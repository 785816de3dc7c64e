//! Model gateway implementations for LocalAgent.
//!
//! All gateways implement the `localagent_core::ModelGateway` trait.
//! [`build_from_config`] assembles the gateway a session should use.

pub mod ollama;
pub mod retry;

use std::sync::Arc;

use localagent_config::AppConfig;
use localagent_core::ModelGateway;

pub use ollama::OllamaGateway;
pub use retry::RetryingGateway;

/// Build the gateway described by the configuration.
///
/// With `max_retries = 0` the Ollama gateway is returned as-is; otherwise it
/// is wrapped in a [`RetryingGateway`].
pub fn build_from_config(config: &AppConfig) -> Arc<dyn ModelGateway> {
    let ollama = Arc::new(
        OllamaGateway::new(&config.base_url, &config.model)
            .with_timeout(config.request_timeout()),
    );

    if config.max_retries == 0 {
        return ollama;
    }

    Arc::new(
        RetryingGateway::new(ollama)
            .with_max_retries(config.max_retries)
            .with_backoff(config.retry_backoff()),
    )
}
