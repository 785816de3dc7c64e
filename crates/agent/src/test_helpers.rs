//! Shared test helpers for agent tests.

use async_trait::async_trait;
use localagent_core::error::GatewayError;
use localagent_core::gateway::{GatewayResult, ModelGateway};
use std::collections::VecDeque;
use std::sync::Mutex;

/// A mock gateway that returns a sequence of scripted results.
///
/// Each call to `complete` pops the next result and records the prompt it
/// was given. Panics if more calls are made than results provided.
pub struct ScriptedGateway {
    results: Mutex<VecDeque<GatewayResult>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGateway {
    pub fn new(results: Vec<GatewayResult>) -> Self {
        Self {
            results: Mutex::new(results.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Successful completions, in order.
    pub fn replies(texts: &[&str]) -> Self {
        Self::new(texts.iter().map(|t| Ok(t.to_string())).collect())
    }

    /// A gateway whose only call fails with `error`.
    pub fn failing(error: GatewayError) -> Self {
        Self::new(vec![Err(error)])
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl ModelGateway for ScriptedGateway {
    fn name(&self) -> &str {
        "scripted"
    }

    fn model(&self) -> &str {
        "scripted-model"
    }

    async fn complete(&self, prompt: &str) -> GatewayResult {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let mut results = self.results.lock().unwrap();
        match results.pop_front() {
            Some(result) => result,
            None => panic!(
                "ScriptedGateway: no more results (call #{})",
                self.prompts.lock().unwrap().len()
            ),
        }
    }
}
