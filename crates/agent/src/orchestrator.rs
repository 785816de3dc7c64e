//! The turn orchestrator.
//!
//! Drives one user message through
//! `Idle → BuildingPrompt → AwaitingModel → Parsing → (Dispatching) → Done`.
//! The user turn is appended before the model is called, and exactly one
//! assistant turn is appended before returning, whatever happened in
//! between.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use localagent_config::AppConfig;
use localagent_core::event::{DomainEvent, EventBus};
use localagent_core::gateway::ModelGateway;
use localagent_core::message::{Conversation, Turn};
use localagent_core::tool::ToolRegistry;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::directive::{ParsedCompletion, parse_completion};
use crate::dispatcher::{DispatchResult, Dispatcher};
use crate::prompt::PromptBuilder;

/// Where a turn is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TurnPhase {
    Idle,
    BuildingPrompt,
    AwaitingModel,
    Parsing,
    Dispatching,
    Done,
}

/// Everything a caller may want to know about a finished turn.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    /// The assistant turn that was appended
    pub reply: Turn,
    /// Phases visited, in order, always ending in `Done`
    pub path: Vec<TurnPhase>,
    /// Present iff a directive was dispatched
    pub dispatch: Option<DispatchResult>,
}

/// Runs turns against a gateway and a tool registry.
pub struct TurnOrchestrator {
    gateway: Arc<dyn ModelGateway>,
    dispatcher: Dispatcher,
    prompt: PromptBuilder,
    event_bus: Arc<EventBus>,
}

impl TurnOrchestrator {
    pub fn new(
        gateway: Arc<dyn ModelGateway>,
        tools: Arc<ToolRegistry>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            gateway,
            dispatcher: Dispatcher::new(tools),
            prompt: PromptBuilder::default(),
            event_bus,
        }
    }

    /// Build an orchestrator using the configured context window.
    pub fn from_config(
        config: &AppConfig,
        gateway: Arc<dyn ModelGateway>,
        tools: Arc<ToolRegistry>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self::new(gateway, tools, event_bus).with_context_window(config.context_window)
    }

    /// Set how many prior turns each prompt shows.
    pub fn with_context_window(mut self, window: usize) -> Self {
        self.prompt = PromptBuilder::new(window);
        self
    }

    pub fn tools(&self) -> &ToolRegistry {
        self.dispatcher.tools()
    }

    pub fn gateway(&self) -> &dyn ModelGateway {
        self.gateway.as_ref()
    }

    pub fn event_bus(&self) -> &Arc<EventBus> {
        &self.event_bus
    }

    /// Process one user message.
    ///
    /// Never fails: gateway errors, malformed directives, unknown tools and
    /// tool failures all become the content of the returned assistant turn.
    pub async fn process(&self, conversation: &mut Conversation, user_message: &str) -> TurnOutcome {
        let conversation_id = conversation.id.to_string();
        let mut path = vec![TurnPhase::Idle];

        // Idle → BuildingPrompt
        conversation.push(Turn::user(user_message));
        path.push(TurnPhase::BuildingPrompt);
        info!(
            conversation_id = %conversation_id,
            turns = conversation.len(),
            "Processing turn"
        );
        self.event_bus.publish(DomainEvent::TurnStarted {
            conversation_id: conversation_id.clone(),
            content_preview: user_message.chars().take(50).collect(),
            timestamp: Utc::now(),
        });

        // The window ends with the user turn just appended
        let history = conversation.recent(self.prompt.window());
        let prompt = self.prompt.build(user_message, history, self.tools());

        // BuildingPrompt → AwaitingModel
        path.push(TurnPhase::AwaitingModel);
        debug!(conversation_id = %conversation_id, prompt_chars = prompt.len(), "Awaiting model");
        let start = Instant::now();
        let completion = self.gateway.complete(&prompt).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        let mut dispatch = None;
        let reply = match completion {
            Err(e) => {
                warn!(
                    conversation_id = %conversation_id,
                    kind = e.kind(),
                    error = %e,
                    "Gateway failed, ending turn"
                );
                self.event_bus.publish(DomainEvent::GatewayFailed {
                    conversation_id: conversation_id.clone(),
                    kind: e.kind().to_string(),
                    error_message: e.to_string(),
                    timestamp: Utc::now(),
                });
                Turn::assistant(e.to_string())
            }
            Ok(text) => {
                self.event_bus.publish(DomainEvent::ResponseGenerated {
                    conversation_id: conversation_id.clone(),
                    model: self.gateway.model().to_string(),
                    duration_ms,
                    timestamp: Utc::now(),
                });

                // AwaitingModel → Parsing
                path.push(TurnPhase::Parsing);
                match parse_completion(&text) {
                    ParsedCompletion::NoDirective(text) => Turn::assistant(text),
                    ParsedCompletion::Malformed { body, reason } => {
                        warn!(conversation_id = %conversation_id, %reason, "Malformed directive");
                        Turn::assistant(ParsedCompletion::malformed_message(&body, &reason))
                    }
                    ParsedCompletion::Directive(directive) => {
                        // Parsing → Dispatching
                        path.push(TurnPhase::Dispatching);
                        let result = self.dispatcher.dispatch(&directive);
                        self.event_bus.publish(DomainEvent::ToolExecuted {
                            tool_name: result.tool_name.clone(),
                            success: result.ok,
                            duration_ms: result.duration_ms,
                            timestamp: Utc::now(),
                        });
                        let turn = Turn::tool_reply(
                            result.tool_name.clone(),
                            result.argument.clone(),
                            result.output.clone(),
                        );
                        dispatch = Some(result);
                        turn
                    }
                }
            }
        };

        conversation.push(reply.clone());
        path.push(TurnPhase::Done);

        self.event_bus.publish(DomainEvent::TurnCompleted {
            conversation_id: conversation_id.clone(),
            tool_used: reply.tool_used,
            timestamp: Utc::now(),
        });
        debug!(conversation_id = %conversation_id, tool_used = reply.tool_used, "Turn done");

        TurnOutcome {
            reply,
            path,
            dispatch,
        }
    }
}
