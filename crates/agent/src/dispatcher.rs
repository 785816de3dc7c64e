//! Tool dispatch.
//!
//! Resolves a [`Directive`] against the registry and runs the tool. Every
//! outcome, including an unknown name, a tool error, or a panicking handler,
//! comes back as a [`DispatchResult`]; nothing propagates to the caller.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::time::Instant;

use localagent_core::tool::ToolRegistry;
use serde::Serialize;
use tracing::{debug, warn};

use crate::directive::Directive;

/// How a dispatch ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchStatus {
    Ok,
    /// No tool is registered under the requested name
    UnknownTool,
    /// The tool returned an error or panicked
    Failed,
}

/// The outcome of running one directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchResult {
    pub tool_name: String,
    pub argument: String,
    /// Tool output on success, an error description otherwise
    pub output: String,
    pub status: DispatchStatus,
    /// Same as `status == DispatchStatus::Ok`
    pub ok: bool,
    pub duration_ms: u64,
}

/// Runs directives against a shared tool registry.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    tools: Arc<ToolRegistry>,
}

impl Dispatcher {
    pub fn new(tools: Arc<ToolRegistry>) -> Self {
        Self { tools }
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Run `directive`. Never fails.
    pub fn dispatch(&self, directive: &Directive) -> DispatchResult {
        let name = directive.tool_name.as_str();
        let start = Instant::now();

        let (output, status) = match self.tools.get(name) {
            None => {
                warn!(tool = %name, "Unknown tool requested");
                (format!("Unknown tool: {name}"), DispatchStatus::UnknownTool)
            }
            Some(tool) => {
                match catch_unwind(AssertUnwindSafe(|| tool.invoke(&directive.argument))) {
                    Ok(Ok(output)) => (output, DispatchStatus::Ok),
                    Ok(Err(e)) => {
                        warn!(tool = %name, error = %e, "Tool execution failed");
                        (format!("Error executing {name}: {e}"), DispatchStatus::Failed)
                    }
                    Err(payload) => {
                        let detail = panic_message(payload.as_ref());
                        warn!(tool = %name, error = %detail, "Tool panicked");
                        (format!("Error executing {name}: {detail}"), DispatchStatus::Failed)
                    }
                }
            }
        };

        let duration_ms = start.elapsed().as_millis() as u64;
        debug!(tool = %name, ?status, duration_ms, "Dispatched tool");

        DispatchResult {
            tool_name: directive.tool_name.clone(),
            argument: directive.argument.clone(),
            output,
            status,
            ok: status == DispatchStatus::Ok,
            duration_ms,
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "tool panicked".to_string()
    }
}
