//! Built-in tool implementations for LocalAgent.
//!
//! The tool set is closed: [`BuiltinTool`] enumerates every tool the model
//! can name. The handlers are deterministic stand-ins (no network access, no
//! code execution) so a chat session works end to end against any model.

pub mod get_weather;
pub mod run_code;
pub mod say_hello;
pub mod search_web;

use localagent_core::error::ToolError;
use localagent_core::tool::{Tool, ToolRegistry};
use serde::{Deserialize, Serialize};

/// Every tool the agent ships with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuiltinTool {
    SayHello,
    GetWeather,
    SearchWeb,
    RunCode,
}

impl BuiltinTool {
    /// All built-in tools, in prompt order.
    pub const ALL: [BuiltinTool; 4] = [
        BuiltinTool::SayHello,
        BuiltinTool::GetWeather,
        BuiltinTool::SearchWeb,
        BuiltinTool::RunCode,
    ];

    /// Resolve a tool by its directive name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }
}

impl Tool for BuiltinTool {
    fn name(&self) -> &str {
        match self {
            Self::SayHello => "say_hello",
            Self::GetWeather => "get_weather",
            Self::SearchWeb => "search_web",
            Self::RunCode => "run_code",
        }
    }

    fn description(&self) -> &str {
        match self {
            Self::SayHello => "Greets someone by name",
            Self::GetWeather => "Gets weather information for a location",
            Self::SearchWeb => "Searches the web for information",
            Self::RunCode => "Executes Python code",
        }
    }

    fn argument_hint(&self) -> &str {
        match self {
            Self::SayHello => "name",
            Self::GetWeather => "location",
            Self::SearchWeb => "query",
            Self::RunCode => "code",
        }
    }

    fn purpose(&self) -> &str {
        match self {
            Self::SayHello => "greetings",
            Self::GetWeather => "weather",
            Self::SearchWeb => "web search",
            Self::RunCode => "code execution",
        }
    }

    fn icon(&self) -> &str {
        match self {
            Self::SayHello => "👋",
            Self::GetWeather => "🌤️",
            Self::SearchWeb => "🔍",
            Self::RunCode => "💻",
        }
    }

    fn invoke(&self, argument: &str) -> Result<String, ToolError> {
        let argument = require_argument(self.argument_hint(), argument)?;
        match self {
            Self::SayHello => Ok(say_hello::greet(argument)),
            Self::GetWeather => Ok(get_weather::report(argument)),
            Self::SearchWeb => Ok(search_web::search(argument)),
            Self::RunCode => Ok(run_code::simulate(argument)),
        }
    }
}

fn require_argument<'a>(hint: &str, argument: &'a str) -> Result<&'a str, ToolError> {
    let trimmed = argument.trim();
    if trimmed.is_empty() {
        return Err(ToolError::InvalidArguments(format!("{hint} must not be empty")));
    }
    Ok(trimmed)
}

/// Create the tool registry with every built-in tool, in [`BuiltinTool::ALL`] order.
pub fn default_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    for tool in BuiltinTool::ALL {
        registry.register(Box::new(tool));
    }
    registry
}
