//! Tool trait — the abstraction over agent capabilities.
//!
//! A tool is a named, synchronous text-to-text capability. The model can
//! only reach a tool through a `USE_TOOL:<name>:<argument>` directive, so a
//! tool's contract is exactly one string in and one string out.

use crate::error::ToolError;

/// The core Tool trait.
///
/// Each built-in tool (greeting, weather, web search, code echo) implements
/// this trait. Tools are registered in the [`ToolRegistry`] once, at startup.
pub trait Tool: Send + Sync {
    /// The unique name of this tool (e.g., "say_hello").
    fn name(&self) -> &str;

    /// What this tool does (sent to the model).
    fn description(&self) -> &str;

    /// What the single argument means, as shown to the model in the
    /// directive examples (e.g., "location").
    fn argument_hint(&self) -> &str;

    /// Short phrase completing "For ..., use:" in the prompt instructions.
    fn purpose(&self) -> &str;

    /// Glyph shown next to the tool by the presentation layer.
    fn icon(&self) -> &str {
        "🔧"
    }

    /// Run the tool.
    fn invoke(&self, argument: &str) -> Result<String, ToolError>;
}

/// An ordered registry of available tools.
///
/// Iteration order is registration order, so anything rendered from
/// [`ToolRegistry::list`] is reproducible run to run.
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// Register a tool. Replaces any existing tool with the same name,
    /// keeping its original position.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        match self.tools.iter().position(|t| t.name() == tool.name()) {
            Some(idx) => self.tools[idx] = tool,
            None => self.tools.push(tool),
        }
    }

    /// Builder-style [`ToolRegistry::register`].
    pub fn with(mut self, tool: Box<dyn Tool>) -> Self {
        self.register(tool);
        self
    }

    /// Get a tool by name.
    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools
            .iter()
            .find(|t| t.name() == name)
            .map(|t| t.as_ref())
    }

    /// All tools in registration order.
    pub fn list(&self) -> &[Box<dyn Tool>] {
        &self.tools
    }

    /// List all registered tool names.
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.names())
            .finish()
    }
}
