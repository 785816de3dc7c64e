//! Prompt construction.
//!
//! The whole exchange with the model is a single text prompt: the tool
//! catalogue, a bounded window of prior turns, the new request, and the
//! instructions for the directive syntax. Only the last `window` turns are
//! shown so the prompt size stays flat no matter how long a session runs.

use localagent_core::message::Turn;
use localagent_core::tool::ToolRegistry;
use std::fmt::Write;

use crate::directive::DIRECTIVE_MARKER;

/// Turns of history shown to the model when nothing else is configured.
pub const DEFAULT_CONTEXT_WINDOW: usize = 6;

/// Renders prompts. Pure: the same inputs always give the same prompt.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    window: usize,
}

impl PromptBuilder {
    pub fn new(window: usize) -> Self {
        Self { window }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Build the prompt for `user_message`.
    ///
    /// Only the last `window` turns of `history` are rendered. Callers pass
    /// the conversation with the current user turn already appended, so it
    /// is the final history line. The user message is also repeated in full
    /// as the current request, whatever the window size.
    pub fn build(&self, user_message: &str, history: &[Turn], tools: &ToolRegistry) -> String {
        let start = history.len().saturating_sub(self.window);
        let window = &history[start..];

        let mut prompt = String::from(
            "You are a helpful AI assistant with access to the following tools:\n\n",
        );

        for tool in tools.list() {
            let _ = writeln!(prompt, "- {}: {}", tool.name(), tool.description());
        }

        prompt.push_str("\nPrevious conversation:\n");
        for turn in window {
            let _ = writeln!(prompt, "{}: {}", turn.role.label(), turn.content);
        }

        let _ = write!(prompt, "\nCurrent user request: {user_message}\n\n");

        prompt.push_str("Instructions:\n");
        let _ = writeln!(
            prompt,
            "- If the user request can be handled with a tool, respond EXACTLY with: {DIRECTIVE_MARKER}tool_name:parameters"
        );
        for tool in tools.list() {
            let _ = writeln!(
                prompt,
                "- For {}, use: {DIRECTIVE_MARKER}{}:{}",
                tool.purpose(),
                tool.name(),
                tool.argument_hint()
            );
        }
        prompt.push_str("- Otherwise, respond conversationally as a helpful assistant\n");
        prompt.push_str("- Be concise but friendly\n\n");
        prompt.push_str("Response:");

        prompt
    }
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_CONTEXT_WINDOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use localagent_core::message::Conversation;
    use localagent_tools::default_registry;

    fn history(n: usize) -> Conversation {
        let mut conv = Conversation::new();
        for i in 0..n {
            if i % 2 == 0 {
                conv.push(Turn::user(format!("question {i}")));
            } else {
                conv.push(Turn::assistant(format!("answer {i}")));
            }
        }
        conv
    }

    #[test]
    fn lists_every_tool_in_registry_order() {
        let prompt = PromptBuilder::default().build("hi", &[], &default_registry());

        let hello = prompt.find("- say_hello: Greets someone by name").unwrap();
        let weather = prompt.find("- get_weather: Gets weather information for a location").unwrap();
        let search = prompt.find("- search_web: Searches the web for information").unwrap();
        let code = prompt.find("- run_code: Executes Python code").unwrap();
        assert!(hello < weather && weather < search && search < code);
    }

    #[test]
    fn per_tool_directive_examples() {
        let prompt = PromptBuilder::default().build("hi", &[], &default_registry());
        assert!(prompt.contains("respond EXACTLY with: USE_TOOL:tool_name:parameters"));
        assert!(prompt.contains("- For greetings, use: USE_TOOL:say_hello:name"));
        assert!(prompt.contains("- For weather, use: USE_TOOL:get_weather:location"));
        assert!(prompt.contains("- For web search, use: USE_TOOL:search_web:query"));
        assert!(prompt.contains("- For code execution, use: USE_TOOL:run_code:code"));
        assert!(prompt.contains("respond conversationally"));
        assert!(prompt.trim_end().ends_with("Response:"));
    }

    #[test]
    fn only_last_k_turns_in_original_order() {
        let conv = history(10);
        let prompt = PromptBuilder::new(6).build("next", conv.turns(), &default_registry());

        for i in 0..4 {
            assert!(!prompt.contains(&format!("question {i}\n")), "turn {i} should be outside the window");
            assert!(!prompt.contains(&format!("answer {i}\n")), "turn {i} should be outside the window");
        }

        let positions: Vec<usize> = (4..10)
            .map(|i| {
                let line = if i % 2 == 0 {
                    format!("User: question {i}\n")
                } else {
                    format!("Assistant: answer {i}\n")
                };
                prompt.find(&line).unwrap_or_else(|| panic!("missing turn {i}"))
            })
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn window_of_one() {
        let conv = history(4);
        let prompt = PromptBuilder::new(1).build("next", conv.turns(), &default_registry());
        assert!(prompt.contains("Assistant: answer 3\n"));
        assert!(!prompt.contains("question 2"));
    }

    #[test]
    fn user_message_is_never_truncated() {
        let long = "x".repeat(10_000);
        let conv = history(20);
        let prompt = PromptBuilder::new(2).build(&long, conv.turns(), &default_registry());
        assert!(prompt.contains(&format!("Current user request: {long}\n")));
    }

    #[test]
    fn build_is_pure() {
        let conv = history(7);
        let registry = default_registry();
        let builder = PromptBuilder::default();
        assert_eq!(
            builder.build("same", conv.turns(), &registry),
            builder.build("same", conv.turns(), &registry)
        );
    }

    #[test]
    fn empty_history_renders_empty_section() {
        let prompt = PromptBuilder::default().build("hello", &[], &default_registry());
        assert!(prompt.contains("Previous conversation:\n\nCurrent user request: hello"));
    }
}
