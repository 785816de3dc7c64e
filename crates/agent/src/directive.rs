//! Directive parsing.
//!
//! A completion is either a free-form reply or a request to run a tool,
//! written as `USE_TOOL:<name>:<argument>` somewhere in the text. This
//! module turns raw completion text into a [`ParsedCompletion`]; nothing
//! else in the turn flow looks for the marker.

use serde::{Deserialize, Serialize};

/// The literal that introduces a tool directive.
pub const DIRECTIVE_MARKER: &str = "USE_TOOL:";

/// A well-formed tool request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directive {
    pub tool_name: String,
    pub argument: String,
}

impl Directive {
    pub fn new(tool_name: impl Into<String>, argument: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            argument: argument.into(),
        }
    }
}

/// What a completion turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedCompletion {
    /// No marker present; the whole completion is the reply.
    NoDirective(String),

    /// The marker is present but the body after it is not `name:argument`.
    Malformed { body: String, reason: String },

    /// A tool call.
    Directive(Directive),
}

impl ParsedCompletion {
    /// Text shown to the user when the directive could not be parsed.
    pub fn malformed_message(body: &str, reason: &str) -> String {
        format!("Error parsing tool call: {reason} (got '{}')", body.trim())
    }
}

/// Parse a raw completion.
///
/// Only the first marker counts. Text before it is discarded. The body is
/// split on the first `:` only, so an argument keeps any colons it contains
/// (`USE_TOOL:run_code:print("a:b")` passes `print("a:b")`).
pub fn parse_completion(text: &str) -> ParsedCompletion {
    let Some(idx) = text.find(DIRECTIVE_MARKER) else {
        return ParsedCompletion::NoDirective(text.to_string());
    };

    let body = &text[idx + DIRECTIVE_MARKER.len()..];

    let Some((name, argument)) = body.split_once(':') else {
        return ParsedCompletion::Malformed {
            body: body.to_string(),
            reason: "missing ':' between tool name and argument".into(),
        };
    };

    let tool_name = name.trim();
    if tool_name.is_empty() {
        return ParsedCompletion::Malformed {
            body: body.to_string(),
            reason: "missing tool name".into(),
        };
    }

    ParsedCompletion::Directive(Directive::new(tool_name, argument.trim()))
}
