//! Turn and Conversation domain types.
//!
//! A conversation is the append-only log of turns for one chat session:
//! user sends a message → a User turn is appended → the agent answers →
//! an Assistant turn (possibly carrying tool metadata) is appended.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use uuid::Uuid;

use crate::error::Result;

/// Unique identifier for a conversation (session).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversationId(pub String);

impl ConversationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for ConversationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ConversationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who authored a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Label used when rendering history into a prompt.
    pub fn label(&self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Assistant => "Assistant",
        }
    }
}

/// A single role-tagged message in a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    /// Unique turn ID
    pub id: String,

    /// Who produced this turn
    pub role: Role,

    /// The text content (tool output for tool turns)
    pub content: String,

    /// Whether this assistant turn is the result of a tool dispatch
    #[serde(default)]
    pub tool_used: bool,

    /// The dispatched tool name (set iff `tool_used`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,

    /// The argument the tool was invoked with (set iff `tool_used`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_input: Option<String>,

    /// Timestamp
    pub timestamp: DateTime<Utc>,
}

impl Turn {
    fn with_role(role: Role, content: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            content,
            tool_used: false,
            tool_name: None,
            tool_input: None,
            timestamp: Utc::now(),
        }
    }

    /// Create a user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self::with_role(Role::User, content.into())
    }

    /// Create a plain assistant turn (a reply or a rendered error).
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::with_role(Role::Assistant, content.into())
    }

    /// Create an assistant turn carrying the outcome of a tool dispatch.
    pub fn tool_reply(
        tool_name: impl Into<String>,
        tool_input: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let mut turn = Self::with_role(Role::Assistant, content.into());
        turn.tool_used = true;
        turn.tool_name = Some(tool_name.into());
        turn.tool_input = Some(tool_input.into());
        turn
    }
}

/// An ordered, append-only sequence of turns owned by one session.
///
/// There is intentionally no way to remove or edit a turn: windowing for
/// prompt construction goes through [`Conversation::recent`], which is a
/// read-only view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    /// Unique conversation ID
    pub id: ConversationId,

    turns: Vec<Turn>,

    /// When this conversation was created
    pub created_at: DateTime<Utc>,

    /// When the last turn was appended
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    /// Create a new empty conversation.
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: ConversationId::new(),
            turns: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Append a turn.
    pub fn push(&mut self, turn: Turn) {
        self.updated_at = Utc::now();
        self.turns.push(turn);
    }

    /// All turns in insertion order.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// The last `k` turns in original order (all of them if fewer exist).
    pub fn recent(&self, k: usize) -> &[Turn] {
        let start = self.turns.len().saturating_sub(k);
        &self.turns[start..]
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Count of tool-backed turns grouped by tool name, sorted by name.
    pub fn tool_usage(&self) -> BTreeMap<String, usize> {
        let mut usage = BTreeMap::new();
        for turn in self.turns.iter().filter(|t| t.tool_used) {
            let name = turn.tool_name.clone().unwrap_or_else(|| "unknown".into());
            *usage.entry(name).or_insert(0) += 1;
        }
        usage
    }

    /// Write the conversation to `path` as pretty-printed JSON.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Read a conversation written by [`Conversation::save_json`].
    pub fn load_json(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}
