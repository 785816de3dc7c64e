//! # LocalAgent Core
//!
//! Domain types, traits, and error definitions for the LocalAgent chat loop.
//! This crate has no HTTP or UI dependencies; it defines the model that the
//! provider, tool, and agent crates implement against.
//!
//! - [`message`]: turns and the append-only conversation log
//! - [`tool`]: the tool trait and the ordered tool registry
//! - [`gateway`]: the model completion boundary
//! - [`event`]: domain events published while a turn runs

pub mod error;
pub mod event;
pub mod gateway;
pub mod message;
pub mod tool;

// Re-export key types at crate root for ergonomics
pub use error::{Error, GatewayError, Result, ToolError};
pub use event::{DomainEvent, EventBus};
pub use gateway::ModelGateway;
pub use message::{Conversation, ConversationId, Role, Turn};
pub use tool::{Tool, ToolRegistry};
