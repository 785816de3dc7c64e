//! The LocalAgent turn loop.
//!
//! One user message goes through a fixed sequence:
//!
//! 1. **Append** the user turn to the conversation
//! 2. **Build** a prompt from the tools and the last K turns
//! 3. **Ask** the model gateway for a completion
//! 4. **Parse** the completion for a `USE_TOOL:<name>:<argument>` directive
//! 5. **Dispatch** the tool if one was requested
//! 6. **Append** the assistant turn and hand it back to the caller
//!
//! At most one tool runs per turn, and every failure along the way ends up
//! as readable assistant content rather than an error.

pub mod directive;
pub mod dispatcher;
pub mod orchestrator;
pub mod prompt;
pub mod session;

pub use directive::{DIRECTIVE_MARKER, Directive, ParsedCompletion, parse_completion};
pub use dispatcher::{DispatchResult, DispatchStatus, Dispatcher};
pub use orchestrator::{TurnOrchestrator, TurnOutcome, TurnPhase};
pub use prompt::{DEFAULT_CONTEXT_WINDOW, PromptBuilder};
pub use session::SessionManager;

#[cfg(test)]
pub(crate) mod test_helpers;
