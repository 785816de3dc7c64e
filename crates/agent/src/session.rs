//! Multi-session turn serialization.
//!
//! Each conversation sits behind its own async mutex. A turn holds that lock
//! from the user append to the assistant append, so two turns for the same
//! session never interleave, while different sessions proceed independently.

use std::collections::HashMap;
use std::sync::Arc;

use localagent_core::message::{Conversation, ConversationId};
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use crate::orchestrator::{TurnOrchestrator, TurnOutcome};

/// Owns many conversations and runs turns against them.
pub struct SessionManager {
    orchestrator: Arc<TurnOrchestrator>,
    sessions: RwLock<HashMap<ConversationId, Arc<Mutex<Conversation>>>>,
}

impl SessionManager {
    pub fn new(orchestrator: Arc<TurnOrchestrator>) -> Self {
        Self {
            orchestrator,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub fn orchestrator(&self) -> &TurnOrchestrator {
        &self.orchestrator
    }

    /// Start a new, empty session and return its id.
    pub async fn create(&self) -> ConversationId {
        let conversation = Conversation::new();
        let id = conversation.id.clone();
        self.sessions
            .write()
            .await
            .insert(id.clone(), Arc::new(Mutex::new(conversation)));
        debug!(conversation_id = %id, "Session created");
        id
    }

    /// Drop a session. Returns whether it existed.
    pub async fn remove(&self, id: &ConversationId) -> bool {
        self.sessions.write().await.remove(id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Run one turn in session `id`. `None` if the session does not exist.
    ///
    /// Waits for any in-flight turn on the same session to finish first.
    pub async fn run_turn(&self, id: &ConversationId, user_message: &str) -> Option<TurnOutcome> {
        let session = self.sessions.read().await.get(id).cloned()?;
        let mut conversation = session.lock().await;
        Some(self.orchestrator.process(&mut conversation, user_message).await)
    }

    /// A copy of the conversation as it stands between turns.
    pub async fn snapshot(&self, id: &ConversationId) -> Option<Conversation> {
        let session = self.sessions.read().await.get(id).cloned()?;
        let conversation = session.lock().await;
        Some(conversation.clone())
    }
}
