//! Chat Session Management
//!
//! Multi-turn chat sessions with conversation history, plus a store keyed by
//! session id.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::message::{Conversation, Message, Role};

/// Unique session identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A chat session with the assistant
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatSession {
    /// Unique identifier
    pub id: SessionId,

    /// Conversation history
    pub conversation: Conversation,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last activity timestamp
    pub updated_at: DateTime<Utc>,

    /// Number of times the history was discarded after a failure
    pub resets: u32,
}

impl ChatSession {
    pub fn new(id: SessionId, system_prompt: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            conversation: Conversation::with_system_prompt(system_prompt),
            created_at: now,
            updated_at: now,
            resets: 0,
        }
    }

    /// Update the activity timestamp
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn push_user(&mut self, text: impl Into<String>) {
        self.conversation.push(Message::user(text));
        self.touch();
    }

    pub fn push_assistant(&mut self, text: impl Into<String>) {
        self.conversation.push(Message::assistant(text));
        self.touch();
    }

    /// Start over with only the system instruction
    pub fn reset(&mut self) {
        self.conversation.clear_history();
        self.resets += 1;
        self.touch();
    }

    /// Messages exchanged, excluding the system instruction
    pub fn turn_count(&self) -> usize {
        self.conversation
            .messages()
            .iter()
            .filter(|m| m.role != Role::System)
            .count()
    }
}

/// Session store trait for persistence
pub trait SessionStore: Send + Sync {
    /// Save a session
    fn save(&self, session: &ChatSession) -> crate::Result<()>;

    /// Load a session by ID
    fn load(&self, id: &SessionId) -> crate::Result<Option<ChatSession>>;

    /// Delete a session
    fn delete(&self, id: &SessionId) -> crate::Result<()>;
}

/// Sessions kept by a default [`MemorySessionStore`]
pub const DEFAULT_MAX_SESSIONS: usize = 1_000;

/// In-memory session store
///
/// Holds at most `capacity` sessions. Saving a new session into a full store
/// evicts the one with the oldest `updated_at`.
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<SessionId, ChatSession>>,
    capacity: usize,
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_MAX_SESSIONS)
    }
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store bounded to `capacity` sessions (at least one)
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.sessions.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionStore for MemorySessionStore {
    fn save(&self, session: &ChatSession) -> crate::Result<()> {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        while !sessions.contains_key(&session.id) && sessions.len() >= self.capacity {
            let Some(stale) = sessions
                .values()
                .min_by_key(|s| s.updated_at)
                .map(|s| s.id.clone())
            else {
                break;
            };
            tracing::debug!(session = %stale, "Evicting least recently active session");
            sessions.remove(&stale);
        }
        sessions.insert(session.id.clone(), session.clone());
        Ok(())
    }

    fn load(&self, id: &SessionId) -> crate::Result<Option<ChatSession>> {
        let sessions = self.sessions.read().unwrap_or_else(PoisonError::into_inner);
        Ok(sessions.get(id).cloned())
    }

    fn delete(&self, id: &SessionId) -> crate::Result<()> {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        sessions.remove(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_creation() {
        let session = ChatSession::new(SessionId::new(), "You are AgriGuru.");
        assert_eq!(session.turn_count(), 0);
        assert_eq!(session.conversation.system_prompt(), Some("You are AgriGuru."));
    }

    #[test]
    fn test_reset_keeps_system_prompt() {
        let mut session = ChatSession::new(SessionId::new(), "sys");
        session.push_user("Which fertilizer for paddy?");
        session.push_assistant("Urea in split doses.");
        assert_eq!(session.turn_count(), 2);

        session.reset();
        assert_eq!(session.turn_count(), 0);
        assert_eq!(session.resets, 1);
        assert_eq!(session.conversation.system_prompt(), Some("sys"));
    }

    #[test]
    fn test_memory_store() {
        let store = MemorySessionStore::new();
        let session = ChatSession::new(SessionId::new(), "sys");
        let id = session.id.clone();

        store.save(&session).unwrap();
        assert_eq!(store.len(), 1);

        let loaded = store.load(&id).unwrap();
        assert_eq!(loaded.unwrap().id, id);

        store.delete(&id).unwrap();
        assert!(store.load(&id).unwrap().is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_evicts_least_recently_active() {
        let store = MemorySessionStore::with_capacity(3);
        let start = Utc::now();
        for i in 0..5 {
            let mut session = ChatSession::new(SessionId::from_string(format!("s{i}")), "sys");
            session.updated_at = start + chrono::Duration::seconds(i);
            store.save(&session).unwrap();
            assert!(store.len() <= 3);
        }

        assert_eq!(store.len(), 3);
        assert!(store.load(&SessionId::from_string("s0")).unwrap().is_none());
        assert!(store.load(&SessionId::from_string("s1")).unwrap().is_none());
        assert!(store.load(&SessionId::from_string("s4")).unwrap().is_some());
    }

    #[test]
    fn test_resave_in_full_store_keeps_everyone() {
        let store = MemorySessionStore::with_capacity(2);
        let mut first = ChatSession::new(SessionId::from_string("first"), "sys");
        let second = ChatSession::new(SessionId::from_string("second"), "sys");
        store.save(&first).unwrap();
        store.save(&second).unwrap();

        first.push_user("Is it too late to sow mustard?");
        store.save(&first).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.load(&first.id).unwrap().unwrap().turn_count(), 1);
        assert!(store.load(&second.id).unwrap().is_some());
    }
}
