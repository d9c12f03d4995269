//! Chat Assistant
//!
//! Multi-turn chat with the AgriGuru persona. History lives in a
//! `SessionStore` keyed by conversation id.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex as TurnLock;

use agri_core::{
    ChatSession, GenerationOptions, LlmProvider, MemorySessionStore, SessionId, SessionStore,
};

use crate::AGRIGURU_PROMPT;
use crate::error::{AdvisorError, Result};

/// Reply when the model answers with nothing
pub const CHAT_EMPTY_REPLY: &str =
    "I'm not sure how to respond to that. Could you ask in another way?";

/// Reply when the model call fails; the conversation starts over afterwards
pub const CHAT_TROUBLE_REPLY: &str = "I'm having a little trouble thinking right now. \
Please try asking your question again in a moment.";

/// One assistant turn
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatReply {
    pub message: String,
    pub conversation_id: SessionId,
}

pub struct ChatAssistant {
    provider: Arc<dyn LlmProvider>,
    sessions: Arc<dyn SessionStore>,
    options: GenerationOptions,
    /// One lock per conversation with a turn in flight
    turns: Mutex<HashMap<SessionId, Arc<TurnLock<()>>>>,
}

impl ChatAssistant {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self::with_store(provider, Arc::new(MemorySessionStore::new()))
    }

    pub fn with_store(provider: Arc<dyn LlmProvider>, sessions: Arc<dyn SessionStore>) -> Self {
        Self {
            provider,
            sessions,
            options: GenerationOptions::default(),
            turns: Mutex::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.options = self.options.with_model(model);
        self
    }

    /// Lock serializing turns on one conversation
    ///
    /// Entries nobody else holds are dropped on the way, so the map only
    /// tracks conversations with a turn in flight.
    fn turn_lock(&self, id: &SessionId) -> Arc<TurnLock<()>> {
        let mut turns = self.turns.lock().unwrap_or_else(PoisonError::into_inner);
        turns.retain(|_, lock| Arc::strong_count(lock) > 1);
        turns.entry(id.clone()).or_default().clone()
    }

    fn open_session(&self, id: SessionId) -> Result<ChatSession> {
        Ok(self
            .sessions
            .load(&id)?
            .unwrap_or_else(|| ChatSession::new(id, AGRIGURU_PROMPT)))
    }

    /// Send one user message and get the assistant's answer
    ///
    /// Unknown or missing ids start a new conversation. Model failures never
    /// surface as errors: the session is reset and a fixed apology returned.
    /// Turns on the same conversation run one at a time.
    pub async fn reply(&self, id: Option<SessionId>, text: &str) -> Result<ChatReply> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AdvisorError::InvalidInput("Message cannot be empty.".into()));
        }

        let id = id.unwrap_or_default();
        let lock = self.turn_lock(&id);
        let _turn = lock.lock().await;

        let mut session = self.open_session(id)?;
        session.push_user(text);
        session.conversation.truncate_to_fit();

        tracing::debug!(conversation = %session.id, turns = session.turn_count(), "Sending chat turn");

        let message = match self
            .provider
            .complete(session.conversation.messages(), &self.options)
            .await
        {
            Ok(completion) if completion.content.trim().is_empty() => {
                session.push_assistant(CHAT_EMPTY_REPLY);
                CHAT_EMPTY_REPLY.to_string()
            }
            Ok(completion) => {
                session.push_assistant(completion.content.clone());
                completion.content
            }
            Err(e) => {
                tracing::warn!(conversation = %session.id, "Chat failed, resetting session: {}", e);
                session.reset();
                CHAT_TROUBLE_REPLY.to_string()
            }
        };

        self.sessions.save(&session)?;

        Ok(ChatReply {
            message,
            conversation_id: session.id,
        })
    }

    /// Forget a conversation, after any turn still running on it
    pub async fn end(&self, id: &SessionId) -> Result<()> {
        let lock = self.turn_lock(id);
        let _turn = lock.lock().await;
        self.sessions.delete(id)?;
        tracing::debug!(conversation = %id, "Chat ended");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use agri_core::{Role, ScriptedProvider};

    #[tokio::test]
    async fn test_new_conversation_uses_persona() {
        let provider = Arc::new(ScriptedProvider::new().reply("Sow wheat in **November**."));
        let assistant = ChatAssistant::new(provider.clone());

        let reply = assistant.reply(None, "When to sow wheat?").await.unwrap();
        assert_eq!(reply.message, "Sow wheat in **November**.");

        let requests = provider.requests().await;
        let sent = &requests[0].messages;
        assert_eq!(sent[0].role, Role::System);
        assert_eq!(sent[0].content, AGRIGURU_PROMPT);
        assert_eq!(sent[1].content, "When to sow wheat?");
    }

    #[tokio::test]
    async fn test_history_carries_over() {
        let provider = Arc::new(ScriptedProvider::new().reply("Use neem oil.").reply("Every 7 days."));
        let assistant = ChatAssistant::new(provider.clone());

        let first = assistant.reply(None, "Aphids on okra?").await.unwrap();
        let second = assistant
            .reply(Some(first.conversation_id.clone()), "How often?")
            .await
            .unwrap();
        assert_eq!(second.conversation_id, first.conversation_id);

        let requests = provider.requests().await;
        let contents: Vec<_> = requests[1].messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents[1..], ["Aphids on okra?", "Use neem oil.", "How often?"]);
    }

    #[tokio::test]
    async fn test_empty_reply() {
        let provider = Arc::new(ScriptedProvider::new().reply(""));
        let assistant = ChatAssistant::new(provider);

        let reply = assistant.reply(None, "hello").await.unwrap();
        assert_eq!(reply.message, CHAT_EMPTY_REPLY);
    }

    #[tokio::test]
    async fn test_failure_resets_history() {
        let provider = Arc::new(
            ScriptedProvider::new()
                .reply("Paddy needs standing water.")
                .fail("503")
                .reply("Hello again."),
        );
        let store = Arc::new(MemorySessionStore::new());
        let assistant = ChatAssistant::with_store(provider.clone(), store.clone());

        let first = assistant.reply(None, "Paddy water?").await.unwrap();
        let id = first.conversation_id;

        let failed = assistant.reply(Some(id.clone()), "And wheat?").await.unwrap();
        assert_eq!(failed.message, CHAT_TROUBLE_REPLY);

        let session = store.load(&id).unwrap().unwrap();
        assert_eq!(session.resets, 1);
        assert_eq!(session.turn_count(), 0);

        assistant.reply(Some(id), "hi").await.unwrap();
        let requests = provider.requests().await;
        assert_eq!(requests[2].messages.len(), 2);
    }

    #[tokio::test]
    async fn test_blank_message_rejected() {
        let provider = Arc::new(ScriptedProvider::new());
        let assistant = ChatAssistant::new(provider.clone());

        assert!(assistant.reply(None, " \n ").await.is_err());
        assert!(provider.requests().await.is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_turns_keep_both_exchanges() {
        let provider = Arc::new(
            ScriptedProvider::new()
                .reply("Hello, farmer.")
                .reply("Mulch the beds.")
                .reply("Water at dawn.")
                .with_latency(Duration::from_millis(50)),
        );
        let store = Arc::new(MemorySessionStore::new());
        let assistant = ChatAssistant::with_store(provider.clone(), store.clone());

        let first = assistant.reply(None, "hi").await.unwrap();
        let id = first.conversation_id;

        let (a, b) = tokio::join!(
            assistant.reply(Some(id.clone()), "Keep soil moist?"),
            assistant.reply(Some(id.clone()), "When to irrigate?"),
        );
        a.unwrap();
        b.unwrap();

        let session = store.load(&id).unwrap().unwrap();
        assert_eq!(session.turn_count(), 6);

        // The later turn saw the earlier one's exchange
        let requests = provider.requests().await;
        assert_eq!(requests[2].messages.len(), 6);
        assert!(assistant.turns.lock().unwrap().len() <= 1);
    }

    #[tokio::test]
    async fn test_end_forgets_conversation() {
        let provider = Arc::new(ScriptedProvider::new().reply("Yes.").reply("Fresh start."));
        let store = Arc::new(MemorySessionStore::new());
        let assistant = ChatAssistant::with_store(provider.clone(), store.clone());

        let first = assistant.reply(None, "Is jowar drought tolerant?").await.unwrap();
        assistant.end(&first.conversation_id).await.unwrap();
        assert!(store.is_empty());

        assistant.reply(Some(first.conversation_id), "hello").await.unwrap();
        let requests = provider.requests().await;
        assert_eq!(requests[1].messages.len(), 2);
    }
}
