//! Scripted Provider
//!
//! Deterministic `LlmProvider` for tests and offline demos. Replays queued
//! replies in order and records every request it receives.

use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::{CoreError, Result};
use crate::message::Message;
use crate::provider::{
    Completion, GenerationOptions, GroundingSource, LlmProvider, ModelInfo, ProviderInfo,
};

/// One queued provider outcome
#[derive(Clone, Debug)]
pub enum ScriptedReply {
    Reply(Completion),
    Unavailable(String),
}

/// A request the provider has seen
#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub messages: Vec<Message>,
    pub options: GenerationOptions,
}

/// Provider that replays a fixed script
#[derive(Default)]
pub struct ScriptedProvider {
    script: Mutex<VecDeque<ScriptedReply>>,
    requests: Mutex<Vec<RecordedRequest>>,
    fallback: Option<String>,
    latency: Option<Duration>,
    unhealthy: bool,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a plain text reply
    #[must_use]
    pub fn reply(self, text: impl Into<String>) -> Self {
        self.push(ScriptedReply::Reply(Completion::text(text, "scripted")))
    }

    /// Queue a reply carrying grounding sources
    #[must_use]
    pub fn grounded_reply(self, text: impl Into<String>, sources: Vec<GroundingSource>) -> Self {
        self.push(ScriptedReply::Reply(
            Completion::text(text, "scripted").with_sources(sources),
        ))
    }

    /// Queue a provider failure
    #[must_use]
    pub fn fail(self, reason: impl Into<String>) -> Self {
        self.push(ScriptedReply::Unavailable(reason.into()))
    }

    /// Reply used once the script is exhausted (otherwise an error)
    #[must_use]
    pub fn with_fallback(mut self, text: impl Into<String>) -> Self {
        self.fallback = Some(text.into());
        self
    }

    /// Delay every completion
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Report unhealthy from `health_check`
    #[must_use]
    pub const fn unhealthy(mut self) -> Self {
        self.unhealthy = true;
        self
    }

    fn push(mut self, reply: ScriptedReply) -> Self {
        self.script.get_mut().push_back(reply);
        self
    }

    /// Requests received so far
    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().await.clone()
    }

    /// Replies still queued
    pub async fn remaining(&self) -> usize {
        self.script.lock().await.len()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    async fn info(&self) -> Result<ProviderInfo> {
        Ok(ProviderInfo {
            name: "Scripted".into(),
            models: self.list_models().await?,
            supports_vision: true,
            supports_web_search: true,
        })
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(!self.unhealthy)
    }

    async fn complete(
        &self,
        messages: &[Message],
        options: &GenerationOptions,
    ) -> Result<Completion> {
        self.requests.lock().await.push(RecordedRequest {
            messages: messages.to_vec(),
            options: options.clone(),
        });

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let next = self.script.lock().await.pop_front();
        match next {
            Some(ScriptedReply::Reply(completion)) => Ok(completion),
            Some(ScriptedReply::Unavailable(reason)) => Err(CoreError::ProviderUnavailable(reason)),
            None => self.fallback.as_ref().map_or_else(
                || Err(CoreError::ProviderUnavailable("script exhausted".into())),
                |text| Ok(Completion::text(text.clone(), "scripted")),
            ),
        }
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>> {
        Ok(vec![ModelInfo {
            id: "scripted".into(),
            name: "Scripted".into(),
            context_length: None,
            supports_vision: true,
        }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replays_in_order_and_records() {
        let provider = ScriptedProvider::new().reply("first").fail("boom").reply("third");
        let messages = [Message::user("hi")];
        let options = GenerationOptions::default();

        assert_eq!(provider.complete(&messages, &options).await.unwrap().content, "first");
        assert!(provider.complete(&messages, &options).await.is_err());
        assert_eq!(provider.complete(&messages, &options).await.unwrap().content, "third");
        assert!(provider.complete(&messages, &options).await.is_err());

        assert_eq!(provider.requests().await.len(), 4);
        assert_eq!(provider.remaining().await, 0);
    }

    #[tokio::test]
    async fn test_fallback_after_script() {
        let provider = ScriptedProvider::new().with_fallback("always");
        let completion = provider
            .complete(&[Message::user("hi")], &GenerationOptions::default())
            .await
            .unwrap();
        assert_eq!(completion.content, "always");
    }

    #[tokio::test]
    async fn test_health() {
        assert!(ScriptedProvider::new().health_check().await.unwrap());
        assert!(!ScriptedProvider::new().unhealthy().health_check().await.unwrap());
    }
}
