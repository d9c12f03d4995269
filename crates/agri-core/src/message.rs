//! Conversation Messages
//!
//! Standard message format used across the services, including inline images
//! for the multimodal analysis endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Rough token cost the hosted model charges per inline image
const IMAGE_TOKEN_ESTIMATE: u32 = 258;

/// Role of a message sender
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System instructions
    System,
    /// User input
    User,
    /// Model reply
    Assistant,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::System => write!(f, "system"),
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
        }
    }
}

/// Base64-encoded image sent alongside a prompt
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineImage {
    /// MIME type, e.g. `image/jpeg`
    pub mime_type: String,

    /// Base64 payload without the `data:` header
    pub data: String,
}

impl InlineImage {
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Parse a browser data URL (`data:image/png;base64,iVBOR...`).
    pub fn from_data_url(url: &str) -> Result<Self> {
        let invalid = || CoreError::InvalidInput("Please upload or capture an image first.".into());

        let (header, data) = url.trim().split_once(',').ok_or_else(invalid)?;
        let mime_type = header
            .strip_prefix("data:")
            .and_then(|h| h.strip_suffix(";base64"))
            .ok_or_else(invalid)?;

        if !mime_type.starts_with("image/") || data.is_empty() {
            return Err(invalid());
        }

        Ok(Self::new(mime_type, data))
    }

    /// Approximate decoded size in bytes
    pub fn approx_bytes(&self) -> usize {
        self.data.len() / 4 * 3
    }
}

/// A single message in a conversation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Message {
    /// Message role
    pub role: Role,

    /// Text content
    pub content: String,

    /// Attached images (user messages only)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<InlineImage>,

    /// Timestamp
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Create a new message
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            images: Vec::new(),
            timestamp: Utc::now(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Attach an image
    #[must_use]
    pub fn with_image(mut self, image: InlineImage) -> Self {
        self.images.push(image);
        self
    }

    /// Estimate token count (rough approximation)
    pub fn estimate_tokens(&self) -> u32 {
        // ~4 characters per token, +4 for role overhead
        let text = u32::try_from(self.content.len() / 4).unwrap_or(u32::MAX);
        let images = u32::try_from(self.images.len()).unwrap_or(u32::MAX);
        text.saturating_add(4)
            .saturating_add(images.saturating_mul(IMAGE_TOKEN_ESTIMATE))
    }
}

/// Conversation history with utility methods
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Conversation {
    messages: Vec<Message>,

    /// Maximum context length (in estimated tokens)
    #[serde(default = "default_max_context")]
    max_context_tokens: u32,
}

const fn default_max_context() -> u32 {
    32_768
}

impl Default for Conversation {
    fn default() -> Self {
        Self {
            messages: Vec::new(),
            max_context_tokens: default_max_context(),
        }
    }
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_system_prompt(prompt: impl Into<String>) -> Self {
        let mut conv = Self::new();
        conv.push(Message::system(prompt));
        conv
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// System instruction, if the conversation carries one
    pub fn system_prompt(&self) -> Option<&str> {
        self.messages
            .iter()
            .find(|m| m.role == Role::System)
            .map(|m| m.content.as_str())
    }

    /// Clear all messages except system prompt
    pub fn clear_history(&mut self) {
        self.messages.retain(|m| m.role == Role::System);
    }

    /// Estimate total tokens in conversation
    pub fn estimate_tokens(&self) -> u32 {
        self.messages.iter().map(Message::estimate_tokens).sum()
    }

    /// Truncate to fit within token limit, preserving system and most recent messages
    pub fn truncate_to_fit(&mut self) {
        while self.estimate_tokens() > self.max_context_tokens && self.messages.len() > 2 {
            let Some(pos) = self.messages.iter().position(|m| m.role != Role::System) else {
                break;
            };
            // Never remove the message currently being answered
            if pos >= self.messages.len() - 1 {
                break;
            }
            self.messages.remove(pos);
        }
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_creation() {
        let msg = Message::user("Hello");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.content, "Hello");
        assert!(msg.images.is_empty());
    }

    #[test]
    fn test_conversation() {
        let mut conv = Conversation::with_system_prompt("You are AgriGuru.");
        conv.push(Message::user("When should I sow wheat?"));
        conv.push(Message::assistant("Late October to mid November."));

        assert_eq!(conv.len(), 3);
        assert_eq!(conv.messages()[2].role, Role::Assistant);
        assert_eq!(conv.system_prompt(), Some("You are AgriGuru."));
    }

    #[test]
    fn test_clear_history_keeps_system_prompt() {
        let mut conv = Conversation::with_system_prompt("sys");
        conv.push(Message::user("a"));
        conv.push(Message::assistant("b"));
        conv.clear_history();
        assert_eq!(conv.len(), 1);
        assert_eq!(conv.messages()[0].role, Role::System);
    }

    #[test]
    fn test_truncate_keeps_system_and_latest() {
        let padding = "x".repeat(20_000);
        let mut conv = Conversation::with_system_prompt("sys");
        for i in 0..10 {
            conv.push(Message::user(format!("message number {i} {padding}")));
        }
        conv.truncate_to_fit();

        assert_eq!(conv.messages()[0].role, Role::System);
        assert!(conv.messages().last().unwrap().content.contains("number 9"));
        assert!(conv.estimate_tokens() <= default_max_context());
        assert!(conv.len() < 11);
    }

    #[test]
    fn test_data_url_parsing() {
        let image = InlineImage::from_data_url("data:image/jpeg;base64,/9j/4AAQ").unwrap();
        assert_eq!(image.mime_type, "image/jpeg");
        assert_eq!(image.data, "/9j/4AAQ");
    }

    #[test]
    fn test_data_url_rejects_non_images() {
        assert!(InlineImage::from_data_url("data:text/plain;base64,aGVsbG8=").is_err());
        assert!(InlineImage::from_data_url("data:image/png;base64,").is_err());
        assert!(InlineImage::from_data_url("not a data url").is_err());
        assert!(InlineImage::from_data_url("data:image/png,rawbytes").is_err());
    }

    #[test]
    fn test_image_counts_toward_tokens() {
        let plain = Message::user("look");
        let with_image = Message::user("look").with_image(InlineImage::new("image/png", "AAAA"));
        assert_eq!(
            with_image.estimate_tokens() - plain.estimate_tokens(),
            IMAGE_TOKEN_ESTIMATE
        );
    }
}
