//! Model Provider Strategy Pattern
//!
//! Defines a common interface for hosted model backends so the advisor
//! services work with any of them without code changes.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use agri_core::provider::{GenerationOptions, LlmProvider};
//!
//! let provider = GeminiProvider::from_env()?;
//! let completion = provider.complete(&messages, &GenerationOptions::default()).await?;
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::message::Message;

/// Default hosted model
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Configuration for a single generation request
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Model identifier (e.g., "gemini-2.5-flash")
    pub model: String,

    /// Temperature for sampling (0.0 = deterministic, 1.0 = creative)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Top-p nucleus sampling
    #[serde(default = "default_top_p")]
    pub top_p: f32,

    /// System instruction override; otherwise taken from the messages
    #[serde(default)]
    pub system_prompt: Option<String>,

    /// Let the provider ground its answer with a web search
    #[serde(default)]
    pub web_search: bool,
}

const fn default_temperature() -> f32 {
    0.7
}
const fn default_max_tokens() -> u32 {
    2048
}
const fn default_top_p() -> f32 {
    0.95
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.into(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            top_p: default_top_p(),
            system_prompt: None,
            web_search: false,
        }
    }
}

impl GenerationOptions {
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    #[must_use]
    pub const fn with_web_search(mut self, enabled: bool) -> Self {
        self.web_search = enabled;
        self
    }
}

/// A web page the provider cited while grounding its answer
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingSource {
    pub uri: String,

    #[serde(default)]
    pub title: String,
}

impl GroundingSource {
    pub fn new(uri: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            title: title.into(),
        }
    }

    /// Title for display, falling back to the URI when the title is blank
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            &self.uri
        } else {
            &self.title
        }
    }
}

/// Response from a model completion
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Completion {
    /// The generated text
    pub content: String,

    /// Model that generated this response
    pub model: String,

    /// Token usage statistics (if available)
    pub usage: Option<TokenUsage>,

    /// Finish reason
    pub finish_reason: Option<FinishReason>,

    /// Grounding citations, in the order the provider returned them
    #[serde(default)]
    pub sources: Vec<GroundingSource>,
}

impl Completion {
    /// Plain text completion with no metadata
    pub fn text(content: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            model: model.into(),
            usage: None,
            finish_reason: Some(FinishReason::Stop),
            sources: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_sources(mut self, sources: Vec<GroundingSource>) -> Self {
        self.sources = sources;
        self
    }

    /// Whether generation stopped before the model finished
    pub fn truncated(&self) -> bool {
        self.finish_reason == Some(FinishReason::Length)
    }
}

/// Token usage statistics
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Reason for completion finishing
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    Stop,
    Length,
    ContentFilter,
    Other,
}

/// Provider metadata
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProviderInfo {
    /// Provider name (e.g., "Gemini")
    pub name: String,

    /// Available models
    pub models: Vec<ModelInfo>,

    /// Whether image parts are accepted
    pub supports_vision: bool,

    /// Whether web search grounding is available
    pub supports_web_search: bool,
}

/// Information about a model
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: String,
    pub name: String,
    pub context_length: Option<u32>,
    pub supports_vision: bool,
}

/// Strategy trait for model providers
///
/// Implement this trait to add support for new hosted backends.
/// The advisor services work exclusively through this interface.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get provider information and capabilities
    async fn info(&self) -> Result<ProviderInfo>;

    /// Check if the provider is reachable and configured correctly
    async fn health_check(&self) -> Result<bool>;

    /// Generate a completion from messages
    async fn complete(&self, messages: &[Message], options: &GenerationOptions)
    -> Result<Completion>;

    /// List available models
    async fn list_models(&self) -> Result<Vec<ModelInfo>>;

    /// Estimate token count for text (provider-specific tokenization)
    fn estimate_tokens(&self, text: &str) -> u32 {
        // Default: rough estimate of ~4 chars per token
        u32::try_from(text.len() / 4).unwrap_or(u32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_options_defaults() {
        let opts = GenerationOptions::default();
        assert!((opts.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(opts.max_tokens, 2048);
        assert_eq!(opts.model, DEFAULT_MODEL);
        assert!(!opts.web_search);
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let opts: GenerationOptions = serde_json::from_str(r#"{"model": "gemini-2.5-pro"}"#).unwrap();
        assert_eq!(opts.model, "gemini-2.5-pro");
        assert_eq!(opts.max_tokens, 2048);
        assert!(opts.system_prompt.is_none());
    }

    #[test]
    fn test_source_display_title_falls_back_to_uri() {
        let titled = GroundingSource::new("https://agmarknet.gov.in", "Agmarknet");
        let untitled = GroundingSource::new("https://example.org/prices", " ");
        assert_eq!(titled.display_title(), "Agmarknet");
        assert_eq!(untitled.display_title(), "https://example.org/prices");
    }

    #[test]
    fn test_truncated() {
        let mut completion = Completion::text("partial", DEFAULT_MODEL);
        assert!(!completion.truncated());
        completion.finish_reason = Some(FinishReason::Length);
        assert!(completion.truncated());
    }
}
