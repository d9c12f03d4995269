//! Error Types

use thiserror::Error;

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error types
#[derive(Error, Debug)]
pub enum CoreError {
    /// Model provider returned an error
    #[error("Provider error: {0}")]
    Provider(String),

    /// Provider unreachable or overloaded
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Provider answered but produced no usable text
    #[error("Empty response from provider")]
    EmptyResponse,

    /// Caller supplied unusable input (blank message, bad image data, ...)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Context length exceeded
    #[error("Context length exceeded: {used} tokens (max: {max})")]
    ContextOverflow { used: u32, max: u32 },

    /// Malformed provider payload
    #[error("Parse error: {0}")]
    Parse(String),

    /// Session error
    #[error("Session error: {0}")]
    Session(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Rate limited
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl CoreError {
    /// Check if error is retryable
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ProviderUnavailable(_) | Self::RateLimited(_) | Self::Io(_)
        )
    }

    /// Convert to a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            Self::Provider(_) | Self::Parse(_) | Self::EmptyResponse => {
                "The AI service encountered an error. Please try again later.".into()
            }
            Self::ProviderUnavailable(_) => {
                "The AI service may be temporarily unavailable. Please try again later.".into()
            }
            Self::InvalidInput(msg) => msg.clone(),
            Self::ContextOverflow { .. } => {
                "The conversation is too long. Please start a new chat.".into()
            }
            Self::RateLimited(_) => "You've made too many requests. Please wait a moment.".into(),
            Self::Auth(_) => "The AI service is not configured correctly.".into(),
            _ => "An unexpected error occurred. Please try again.".into(),
        }
    }
}

impl From<anyhow::Error> for CoreError {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}
