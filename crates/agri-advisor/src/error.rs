//! Error Types for the Advisor Services

use agri_core::CoreError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AdvisorError>;

#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error(transparent)]
    Model(#[from] CoreError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Coordinates out of range: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinates { latitude: f64, longitude: f64 },

    #[error("Weather service error: {0}")]
    Weather(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AdvisorError {
    /// Whether the caller sent something unusable (as opposed to an upstream failure)
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput(_)
                | Self::InvalidCoordinates { .. }
                | Self::Model(CoreError::InvalidInput(_))
        )
    }

    /// Message safe to show to a farmer
    pub fn user_message(&self) -> String {
        match self {
            Self::Model(e) => e.user_message(),
            Self::InvalidInput(msg) => msg.clone(),
            Self::InvalidCoordinates { .. } => {
                "Those coordinates are not a valid location.".into()
            }
            Self::Weather(_) | Self::Network(_) | Self::Serialization(_) => {
                "Could not fetch weather data.".into()
            }
            Self::Config(_) => "The service is not configured correctly.".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors() {
        assert!(AdvisorError::InvalidInput("blank".into()).is_client_error());
        assert!(AdvisorError::Model(CoreError::InvalidInput("bad image".into())).is_client_error());
        assert!(!AdvisorError::Weather("503".into()).is_client_error());
        assert!(!AdvisorError::Model(CoreError::EmptyResponse).is_client_error());
    }

    #[test]
    fn test_user_message_passes_input_errors_through() {
        let err = AdvisorError::Model(CoreError::InvalidInput(
            "Please upload or capture an image first.".into(),
        ));
        assert_eq!(err.user_message(), "Please upload or capture an image first.");
    }
}
