//! Application State

use std::sync::Arc;

use agri_advisor::{ChatAssistant, ImageAnalyzer, MarketPriceService, WeatherClient};
use agri_core::LlmProvider;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Hosted model provider (Gemini, or scripted in tests)
    pub provider: Arc<dyn LlmProvider>,

    pub analyzer: Arc<ImageAnalyzer>,

    pub market: Arc<MarketPriceService>,

    /// Chat sessions live inside the assistant
    pub chat: Arc<ChatAssistant>,

    pub weather: Arc<dyn WeatherClient>,
}

impl AppState {
    /// Wire every service to the same provider and model
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        weather: Arc<dyn WeatherClient>,
        model: &str,
    ) -> Self {
        Self {
            analyzer: Arc::new(ImageAnalyzer::new(provider.clone()).with_model(model)),
            market: Arc::new(MarketPriceService::new(provider.clone()).with_model(model)),
            chat: Arc::new(ChatAssistant::new(provider.clone()).with_model(model)),
            provider,
            weather,
        }
    }
}

/// Process-level settings
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub static_dir: String,
}

impl ServerConfig {
    /// `BIND_ADDR` (default `0.0.0.0:3000`), `STATIC_DIR` (default `static`)
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into()),
            static_dir: std::env::var("STATIC_DIR").unwrap_or_else(|_| "static".into()),
        }
    }
}
