//! # agri-advisor
//!
//! The farming services behind AgriGuru. Every AI feature goes through
//! `agri_core::LlmProvider`; live weather comes from a `WeatherClient`.
//!
//! ## Services
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  ImageAnalyzer      photo + task prompt  ──▶ markdown report │
//! │  MarketPriceService crop name + search   ──▶ prices, sources │
//! │  ChatAssistant      multi-turn session   ──▶ markdown reply  │
//! │  WeatherClient      lat / lon            ──▶ WeatherSummary  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Model failures never reach the farmer as raw errors: each service has a
//! fixed fallback sentence that the UI can show as-is.

pub mod error;
pub mod svckit;
pub mod tasks;
pub mod weather;

pub use error::{AdvisorError, Result};
pub use svckit::{ChatAssistant, ChatReply, ImageAnalyzer, MarketPriceResult, MarketPriceService};
pub use tasks::AiTask;
pub use weather::{
    Coordinates, MockWeatherClient, OpenMeteoClient, SkyCondition, WeatherClient, WeatherReport,
    WeatherSummary,
};

/// System instruction for the chat assistant
pub const AGRIGURU_PROMPT: &str = "You are AgriGuru, a friendly and helpful AI assistant for farmers. \
Answer questions related to farming, crops, weather, and market prices. \
Keep your answers concise and easy to understand. \
Use markdown for formatting when it improves readability (e.g., lists, bold text, headings). \
If you do not know an answer, say you are still learning about that topic.";
