//! Service Kit
//!
//! Model-backed services for the AgriGuru features. Each one wraps a shared
//! `LlmProvider` and owns its prompt and fallback text.

mod analyzer;
mod chat;
mod market;

pub use analyzer::{ANALYSIS_FALLBACK, ImageAnalyzer};
pub use chat::{CHAT_EMPTY_REPLY, CHAT_TROUBLE_REPLY, ChatAssistant, ChatReply};
pub use market::{MARKET_FALLBACK, MarketPriceResult, MarketPriceService};
