//! # agri-core
//!
//! Provider-agnostic model abstraction shared by the AgriGuru services.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     agri-advisor services                     │
//! │  ┌───────────────┐  ┌───────────────┐  ┌──────────────────┐  │
//! │  │ ImageAnalyzer │  │ MarketPrices  │  │  ChatAssistant   │  │
//! │  └───────┬───────┘  └───────┬───────┘  └────────┬─────────┘  │
//! │          └──────────────────┼───────────────────┘            │
//! │                     ┌───────▼────────┐                        │
//! │                     │  LlmProvider   │  (Strategy)            │
//! │                     └───────┬────────┘                        │
//! └─────────────────────────────┼─────────────────────────────────┘
//!               GeminiProvider  │  ScriptedProvider
//! ```
//!
//! Services talk to the hosted model only through `LlmProvider`, so tests and
//! offline demos can swap in a [`ScriptedProvider`].

pub mod error;
pub mod message;
pub mod mock;
pub mod provider;
pub mod session;

pub use error::{CoreError, Result};
pub use message::{Conversation, InlineImage, Message, Role};
pub use mock::ScriptedProvider;
pub use provider::{
    Completion, FinishReason, GenerationOptions, GroundingSource, LlmProvider, ModelInfo,
    ProviderInfo, TokenUsage,
};
pub use session::{ChatSession, DEFAULT_MAX_SESSIONS, MemorySessionStore, SessionId, SessionStore};
