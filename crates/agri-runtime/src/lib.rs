//! # agri-runtime
//!
//! Hosted model providers for AgriGuru.
//!
//! ## Providers
//!
//! - **Gemini** (default): Google Generative Language API, multimodal with
//!   optional web search grounding
//! - [`ScriptedProvider`]: deterministic replies for tests and offline demos
//!
//! ## Usage
//!
//! ```rust,ignore
//! use agri_runtime::GeminiProvider;
//!
//! let provider = Arc::new(GeminiProvider::from_env()?);
//! let analyzer = ImageAnalyzer::new(provider.clone());
//! ```

#[cfg(feature = "gemini")]
pub mod gemini;

#[cfg(feature = "gemini")]
pub use gemini::{GeminiConfig, GeminiProvider};

// Re-export core types for convenience
pub use agri_core::{
    Completion, CoreError, GenerationOptions, LlmProvider, Message, Result, Role,
    ScriptedProvider,
};
