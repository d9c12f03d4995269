//! Market Price Lookup
//!
//! Asks the model for current Indian market prices of a crop, grounded with
//! a web search, and keeps the cited pages.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use agri_core::{GenerationOptions, GroundingSource, LlmProvider, Message};

use crate::error::{AdvisorError, Result};

/// Shown when prices can't be fetched
pub const MARKET_FALLBACK: &str = "Sorry, I couldn't fetch the market prices at the moment. \
The service may be unavailable. Please try again later.";

/// Prices summary plus the pages it was grounded on
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketPriceResult {
    pub price_info: String,
    pub sources: Vec<GroundingSource>,
}

impl MarketPriceResult {
    fn unavailable() -> Self {
        Self {
            price_info: MARKET_FALLBACK.to_string(),
            sources: Vec::new(),
        }
    }
}

pub struct MarketPriceService {
    provider: Arc<dyn LlmProvider>,
    options: GenerationOptions,
}

impl MarketPriceService {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            provider,
            options: GenerationOptions::default().with_web_search(true),
        }
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.options = self.options.with_model(model);
        self
    }

    fn prompt(crop: &str) -> String {
        format!(
            "What are the current market prices for {crop} in India? Provide a brief summary and \
             then list key markets with their price ranges. Use Markdown for formatting: use a \
             heading for the summary, and a bulleted list for the markets."
        )
    }

    /// Look up prices for `crop`
    ///
    /// A blank crop name is an error; a model failure yields the fallback
    /// text with no sources.
    pub async fn lookup(&self, crop: &str) -> Result<MarketPriceResult> {
        let crop = crop.trim();
        if crop.is_empty() {
            return Err(AdvisorError::InvalidInput("Please enter a crop name.".into()));
        }

        tracing::info!(crop, "Looking up market prices");
        let messages = [Message::user(Self::prompt(crop))];

        match self.provider.complete(&messages, &self.options).await {
            Ok(completion) if !completion.content.trim().is_empty() => {
                let mut sources: Vec<GroundingSource> = Vec::with_capacity(completion.sources.len());
                for source in completion.sources {
                    if !sources.iter().any(|s| s.uri == source.uri) {
                        sources.push(source);
                    }
                }
                Ok(MarketPriceResult {
                    price_info: completion.content,
                    sources,
                })
            }
            Ok(_) => {
                tracing::warn!(crop, "Market lookup returned no text");
                Ok(MarketPriceResult::unavailable())
            }
            Err(e) => {
                tracing::warn!(crop, "Market lookup failed: {}", e);
                Ok(MarketPriceResult::unavailable())
            }
        }
    }
}
