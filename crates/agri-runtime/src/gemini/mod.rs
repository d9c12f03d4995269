//! Gemini Provider
//!
//! Implementation of `LlmProvider` for Google's hosted Gemini models.

mod api;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use agri_core::{
    Completion, CoreError, GenerationOptions, LlmProvider, Message, ModelInfo, ProviderInfo,
    Result,
};

use self::api::{GenerateContentRequest, GenerateContentResponse, ListModelsResponse};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini provider configuration
#[derive(Clone, Debug)]
pub struct GeminiConfig {
    /// API key sent as `x-goog-api-key`
    pub api_key: String,

    /// API root, without trailing slash
    pub base_url: String,

    /// Model used when the caller doesn't name one
    pub default_model: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.into(),
            default_model: agri_core::provider::DEFAULT_MODEL.into(),
            timeout_secs: 60,
        }
    }

    /// Read configuration from the environment.
    ///
    /// - `GEMINI_API_KEY` (or `API_KEY`), required
    /// - `GEMINI_BASE_URL`, optional
    /// - `GEMINI_MODEL`, optional
    /// - `GEMINI_TIMEOUT_SECS`, optional
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("API_KEY"))
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| CoreError::Config("GEMINI_API_KEY environment variable not set".into()))?;

        let mut config = Self::new(api_key);

        if let Ok(url) = std::env::var("GEMINI_BASE_URL") {
            if !url.trim().is_empty() {
                config = config.with_base_url(&url)?;
            }
        }
        if let Ok(model) = std::env::var("GEMINI_MODEL") {
            if !model.trim().is_empty() {
                config.default_model = model.trim().to_string();
            }
        }
        if let Some(secs) = std::env::var("GEMINI_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            config.timeout_secs = secs;
        }

        Ok(config)
    }

    /// Point the client at another API root (proxies, tests)
    pub fn with_base_url(mut self, url: &str) -> Result<Self> {
        let trimmed = url.trim().trim_end_matches('/');
        url::Url::parse(trimmed)
            .map_err(|e| CoreError::Config(format!("Invalid Gemini base URL {trimmed}: {e}")))?;
        self.base_url = trimmed.to_string();
        Ok(self)
    }
}

/// Gemini model provider
pub struct GeminiProvider {
    http: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiProvider {
    /// Create from configuration
    pub fn from_config(config: GeminiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CoreError::Config(format!("HTTP client: {e}")))?;

        Ok(Self { http, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_config(GeminiConfig::from_env()?)
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    fn model_for<'a>(&'a self, options: &'a GenerationOptions) -> &'a str {
        if options.model.trim().is_empty() {
            &self.config.default_model
        } else {
            &options.model
        }
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    async fn info(&self) -> Result<ProviderInfo> {
        let models = self.list_models().await.unwrap_or_default();

        Ok(ProviderInfo {
            name: "Gemini".into(),
            models,
            supports_vision: true,
            supports_web_search: true,
        })
    }

    async fn health_check(&self) -> Result<bool> {
        match self.list_models().await {
            Ok(_) => Ok(true),
            Err(e) => {
                tracing::warn!("Gemini health check failed: {}", e);
                Ok(false)
            }
        }
    }

    async fn complete(
        &self,
        messages: &[Message],
        options: &GenerationOptions,
    ) -> Result<Completion> {
        let model = self.model_for(options);
        let request = GenerateContentRequest::build(messages, options);
        if request.contents.is_empty() {
            return Err(CoreError::InvalidInput("No user content to send".into()));
        }

        let url = format!("{}/models/{}:generateContent", self.config.base_url, model);
        tracing::debug!(
            model,
            turns = request.contents.len(),
            web_search = options.web_search,
            "Sending generateContent request"
        );

        let response = self
            .http
            .post(&url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(classify_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_status(status, &body));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| CoreError::Parse(e.to_string()))?;

        let completion = body.into_completion(model);
        if let Some(usage) = &completion.usage {
            tracing::debug!(total_tokens = usage.total_tokens, "Gemini usage");
        }
        Ok(completion)
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>> {
        let url = format!("{}/models", self.config.base_url);
        let response = self
            .http
            .get(&url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .send()
            .await
            .map_err(classify_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_status(status, &body));
        }

        let body: ListModelsResponse = response
            .json()
            .await
            .map_err(|e| CoreError::Parse(e.to_string()))?;

        Ok(body.into_model_infos())
    }
}

fn classify_reqwest_error(e: reqwest::Error) -> CoreError {
    if e.is_timeout() {
        CoreError::ProviderUnavailable(format!("Request timed out: {e}"))
    } else if e.is_connect() {
        CoreError::ProviderUnavailable(format!("Connection failed: {e}"))
    } else {
        CoreError::Provider(format!("Network error: {e}"))
    }
}

fn classify_status(status: StatusCode, body: &str) -> CoreError {
    let detail = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.chars().take(200).collect());
    let message = format!("HTTP {}: {}", status.as_u16(), detail);

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => CoreError::Auth(message),
        StatusCode::TOO_MANY_REQUESTS => CoreError::RateLimited(message),
        s if s.is_server_error() => CoreError::ProviderUnavailable(message),
        _ => CoreError::Provider(message),
    }
}
