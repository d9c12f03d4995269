//! Image Analyzer
//!
//! Sends a photo plus the task instruction to the model and returns the
//! markdown report.

use std::sync::Arc;

use agri_core::{CoreError, GenerationOptions, InlineImage, LlmProvider, Message};

use crate::error::Result;
use crate::tasks::AiTask;

/// Shown when the model can't produce an analysis
pub const ANALYSIS_FALLBACK: &str = "Sorry, I couldn't analyze the image. \
The AI service may be temporarily unavailable. Please try again later.";

const ANALYSIS_TEMPERATURE: f32 = 0.2;

pub struct ImageAnalyzer {
    provider: Arc<dyn LlmProvider>,
    options: GenerationOptions,
}

impl ImageAnalyzer {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            provider,
            options: GenerationOptions::default().with_temperature(ANALYSIS_TEMPERATURE),
        }
    }

    /// Use a different model than the provider default
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.options = self.options.with_model(model);
        self
    }

    /// Run one analysis; errors are returned as-is
    pub async fn analyze(&self, task: AiTask, image: InlineImage) -> Result<String> {
        tracing::info!(task = task.id(), mime = %image.mime_type, bytes = image.approx_bytes(), "Analyzing image");

        let messages = [Message::user(task.prompt()).with_image(image)];
        let completion = self.provider.complete(&messages, &self.options).await?;

        if completion.content.trim().is_empty() {
            return Err(CoreError::EmptyResponse.into());
        }
        Ok(completion.content)
    }

    /// Run one analysis, turning upstream failures into the fallback text
    ///
    /// Bad input (no image) is still an error so the caller can ask for a photo.
    pub async fn analyze_or_apologize(&self, task: AiTask, image: InlineImage) -> Result<String> {
        match self.analyze(task, image).await {
            Ok(report) => Ok(report),
            Err(e) if e.is_client_error() => Err(e),
            Err(e) => {
                tracing::warn!(task = task.id(), "Image analysis failed: {}", e);
                Ok(ANALYSIS_FALLBACK.to_string())
            }
        }
    }
}
