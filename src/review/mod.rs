pub mod gemini;
pub mod prompt;
pub mod types;

pub use gemini::GeminiClient;
pub use types::ReviewText;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, error, instrument};

use crate::config::Config;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("GEMINI_API_KEY is not set")]
    MissingApiKey,

    #[error("Gemini API request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Gemini API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Gemini API response contained no text")]
    EmptyResponse,
}

/// One generation call: persona as the system instruction, prompt as the user turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub api_key: String,
    pub persona: String,
    pub prompt: String,
    pub model: String,
}

/// A remote text-generation service.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Return the model's raw text answer.
    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError>;
}

/// Ask the model for a review of `prompt`.
///
/// Never fails: a missing key or any remote error turns into fallback text.
/// Makes at most one call and no call at all without an API key.
#[instrument(skip_all, fields(model = %config.gemini.model))]
pub async fn request_review(
    config: &Config,
    generator: &dyn Generator,
    prompt: &str,
) -> ReviewText {
    match try_request_review(config, generator, prompt).await {
        Ok(text) => {
            debug!(chars = text.chars().count(), "received review");
            ReviewText::Generated(text)
        }
        Err(err) => {
            error!(error = %err, "error during Gemini API call");
            ReviewText::from_error(&err)
        }
    }
}

async fn try_request_review(
    config: &Config,
    generator: &dyn Generator,
    prompt: &str,
) -> Result<String, GenerationError> {
    let api_key = config
        .gemini_api_key
        .clone()
        .ok_or(GenerationError::MissingApiKey)?;

    let request = GenerationRequest {
        api_key,
        persona: prompt::PERSONA.to_string(),
        prompt: prompt.to_string(),
        model: config.gemini.model.clone(),
    };
    let text = generator.generate(request).await?;
    Ok(text.trim().to_string())
}
