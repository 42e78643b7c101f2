use super::GenerationError;

/// Comment posted when the diff is below the review threshold.
pub const TRIVIAL_NOTICE: &str =
    "## Automated Gemini Code Review\n\n✅ **Agent Status:** No significant code diff detected to review.";

pub const MISSING_API_KEY_NOTICE: &str =
    "Gemini API Call Failed: API Key is missing from the environment.";

/// Longest slice of a failure description embedded in the fallback text.
pub const MAX_FAILURE_CHARS: usize = 100;

/// The text that ends up on the pull request, tagged with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewText {
    /// Trimmed model output
    Generated(String),
    /// Fixed notice for a diff too small to review
    Trivial,
    /// Generation was skipped because no API key is configured
    MissingApiKey,
    /// Generation failed; `reason` is already truncated
    Failed { reason: String },
}

impl ReviewText {
    /// Map a generation failure to its fallback text.
    pub fn from_error(err: &GenerationError) -> Self {
        match err {
            GenerationError::MissingApiKey => ReviewText::MissingApiKey,
            other => ReviewText::Failed {
                reason: other.to_string().chars().take(MAX_FAILURE_CHARS).collect(),
            },
        }
    }

    pub fn text(&self) -> String {
        match self {
            ReviewText::Generated(text) => text.clone(),
            ReviewText::Trivial => TRIVIAL_NOTICE.to_string(),
            ReviewText::MissingApiKey => MISSING_API_KEY_NOTICE.to_string(),
            ReviewText::Failed { reason } => {
                format!("Gemini API Call Failed. Exception: {reason}...")
            }
        }
    }
}
