pub mod github;
pub mod types;

pub use github::GitHubClient;
pub use types::{PublishOutcome, PullRequestRef};

use async_trait::async_trait;
use thiserror::Error;
use tracing::{error, info, instrument};

use crate::config::Config;

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("GitHub API request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("GitHub API returned {status}: {body}")]
    Api { status: u16, body: String },
}

/// A code-hosting service that can comment on pull requests.
#[async_trait]
pub trait CommentPoster: Send + Sync {
    async fn post_comment(
        &self,
        token: &str,
        pr: &PullRequestRef,
        body: &str,
    ) -> Result<(), PublishError>;
}

/// Header prepended to generated reviews.
pub fn comment_header(pr_number: u64) -> String {
    format!("## Automated Gemini Code Review for PR #{pr_number}\n\n")
}

/// Post `text` as a new comment on the configured pull request.
///
/// Without a token, repository and PR number nothing is posted and the text
/// is logged instead. On a failed post the text is logged before returning
/// `Failed` so the review is never lost silently.
#[instrument(skip(config, poster, text))]
pub async fn publish(
    config: &Config,
    poster: &dyn CommentPoster,
    text: &str,
    skip_header: bool,
) -> PublishOutcome {
    let (Some(token), Some(pr)) = (config.github_token.as_deref(), config.pull_request()) else {
        let missing = config.missing_publish_identity();
        error!(?missing, "missing GitHub token or PR metadata, cannot post review");
        error!("generated review:\n{text}");
        return PublishOutcome::NotPosted { missing };
    };

    let body = if skip_header {
        text.to_string()
    } else {
        format!("{}{}", comment_header(pr.number), text)
    };

    match poster.post_comment(token, &pr, &body).await {
        Ok(()) => {
            info!(pr = %pr, "posted review to pull request");
            PublishOutcome::Posted
        }
        Err(err) => {
            error!(pr = %pr, error = %err, "error posting comment to GitHub");
            error!("generated review (not posted):\n{text}");
            PublishOutcome::Failed(err)
        }
    }
}
