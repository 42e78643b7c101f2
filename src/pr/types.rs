use std::fmt;

use super::PublishError;

/// The pull request a review is posted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestRef {
    /// Repository in `owner/name` form
    pub repo_full_name: String,
    pub number: u64,
}

impl PullRequestRef {
    pub fn new(repo_full_name: impl Into<String>, number: u64) -> Self {
        Self {
            repo_full_name: repo_full_name.into(),
            number,
        }
    }
}

impl fmt::Display for PullRequestRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.repo_full_name, self.number)
    }
}

/// Result of a publish attempt.
#[derive(Debug)]
pub enum PublishOutcome {
    Posted,
    /// Identity incomplete; the review was logged instead of posted
    NotPosted { missing: Vec<&'static str> },
    /// The GitHub call failed; the review was logged for recovery
    Failed(PublishError),
}
