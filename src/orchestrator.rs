use colored::Colorize;
use std::path::Path;
use tracing::{error, info, instrument, warn};

use crate::config::Config;
use crate::input::{self, Inputs};
use crate::pr::{self, CommentPoster, PublishOutcome};
use crate::review::{self, prompt, Generator, ReviewText};

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Review generated (or fallback text) and publish attempted
    Completed,
    /// Diff below the review threshold; notice published
    ShortCircuited,
    /// Required environment variables were missing; nothing was read
    MissingConfig(Vec<&'static str>),
    /// GitHub rejected the comment
    PublishFailed,
}

impl RunOutcome {
    pub fn exit_code(&self) -> u8 {
        match self {
            RunOutcome::Completed | RunOutcome::ShortCircuited => 0,
            RunOutcome::MissingConfig(_) | RunOutcome::PublishFailed => 1,
        }
    }
}

/// Validate config, load inputs, generate the review and post it.
///
/// Components are called strictly in sequence. Input files are only read
/// once every required variable is present.
#[instrument(skip_all)]
pub async fn run(
    config: &Config,
    diff_path: Option<&Path>,
    findings_path: Option<&Path>,
    generator: &dyn Generator,
    poster: &dyn CommentPoster,
) -> RunOutcome {
    let missing = config.missing();
    if !missing.is_empty() {
        eprintln!(
            "{}",
            format!(
                "CRITICAL ERROR: Missing environment variables: {}. Please check YAML configuration.",
                missing.join(", ")
            )
            .red()
            .bold()
        );
        error!(?missing, "missing required environment variables");
        return RunOutcome::MissingConfig(missing);
    }

    let (diff, findings) = match input::load(diff_path, findings_path) {
        Inputs::Trivial(diff) => {
            info!(chars = diff.char_count(), "no significant diff, skipping review");
            let outcome = pr::publish(config, poster, &ReviewText::Trivial.text(), true).await;
            if is_fatal(outcome) {
                return RunOutcome::PublishFailed;
            }
            return RunOutcome::ShortCircuited;
        }
        Inputs::Ready { diff, findings } => (diff, findings),
    };
    info!(
        chars = diff.char_count(),
        findings = findings.count(),
        findings_error = findings.error(),
        "loaded inputs"
    );

    let prompt = prompt::build(&diff, &findings);
    let review = review::request_review(config, generator, &prompt).await;
    let text = review.text();

    if is_fatal(pr::publish(config, poster, &text, false).await) {
        return RunOutcome::PublishFailed;
    }

    println!("\n{}\n", "--- Final Review Output ---".bold());
    println!("{text}");
    RunOutcome::Completed
}

/// True only when GitHub rejected the comment. Missing identity is not fatal.
fn is_fatal(outcome: PublishOutcome) -> bool {
    match outcome {
        PublishOutcome::Posted => false,
        PublishOutcome::NotPosted { missing } => {
            warn!(?missing, "review was logged instead of posted");
            false
        }
        PublishOutcome::Failed(err) => {
            error!(error = %err, "review could not be delivered");
            true
        }
    }
}
