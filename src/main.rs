mod config;
mod input;
mod orchestrator;
mod pr;
mod review;
#[cfg(test)]
mod test_support;

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

/// PR Reviewer: CI tool that sends a Pull Request diff and its Semgrep
/// findings to Gemini and posts the generated review as a PR comment.
///
/// Credentials and PR identity come from GEMINI_API_KEY, GITHUB_TOKEN,
/// REPO_FULL_NAME and PR_NUMBER.
#[derive(Parser, Debug)]
#[command(name = "pr-reviewer", version, about)]
struct Cli {
    /// Path to the unified diff of the pull request
    diff_path: Option<PathBuf>,

    /// Path to the Semgrep JSON report
    findings_path: Option<PathBuf>,

    /// Config file to use instead of ./.pr-reviewer.toml
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match config::Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "failed to load configuration");
            return ExitCode::FAILURE;
        }
    };
    debug!(
        model = %config.gemini.model,
        semgrep_config = %config.semgrep_config,
        "loaded configuration"
    );

    let generator = review::GeminiClient::new(config.gemini.api_base.clone());
    let poster = pr::GitHubClient::new(config.github.api_base.clone());

    let outcome = orchestrator::run(
        &config,
        cli.diff_path.as_deref(),
        cli.findings_path.as_deref(),
        &generator,
        &poster,
    )
    .await;
    info!(?outcome, "done");

    ExitCode::from(outcome.exit_code())
}
