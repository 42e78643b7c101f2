use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::pr::PullRequestRef;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Config file looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = ".pr-reviewer.toml";

pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
pub const GITHUB_TOKEN: &str = "GITHUB_TOKEN";
pub const REPO_FULL_NAME: &str = "REPO_FULL_NAME";
pub const PR_NUMBER: &str = "PR_NUMBER";
pub const SEMGREP_CONFIG: &str = "SEMGREP_CONFIG";

/// Settings loaded from .pr-reviewer.toml.
///
/// All fields are optional. Credentials and PR identity only ever come from
/// the environment, never from this file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub gemini: GeminiConfig,

    #[serde(default)]
    pub github: GitHubConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    /// Model identifier sent with every generation request
    pub model: String,
    /// Base URL of the Generative Language API
    pub api_base: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".to_string(),
            api_base: "https://generativelanguage.googleapis.com".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// Base URL of the GitHub REST API (override for GitHub Enterprise)
    pub api_base: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.github.com".to_string(),
        }
    }
}

/// Immutable run configuration, built once at startup and passed by reference.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub github_token: Option<String>,
    /// Repository in `owner/name` form
    pub repo_full_name: Option<String>,
    pub pr_number: Option<u64>,
    /// Semgrep ruleset the CI job scanned with. Informational only.
    pub semgrep_config: String,
    pub gemini: GeminiConfig,
    pub github: GitHubConfig,
}

impl Config {
    /// Load the file config (explicit path, or .pr-reviewer.toml if present)
    /// and merge it with the process environment.
    pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
        let file = match path {
            Some(path) => Self::load_file(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_PATH);
                if default_path.exists() {
                    Self::load_file(default_path)?
                } else {
                    FileConfig::default()
                }
            }
        };

        Ok(Self::from_lookup(file, |key| std::env::var(key).ok()))
    }

    /// Load the TOML part of the configuration from a specific path.
    pub fn load_file(path: &Path) -> Result<FileConfig, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let file = toml::from_str(&contents)?;
        Ok(file)
    }

    /// Build a config from file settings and an arbitrary variable lookup.
    ///
    /// Empty values count as unset. `PR_NUMBER` must be a positive integer,
    /// anything else is treated as missing.
    pub fn from_lookup<F>(file: FileConfig, lookup: F) -> Config
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Config {
            gemini_api_key: non_empty(GEMINI_API_KEY),
            github_token: non_empty(GITHUB_TOKEN),
            repo_full_name: non_empty(REPO_FULL_NAME),
            pr_number: non_empty(PR_NUMBER)
                .and_then(|raw| raw.trim().parse::<u64>().ok())
                .filter(|number| *number > 0),
            semgrep_config: non_empty(SEMGREP_CONFIG).unwrap_or_else(|| "auto".to_string()),
            gemini: file.gemini,
            github: file.github,
        }
    }

    /// Names of required variables that are not set, in a fixed order.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.gemini_api_key.is_none() {
            missing.push(GEMINI_API_KEY);
        }
        missing.extend(self.missing_publish_identity());
        missing
    }

    /// Names of the variables the comment publisher needs that are not set.
    pub fn missing_publish_identity(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.github_token.is_none() {
            missing.push(GITHUB_TOKEN);
        }
        if self.repo_full_name.is_none() {
            missing.push(REPO_FULL_NAME);
        }
        if self.pr_number.is_none() {
            missing.push(PR_NUMBER);
        }
        missing
    }

    /// The pull request under review, if both repository and number are known.
    pub fn pull_request(&self) -> Option<PullRequestRef> {
        let repo = self.repo_full_name.as_ref()?;
        let number = self.pr_number?;
        Some(PullRequestRef::new(repo.clone(), number))
    }
}
