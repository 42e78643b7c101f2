pub mod types;

pub use types::{DiffText, FindingsReport, Inputs};

use serde_json::Value;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, instrument, warn};

/// Diffs shorter than this many characters are not worth a review.
pub const MIN_DIFF_CHARS: usize = 10;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("{0}")]
    Parse(#[from] serde_json::Error),
}

/// Read both inputs, stopping after the diff when it is below the review threshold.
#[instrument(skip_all)]
pub fn load(diff_path: Option<&Path>, findings_path: Option<&Path>) -> Inputs {
    let diff = load_diff(diff_path);
    if is_trivial(&diff) {
        debug!(chars = diff.char_count(), "diff below review threshold");
        return Inputs::Trivial(diff);
    }

    let findings = load_findings(findings_path);
    Inputs::Ready { diff, findings }
}

pub fn is_trivial(diff: &DiffText) -> bool {
    diff.char_count() < MIN_DIFF_CHARS
}

/// Read the diff file. A missing or unreadable file yields an empty diff.
pub fn load_diff(path: Option<&Path>) -> DiffText {
    let Some(path) = path.filter(|p| p.exists()) else {
        debug!("no diff file, treating diff as empty");
        return DiffText::default();
    };

    match fs::read_to_string(path) {
        Ok(text) => {
            debug!(path = %path.display(), chars = text.chars().count(), "read diff");
            DiffText::new(text)
        }
        Err(err) => {
            warn!(
                path = %path.display(),
                error = %err,
                "diff not readable, treating as empty"
            );
            DiffText::default()
        }
    }
}

/// Read the Semgrep report.
///
/// A missing file yields no findings. A file that exists but cannot be read
/// or parsed yields an error record and a warning, never a failure.
pub fn load_findings(path: Option<&Path>) -> FindingsReport {
    let Some(path) = path.filter(|p| p.exists()) else {
        debug!("no findings file, continuing with zero findings");
        return FindingsReport::default();
    };

    match read_findings(path) {
        Ok(report) => {
            debug!(path = %path.display(), findings = report.count(), "read findings");
            report
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "could not parse Semgrep JSON");
            FindingsReport::Error {
                message: err.to_string(),
            }
        }
    }
}

fn read_findings(path: &Path) -> Result<FindingsReport, InputError> {
    let contents = fs::read_to_string(path).map_err(|source| InputError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let mut document: Value = serde_json::from_str(&contents)?;

    let results = match document.get_mut("results").map(Value::take) {
        Some(Value::Array(results)) => results,
        _ => Vec::new(),
    };
    Ok(FindingsReport::Findings(results))
}
