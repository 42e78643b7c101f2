use serde_json::Value;

/// Raw diff text of the change under review. Never parsed, only measured.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffText(String);

impl DiffText {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters, not bytes.
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}

/// Static-analysis findings read from the Semgrep JSON report.
#[derive(Debug, Clone, PartialEq)]
pub enum FindingsReport {
    /// Entries of the report's `results` list, passed through untouched
    Findings(Vec<Value>),
    /// The report existed but could not be read or parsed
    Error { message: String },
}

impl Default for FindingsReport {
    fn default() -> Self {
        FindingsReport::Findings(Vec::new())
    }
}

impl FindingsReport {
    /// Usable findings. Always empty for an error record.
    pub fn results(&self) -> &[Value] {
        match self {
            FindingsReport::Findings(results) => results,
            FindingsReport::Error { .. } => &[],
        }
    }

    pub fn count(&self) -> usize {
        self.results().len()
    }

    /// Diagnostic kept from a report that failed to load.
    pub fn error(&self) -> Option<&str> {
        match self {
            FindingsReport::Findings(_) => None,
            FindingsReport::Error { message } => Some(message.as_str()),
        }
    }
}

/// What the loader hands to the orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub enum Inputs {
    /// Diff too small to review; findings were not read
    Trivial(DiffText),
    Ready {
        diff: DiffText,
        findings: FindingsReport,
    },
}
