use crate::input::{DiffText, FindingsReport};

/// System instruction sent alongside every review prompt.
pub const PERSONA: &str = "You are an expert technical PR reviewer. Your tone is professional and focused on actionable risks. Analyze the provided Git diff and Semgrep metadata to produce a structured review.";

/// Assemble the user prompt from the diff and the Semgrep findings.
///
/// Pure and deterministic: findings are pretty-printed with two-space
/// indentation and object keys in sorted order.
pub fn build(diff: &DiffText, findings: &FindingsReport) -> String {
    let findings_json =
        serde_json::to_string_pretty(findings.results()).unwrap_or_else(|_| "[]".to_string());

    format!(
        r#"
### DIFF
```diff
{diff}
```

### SEMGREP FINDINGS
Total Findings: {count}

```json
{findings_json}
```

### REQUIRED OUTPUT FORMAT (Strictly adhere to this structure. Max 140 words total.)

### Summary
- 2–3 bullets detailing exact PR changes.

### Why It Matters
- Real reasoning based only on diff and security findings.

### Issues
- Synthesized list of real issues found in diff and tool output.

### Changes Required
- 1–2 essential fixes that need to be made before merging.

RULES:
- Do not output the markdown headers *inside* the bullet points.
- No hallucinations (use only diff and findings).
"#,
        diff = diff.as_str(),
        count = findings.count(),
    )
}
