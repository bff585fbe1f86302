//! Prompt construction for commit message generation.
//!
//! The JSON keys and limits named here are what [`crate::commit::parse`]
//! expects back; change both together.

use crate::text::{BODY_MAX_RUNES, DESCRIPTION_MAX_RUNES, SUMMARY_MAX_RUNES};

/// Build the prompt asking the model for a single JSON commit record.
pub fn commit_prompt(diff: &str, branch: &str) -> String {
    format!(
        r#"You help craft git commit messages.
Analyse the staged diff and respond with a single JSON object describing the commit.

Requirements:
- "commit_type": choose the best fit from ["feat","fix","perf","refactor","docs","test","build","chore","ci"].
- "description": short imperative summary of what changed (<= {DESCRIPTION_MAX_RUNES} characters, lower case start, no trailing punctuation).
- "summary": brief reason or impact of the change (<= {SUMMARY_MAX_RUNES} characters).
- "body": 1-3 sentences with key details or rationale (<= {BODY_MAX_RUNES} characters). Separate list items with newlines.
- Output ONLY the JSON object with exactly these four keys. No prose, markdown, or backticks.

Example:
{{"commit_type":"fix","description":"handle nil pointer in parser","summary":"avoid panic when schema metadata missing","body":"Add nil check before parser access to prevent runtime crash."}}

Context:
- Branch: {branch}
- Diff:
{diff}
"#
    )
}
