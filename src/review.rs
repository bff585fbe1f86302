//! Pre-commit code review prompt and response handling.

/// Reply the model is told to give when the diff has no problems.
pub const REVIEW_CLEAN_SENTINEL: &str = "No blocking issues found.";

/// Maximum characters requested per review finding.
pub const FINDING_MAX_CHARS: usize = 160;

/// Build the prompt asking the model to review a diff.
pub fn review_prompt(diff: &str) -> String {
    format!(
        r#"You are a meticulous senior engineer.
Review the following git diff and point out potential issues.

Reply in plain text using this format:
- If you see problems: put each finding on its own line starting with "- " and keep each finding under {FINDING_MAX_CHARS} characters.
- If the changes look good: reply with exactly "{REVIEW_CLEAN_SENTINEL}"

Focus on correctness, security, performance, tests and edge cases. Ignore formatting unless it hides a bug.

Diff:
{diff}
"#
    )
}

/// A model review of the staged diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    text: String,
}

impl Review {
    pub fn from_response(raw: &str) -> Self {
        Self {
            text: raw.trim().to_string(),
        }
    }

    /// The review exactly as the model returned it, trimmed.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Report shown to the user, or `None` when the model said nothing.
    ///
    /// The text is kept verbatim, including lines that are not `- ` findings.
    pub fn report(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        Some(format!("Review findings:\n{}", self.text))
    }

    /// Whether the model replied with the all-clear sentinel.
    pub fn is_clean(&self) -> bool {
        self.text == REVIEW_CLEAN_SENTINEL
    }

    /// Individual `- ` findings. Empty for a clean review.
    pub fn findings(&self) -> Vec<&str> {
        if self.is_clean() {
            return Vec::new();
        }

        self.text
            .lines()
            .filter_map(|line| line.trim().strip_prefix("- "))
            .map(str::trim)
            .filter(|finding| !finding.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_prompt_embeds_diff_and_sentinel() {
        let prompt = review_prompt("+let x = 1;\n");
        assert!(prompt.contains("+let x = 1;"));
        assert!(prompt.contains(REVIEW_CLEAN_SENTINEL));
        assert!(prompt.contains("\"- \""));
        assert!(prompt.contains("under 160 characters"));
    }

    #[test]
    fn test_clean_review_passes_through() {
        let review = Review::from_response("  No blocking issues found.\n");
        assert!(review.is_clean());
        assert_eq!(review.text(), REVIEW_CLEAN_SENTINEL);
        assert!(review.findings().is_empty());
    }

    #[test]
    fn test_findings_are_extracted() {
        let review = Review::from_response(
            "Some notes:\n- missing bounds check in parse()\n  - unwrap on user input\n-\n",
        );
        assert!(!review.is_clean());
        assert_eq!(
            review.findings(),
            vec!["missing bounds check in parse()", "unwrap on user input"]
        );
    }

    #[test]
    fn test_empty_review() {
        let review = Review::from_response("   ");
        assert!(review.is_empty());
        assert!(review.findings().is_empty());
    }

    #[test]
    fn test_report_keeps_text_verbatim() {
        let review = Review::from_response(
            "Possible issues:\n- missing test for audit()\nThe rename looks intentional.\n",
        );
        assert_eq!(
            review.report().unwrap(),
            "Review findings:\nPossible issues:\n- missing test for audit()\nThe rename looks intentional."
        );
        assert_eq!(review.findings(), vec!["missing test for audit()"]);
    }

    #[test]
    fn test_report_empty_review_is_none() {
        assert_eq!(Review::from_response("  \n").report(), None);
    }
}
