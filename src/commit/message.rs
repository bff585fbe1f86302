//! Assembly of the final two-part commit message.

use crate::commit::kind::CommitType;
use crate::commit::parse::{FALLBACK_DESCRIPTION, Parts};
use crate::commit::ticket::extract_ticket;
use crate::text::{SUMMARY_MAX_RUNES, sanitize_body, sanitize_description, sanitize_summary, truncate};

/// A commit message ready to print, commit or write to a hook file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub headline: String,
    pub body: String,
}

impl Message {
    /// Render the message as git expects it.
    ///
    /// Produces:
    /// ```text
    /// TES-123 [feat] add login audit hook
    ///
    /// adds publisher
    /// ```
    pub fn format(&self) -> String {
        if self.body.trim().is_empty() {
            self.headline.clone()
        } else {
            format!("{}\n\n{}", self.headline, self.body)
        }
    }
}

/// Combine branch and parts into a `<ticket> [<type>] <description>` message.
pub fn assemble(branch: &str, parts: &Parts) -> Message {
    let ticket = extract_ticket(branch);
    let commit_type = CommitType::resolve(&parts.commit_type);

    let mut summary = sanitize_summary(&parts.summary);

    let mut description = sanitize_description(&parts.description);
    if description.is_empty() {
        description = if summary.is_empty() {
            FALLBACK_DESCRIPTION.to_string()
        } else {
            summary.clone()
        };
    }

    if summary.is_empty() {
        summary = truncate(&description, SUMMARY_MAX_RUNES);
    }

    let body = sanitize_body(&parts.body, &summary);
    let headline = format!("{ticket} [{commit_type}] {description}")
        .trim()
        .to_string();

    Message { headline, body }
}
