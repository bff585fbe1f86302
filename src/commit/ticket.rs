//! Ticket identifier extraction from branch names.

use std::sync::LazyLock;

use regex_lite::Regex;

use crate::text::condense_spaces;

/// Ticket used when the branch name is blank.
pub const UNKNOWN_TICKET: &str = "unknown";

static TICKET_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]+-\d+").expect("ticket pattern is valid"));

/// Derive the ticket prefix for a headline from a branch name.
///
/// `feature/TES-123-login-audit` yields `TES-123`; a branch without a ticket
/// yields its last path segment (`main` yields `main`).
pub fn extract_ticket(branch: &str) -> String {
    let condensed = condense_spaces(branch.trim());
    let mut name = condensed.trim();
    if name.is_empty() {
        return UNKNOWN_TICKET.to_string();
    }

    if let Some(idx) = name.rfind('/')
        && idx + 1 < name.len()
    {
        name = &name[idx + 1..];
    }

    match TICKET_PATTERN.find(name) {
        Some(m) => m.as_str().to_string(),
        None => name.to_string(),
    }
}
