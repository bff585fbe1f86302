//! Whitespace and length normalization for model-produced text.
//!
//! Every length limit here counts Unicode scalar values (runes), never bytes,
//! so truncation cannot split a multi-byte character.

use std::sync::LazyLock;

use regex_lite::Regex;

/// Maximum runes in a commit description (the headline's free-text part).
pub const DESCRIPTION_MAX_RUNES: usize = 72;

/// Maximum runes in a commit summary.
pub const SUMMARY_MAX_RUNES: usize = 100;

/// Maximum runes per body line (and for the whole body on the strict path).
pub const BODY_MAX_RUNES: usize = 300;

const ELLIPSIS: char = '…';

/// Marker appended to a diff cut by [`trim_to`].
pub const DIFF_TRUNCATED_MARKER: &str = "\n…[diff truncated]";

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Collapse every run of whitespace into a single space.
pub fn condense_spaces(s: &str) -> String {
    WHITESPACE_RUN.replace_all(s, " ").into_owned()
}

/// Shorten `s` to at most `max_runes` runes, ending in `…` when cut.
pub fn truncate(s: &str, max_runes: usize) -> String {
    if max_runes == 0 {
        return String::new();
    }
    if s.chars().count() <= max_runes {
        return s.to_string();
    }

    let mut out: String = s.chars().take(max_runes - 1).collect();
    out.push(ELLIPSIS);
    out
}

/// Normalize a commit description: single-spaced, ≤ 72 runes, no trailing period.
pub fn sanitize_description(s: &str) -> String {
    let condensed = condense_spaces(s.trim());
    let condensed = condensed.trim();
    if condensed.is_empty() {
        return String::new();
    }

    truncate(condensed, DESCRIPTION_MAX_RUNES)
        .trim_end_matches(|c: char| c == '.' || c.is_whitespace())
        .to_string()
}

/// Normalize a commit summary: single-spaced, ≤ 100 runes.
pub fn sanitize_summary(s: &str) -> String {
    let condensed = condense_spaces(s.trim());
    truncate(condensed.trim(), SUMMARY_MAX_RUNES)
}

/// Normalize a multi-line body, substituting `fallback_seed` when `s` is blank.
///
/// Each line is condensed and trimmed, blank lines are dropped and every
/// surviving line is capped at [`BODY_MAX_RUNES`].
pub fn sanitize_body(s: &str, fallback_seed: &str) -> String {
    let normalized = s.replace("\r\n", "\n");
    let mut source = normalized.trim();
    if source.is_empty() {
        source = fallback_seed.trim();
    }

    source
        .lines()
        .map(|line| condense_spaces(line.trim()))
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .map(|line| truncate(&line, BODY_MAX_RUNES))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Cap a diff at `max_bytes`, preferring to cut at a line boundary.
///
/// A `max_bytes` of zero disables the cap.
pub fn trim_to(s: &str, max_bytes: usize) -> String {
    if max_bytes == 0 || s.len() <= max_bytes {
        return s.to_string();
    }

    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }

    let mut head = &s[..end];
    if let Some(idx) = head.rfind('\n')
        && idx > 0
    {
        head = &head[..idx];
    }

    format!("{head}{DIFF_TRUNCATED_MARKER}")
}
