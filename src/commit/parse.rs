//! Extraction of structured commit parts from raw model output.
//!
//! [`parse_strict`] accepts only a JSON object with the expected keys;
//! [`fallback`] treats anything as prose and always yields usable parts.

use serde::Deserialize;
use tracing::debug;

use crate::commit::kind::CommitType;
use crate::error::ParseError;
use crate::text::{
    BODY_MAX_RUNES, SUMMARY_MAX_RUNES, sanitize_body, sanitize_description, sanitize_summary,
    truncate,
};

/// Description used when nothing usable can be derived.
pub const FALLBACK_DESCRIPTION: &str = "update project files";

/// Commit fields as produced by the model, raw or normalized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Parts {
    pub commit_type: String,
    pub description: String,
    pub summary: String,
    pub body: String,
}

/// Parse a model response as a JSON commit record and normalize every field.
pub fn parse_strict(raw: &str) -> Result<Parts, ParseError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ParseError::EmptyResponse);
    }

    let (start, end) = match (raw.find('{'), raw.rfind('}')) {
        (Some(start), Some(end)) if start < end => (start, end),
        _ => return Err(ParseError::NoJsonObject),
    };

    let parts: Parts = serde_json::from_str(&raw[start..=end]).map_err(ParseError::Decode)?;

    let summary = sanitize_summary(&parts.summary);
    let normalized = Parts {
        commit_type: CommitType::resolve(&parts.commit_type).as_str().to_string(),
        description: sanitize_description(&parts.description),
        body: truncate(&sanitize_body(&parts.body, &summary), BODY_MAX_RUNES),
        summary,
    };

    if normalized.description.is_empty() {
        return Err(ParseError::MissingDescription);
    }

    Ok(normalized)
}

/// Build parts heuristically from arbitrary model prose. Never fails.
pub fn fallback(raw: &str) -> Parts {
    let mut description = sanitize_description(raw);
    if description.is_empty() {
        description = FALLBACK_DESCRIPTION.to_string();
    }

    let mut summary = sanitize_summary(raw);
    if summary.is_empty() {
        summary = truncate(&description, SUMMARY_MAX_RUNES);
    }

    Parts {
        commit_type: CommitType::detect(raw).as_str().to_string(),
        body: sanitize_body(raw, &summary),
        description,
        summary,
    }
}

/// Strict parse, falling back to heuristics on any rejection.
pub fn parse(raw: &str) -> Parts {
    parse_strict(raw).unwrap_or_else(|e| {
        debug!("Strict parse rejected model output ({e}), using fallback extraction");
        fallback(raw)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_strict_valid_json() {
        let raw = r#"{"commit_type":"feat","description":"add login audit hook","summary":"logs auth events","body":"adds publisher"}"#;
        let parts = parse_strict(raw).unwrap();
        assert_eq!(parts.commit_type, "feat");
        assert_eq!(parts.description, "add login audit hook");
        assert_eq!(parts.summary, "logs auth events");
        assert_eq!(parts.body, "adds publisher");
    }

    #[test]
    fn test_parse_strict_with_surrounding_prose() {
        let raw = "Sure! Here it is:\n{\"commit_type\":\"Feature\",\"description\":\"add cache.\"}\nHope this helps.";
        let parts = parse_strict(raw).unwrap();
        assert_eq!(parts.commit_type, "feat");
        assert_eq!(parts.description, "add cache");
    }

    #[test]
    fn test_parse_strict_missing_fields_default() {
        let parts = parse_strict(r#"{"description":"tidy imports","extra":42}"#).unwrap();
        assert_eq!(parts.commit_type, "chore");
        assert_eq!(parts.summary, "");
        assert_eq!(parts.body, "");
    }

    #[test]
    fn test_parse_strict_body_seeded_from_summary() {
        let parts =
            parse_strict(r#"{"description":"tidy imports","summary":"less noise","body":"  "}"#)
                .unwrap();
        assert_eq!(parts.body, "less noise");
    }

    #[test]
    fn test_parse_strict_caps_joined_body() {
        let body = vec!["x".repeat(200); 3].join("\\n");
        let raw = format!(r#"{{"description":"big body","body":"{body}"}}"#);
        let parts = parse_strict(&raw).unwrap();
        assert_eq!(parts.body.chars().count(), BODY_MAX_RUNES);
        assert!(parts.body.ends_with('…'));
    }

    #[test]
    fn test_parse_strict_empty() {
        assert!(matches!(parse_strict("  \n "), Err(ParseError::EmptyResponse)));
    }

    #[test]
    fn test_parse_strict_no_braces() {
        assert!(matches!(parse_strict("add a thing"), Err(ParseError::NoJsonObject)));
        assert!(matches!(parse_strict("} backwards {"), Err(ParseError::NoJsonObject)));
    }

    #[test]
    fn test_parse_strict_decode_error() {
        assert!(matches!(parse_strict("{not json}"), Err(ParseError::Decode(_))));
        assert!(matches!(
            parse_strict(r#"{"description": 5}"#),
            Err(ParseError::Decode(_))
        ));
    }

    #[test]
    fn test_parse_strict_missing_description() {
        let raw = r#"{"commit_type":"fix","description":" ... ","summary":"s"}"#;
        assert!(matches!(parse_strict(raw), Err(ParseError::MissingDescription)));
    }

    #[test]
    fn test_fallback_plain_prose() {
        let parts = fallback("Fixed the crash in the parser when input is empty.");
        assert_eq!(parts.commit_type, "fix");
        assert_eq!(parts.description, "Fixed the crash in the parser when input is empty");
        assert_eq!(parts.summary, "Fixed the crash in the parser when input is empty.");
        assert_eq!(parts.body, "Fixed the crash in the parser when input is empty.");
    }

    #[test]
    fn test_fallback_blank_input() {
        let parts = fallback("   ");
        assert_eq!(parts.description, FALLBACK_DESCRIPTION);
        assert_eq!(parts.summary, FALLBACK_DESCRIPTION);
        assert_eq!(parts.body, FALLBACK_DESCRIPTION);
        assert_eq!(parts.commit_type, "chore");
    }

    #[test]
    fn test_fallback_only_periods() {
        let parts = fallback("...");
        assert_eq!(parts.description, FALLBACK_DESCRIPTION);
        assert_eq!(parts.summary, "...");
    }

    #[test]
    fn test_parse_uses_fallback_on_rejection() {
        let parts = parse("no json here, just docs changes");
        assert_eq!(parts.commit_type, "docs");
        assert_eq!(parts.description, "no json here, just docs changes");
    }

    #[test]
    fn test_parse_prefers_strict() {
        let parts = parse(r#"{"commit_type":"perf","description":"cache lookups"}"#);
        assert_eq!(parts.commit_type, "perf");
        assert_eq!(parts.description, "cache lookups");
    }
}
