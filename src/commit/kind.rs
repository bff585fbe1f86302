//! Canonicalization of free-text commit type tokens.

use std::fmt;

/// Conventional commit types accepted in a headline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitType {
    Feat,
    Fix,
    Perf,
    Refactor,
    Docs,
    Test,
    Build,
    Chore,
    Ci,
}

/// Synonym table in lookup priority order.
///
/// Prefix matching walks this slice front to back, so earlier rows win ties.
const SYNONYMS: &[(&str, CommitType)] = &[
    ("feat", CommitType::Feat),
    ("feature", CommitType::Feat),
    ("fix", CommitType::Fix),
    ("bugfix", CommitType::Fix),
    ("perf", CommitType::Perf),
    ("refactor", CommitType::Refactor),
    ("docs", CommitType::Docs),
    ("doc", CommitType::Docs),
    ("test", CommitType::Test),
    ("tests", CommitType::Test),
    ("build", CommitType::Build),
    ("chore", CommitType::Chore),
    ("ci", CommitType::Ci),
];

/// Keywords scanned for in prose responses, in priority order.
const PROSE_KEYWORDS: &[&str] = &["fix", "feat", "perf", "refactor", "docs", "test", "build", "ci"];

impl CommitType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommitType::Feat => "feat",
            CommitType::Fix => "fix",
            CommitType::Perf => "perf",
            CommitType::Refactor => "refactor",
            CommitType::Docs => "docs",
            CommitType::Test => "test",
            CommitType::Build => "build",
            CommitType::Chore => "chore",
            CommitType::Ci => "ci",
        }
    }

    /// Resolve any token to a commit type. Never fails; unknown input is `Chore`.
    pub fn resolve(token: &str) -> Self {
        let candidate = token
            .trim()
            .to_lowercase()
            .trim_matches(|c: char| matches!(c, '[' | ']' | '(' | ')'))
            .trim()
            .to_string();

        if candidate.is_empty() {
            return CommitType::Chore;
        }

        if let Some((_, kind)) = SYNONYMS.iter().find(|(key, _)| *key == candidate) {
            return *kind;
        }

        // "feat(auth)", "fixes"
        if let Some((_, kind)) = SYNONYMS.iter().find(|(key, _)| candidate.starts_with(key)) {
            return *kind;
        }

        // "ref", "bug"
        if let Some((_, kind)) = SYNONYMS.iter().find(|(key, _)| key.starts_with(&candidate)) {
            return *kind;
        }

        CommitType::Chore
    }

    /// Guess a commit type from unstructured prose by keyword search.
    pub fn detect(raw: &str) -> Self {
        let lower = raw.to_lowercase();
        PROSE_KEYWORDS
            .iter()
            .find(|keyword| lower.contains(*keyword))
            .map(|keyword| CommitType::resolve(keyword))
            .unwrap_or(CommitType::Chore)
    }
}

impl fmt::Display for CommitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical commit type name for a free-text token.
pub fn normalize_commit_type(token: &str) -> &'static str {
    CommitType::resolve(token).as_str()
}
