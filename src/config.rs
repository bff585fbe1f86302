//! Runtime settings resolved from command-line flags and environment variables.
//!
//! Precedence is flag, then environment, then built-in default. Blank
//! environment values are treated as unset; unparsable ones log a warning and
//! fall back to the default.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

pub const DEFAULT_MODEL: &str = "qwen2.5-coder:1.5b";
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";
pub const DEFAULT_MAX_BYTES: usize = 32_000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 40;

pub const MODEL_ENV_VAR: &str = "OLLAMA_MODEL";
pub const REVIEW_MODEL_ENV_VAR: &str = "OLLAMA_REVIEW_MODEL";
pub const ENDPOINT_ENV_VAR: &str = "OLLAMA_ENDPOINT";
pub const MAX_BYTES_ENV_VAR: &str = "COMMITGEN_MAX_BYTES";
pub const TIMEOUT_ENV_VAR: &str = "COMMITGEN_TIMEOUT";

/// Values supplied explicitly on the command line. `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub model: Option<String>,
    pub review_model: Option<String>,
    pub endpoint: Option<String>,
    pub max_bytes: Option<usize>,
    pub timeout: Option<Duration>,
    pub review: bool,
    pub no_commit: bool,
    pub hook_path: Option<PathBuf>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub model: String,
    pub review_model: Option<String>,
    pub endpoint: String,
    /// Cap on diff bytes sent to the model; 0 disables the cap.
    pub max_bytes: usize,
    pub timeout: Duration,
    pub review: bool,
    pub commit: bool,
    pub hook_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            review_model: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            max_bytes: DEFAULT_MAX_BYTES,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            review: false,
            commit: true,
            hook_path: None,
        }
    }
}

impl Settings {
    /// Defaults overlaid with environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            model: env_string(MODEL_ENV_VAR).unwrap_or(defaults.model),
            review_model: env_string(REVIEW_MODEL_ENV_VAR),
            endpoint: env_string(ENDPOINT_ENV_VAR).unwrap_or(defaults.endpoint),
            max_bytes: env_parsed(MAX_BYTES_ENV_VAR, defaults.max_bytes, |v| {
                v.parse::<usize>().map_err(|e| e.to_string())
            }),
            timeout: env_parsed(TIMEOUT_ENV_VAR, defaults.timeout, parse_duration),
            ..defaults
        }
    }

    /// Environment settings with command-line overrides applied on top.
    pub fn resolve(overrides: Overrides) -> Self {
        let mut settings = Self::from_env();
        settings.apply(overrides);
        settings
    }

    pub fn apply(&mut self, overrides: Overrides) {
        if let Some(model) = non_blank(overrides.model) {
            self.model = model;
        }
        if let Some(review_model) = non_blank(overrides.review_model) {
            self.review_model = Some(review_model);
        }
        if let Some(endpoint) = non_blank(overrides.endpoint) {
            self.endpoint = endpoint;
        }
        if let Some(max_bytes) = overrides.max_bytes {
            self.max_bytes = max_bytes;
        }
        if let Some(timeout) = overrides.timeout {
            self.timeout = timeout;
        }
        if overrides.review {
            self.review = true;
        }
        if overrides.no_commit {
            self.commit = false;
        }
        if overrides.hook_path.is_some() {
            self.hook_path = overrides.hook_path;
        }
    }

    /// Model used for the review pass, defaulting to the commit model.
    pub fn review_model(&self) -> &str {
        self.review_model.as_deref().unwrap_or(&self.model)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_string(name: &str) -> Option<String> {
    non_blank(env::var(name).ok())
}

fn env_parsed<T, F>(name: &str, default: T, parse: F) -> T
where
    T: std::fmt::Debug,
    F: Fn(&str) -> Result<T, String>,
{
    match env_string(name) {
        Some(v) => match parse(&v) {
            Ok(value) => value,
            Err(e) => {
                warn!("Invalid {} value '{}' ({}), using default {:?}", name, v, e, default);
                default
            }
        },
        None => default,
    }
}

/// Parse a duration such as `40`, `40s`, `500ms`, `2m` or `1h`.
///
/// A bare integer is read as seconds.
pub fn parse_duration(input: &str) -> Result<Duration, String> {
    let s = input.trim();
    if s.is_empty() {
        return Err("empty duration".to_string());
    }

    let split = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let (digits, unit) = s.split_at(split);
    if digits.is_empty() {
        return Err(format!("missing number in '{s}'"));
    }
    let value: u64 = digits
        .parse()
        .map_err(|e| format!("invalid number '{digits}': {e}"))?;

    let duration = match unit.trim() {
        "" | "s" => Duration::from_secs(value),
        "ms" => Duration::from_millis(value),
        "m" => Duration::from_secs(value.saturating_mul(60)),
        "h" => Duration::from_secs(value.saturating_mul(3600)),
        other => return Err(format!("unknown unit '{other}'")),
    };

    if duration.is_zero() {
        return Err("duration must be positive".to_string());
    }
    Ok(duration)
}
