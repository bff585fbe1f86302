//! Error types for commitgen modules using thiserror.

use thiserror::Error;

/// Errors from the model endpoint client.
#[derive(Error, Debug)]
pub enum OllamaError {
    #[error("Failed to reach model endpoint {endpoint}: {source}")]
    Network {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Model endpoint returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Failed to read streamed response: {0}")]
    Stream(#[source] reqwest::Error),

    #[error("Model request did not finish before the deadline")]
    Timeout,

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

impl OllamaError {
    /// Whether the request never produced a response (connect failure or deadline).
    pub fn is_unreachable(&self) -> bool {
        matches!(self, OllamaError::Network { .. } | OllamaError::Timeout)
    }
}

/// Reasons the strict JSON parse of a model response was rejected.
///
/// Every variant triggers heuristic fallback extraction instead of failing the run.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Model returned an empty response")]
    EmptyResponse,

    #[error("Model response does not contain a JSON object")]
    NoJsonObject,

    #[error("Model response JSON could not be decoded: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Model response is missing a description")]
    MissingDescription,
}

/// Errors from git operations.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Failed to open repository: {0}")]
    OpenRepository(#[source] git2::Error),

    #[error("Failed to collect staged diff: {0}")]
    DiffFailed(#[source] git2::Error),

    #[error("Failed to resolve current branch: {0}")]
    BranchFailed(#[source] git2::Error),

    #[error("Failed to run git {operation}: {source}")]
    Spawn {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("git commit failed: {0}")]
    CommitFailed(String),

    #[error("Cannot commit in a bare repository")]
    BareRepository,

    #[error("Refusing to commit with an empty headline")]
    EmptyHeadline,

    #[error("Failed to write hook message file: {0}")]
    HookWriteFailed(#[source] std::io::Error),
}

/// Errors that abort the commit message pipeline.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("No staged changes. Stage your changes first: `git add ...`")]
    NoStagedChanges,

    #[error(transparent)]
    Git(#[from] GitError),

    #[error("Failed to generate commit message: {0}")]
    Generation(#[source] OllamaError),

    #[error("Model returned an empty message. Consider a larger model or a smaller diff.")]
    EmptyHeadline,
}
