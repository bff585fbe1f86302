//! Outbound request payloads for `/api/generate`.

use serde::Serialize;

use crate::commit::prompt::commit_prompt;
use crate::review::review_prompt;

/// Sampling parameters sent as the request's `options` object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SamplingOptions {
    pub temperature: f32,
    pub top_p: f32,
    /// Maximum tokens to generate.
    pub num_predict: u32,
}

impl SamplingOptions {
    /// Low-variance settings for the JSON commit record.
    pub const COMMIT: SamplingOptions = SamplingOptions {
        temperature: 0.2,
        top_p: 0.9,
        num_predict: 120,
    };

    /// Settings for the review pass, with room for several findings.
    pub const REVIEW: SamplingOptions = SamplingOptions {
        temperature: 0.1,
        top_p: 0.9,
        num_predict: 200,
    };
}

/// A single streamed generation request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationRequest {
    pub model: String,
    pub prompt: String,
    stream: bool,
    pub options: SamplingOptions,
}

impl GenerationRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>, options: SamplingOptions) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            stream: true,
            options,
        }
    }

    /// Request for the JSON commit record.
    pub fn commit(model: &str, diff: &str, branch: &str) -> Self {
        Self::new(model, commit_prompt(diff, branch), SamplingOptions::COMMIT)
    }

    /// Request for the code review pass.
    pub fn review(model: &str, diff: &str) -> Self {
        Self::new(model, review_prompt(diff), SamplingOptions::REVIEW)
    }

    pub fn is_streamed(&self) -> bool {
        self.stream
    }
}
