//! End-to-end commit message pipeline.
//!
//! Collects the staged diff and branch, optionally asks the model for a
//! review, generates the commit record, and hands the assembled message to
//! git. The review and generation calls share one deadline.

use std::path::PathBuf;

use tokio::time::Instant;
use tracing::{debug, info};

use crate::commit::{Message, assemble, parse};
use crate::config::Settings;
use crate::error::{OllamaError, PipelineError};
use crate::git::GitRepository;
use crate::ollama::{GenerationRequest, Generator, generate_with_deadline};
use crate::review::Review;
use crate::text::trim_to;

/// Result of a successful drafting run.
#[derive(Debug)]
pub struct Draft {
    pub branch: String,
    /// Diff as sent to the model, after the byte cap.
    pub diff: String,
    /// `None` when review was not requested. A failed review is kept as its
    /// error so the caller can warn about it.
    pub review: Option<Result<Review, OllamaError>>,
    pub message: Message,
}

/// What happened to the drafted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Hook(PathBuf),
    Committed,
    Printed,
}

/// Drives a repository and a model through one commit.
pub struct Pipeline<'a, R: ?Sized, G: ?Sized> {
    repo: &'a R,
    generator: &'a G,
    settings: &'a Settings,
}

impl<'a, R, G> Pipeline<'a, R, G>
where
    R: GitRepository + ?Sized,
    G: Generator + ?Sized,
{
    pub fn new(repo: &'a R, generator: &'a G, settings: &'a Settings) -> Self {
        Self {
            repo,
            generator,
            settings,
        }
    }

    /// Produce a commit message for the staged changes.
    ///
    /// Every model call must finish before `deadline`.
    pub async fn draft(&self, deadline: Instant) -> Result<Draft, PipelineError> {
        let staged = self.repo.staged_diff()?;
        if staged.trim().is_empty() {
            return Err(PipelineError::NoStagedChanges);
        }

        let diff = trim_to(&staged, self.settings.max_bytes);
        if diff.len() < staged.len() {
            info!(
                "Diff truncated from {} to {} bytes",
                staged.len(),
                diff.len()
            );
        }

        let branch = self.repo.current_branch()?;
        debug!("Drafting commit on branch '{}'", branch);

        let review = if self.settings.review {
            Some(self.review(&diff, deadline).await)
        } else {
            None
        };

        let request = GenerationRequest::commit(&self.settings.model, &diff, &branch);
        let raw = generate_with_deadline(self.generator, &request, deadline)
            .await
            .map_err(PipelineError::Generation)?;
        debug!("Model response: {}", raw);

        let parts = parse(&raw);
        let message = assemble(&branch, &parts);
        if message.headline.is_empty() {
            return Err(PipelineError::EmptyHeadline);
        }

        Ok(Draft {
            branch,
            diff,
            review,
            message,
        })
    }

    async fn review(&self, diff: &str, deadline: Instant) -> Result<Review, OllamaError> {
        let request = GenerationRequest::review(self.settings.review_model(), diff);
        match generate_with_deadline(self.generator, &request, deadline).await {
            Ok(raw) => {
                let review = Review::from_response(&raw);
                debug!(
                    "Review: clean={}, {} findings",
                    review.is_clean(),
                    review.findings().len()
                );
                Ok(review)
            }
            Err(e) => {
                debug!("Review failed: {}", e);
                Err(e)
            }
        }
    }

    /// Write the message to the hook file, commit it, or leave it for printing.
    pub fn deliver(&self, message: &Message) -> Result<Delivery, PipelineError> {
        if message.headline.trim().is_empty() {
            return Err(PipelineError::EmptyHeadline);
        }

        if let Some(path) = &self.settings.hook_path {
            self.repo.write_hook(path, &message.format())?;
            return Ok(Delivery::Hook(path.clone()));
        }

        if self.settings.commit {
            self.repo.commit(&message.headline, &message.body)?;
            return Ok(Delivery::Committed);
        }

        Ok(Delivery::Printed)
    }
}
