//! commitgen - Generates commit messages for staged changes with a local model.
//!
//! # Overview
//!
//! commitgen reads the staged diff, asks a local Ollama-compatible model for a
//! structured commit record, and turns the reply into a
//! `<ticket> [<type>] <description>` headline with an optional body. Replies
//! that are not valid JSON are salvaged heuristically, so a run only fails
//! when the model cannot be reached or nothing is staged. An optional review
//! pass asks the model for findings before the message is generated.

pub mod commit;
pub mod config;
pub mod error;
pub mod git;
pub mod ollama;
pub mod pipeline;
pub mod review;
pub mod text;

// Re-export commonly used types
pub use commit::{CommitType, Message, Parts, assemble, extract_ticket, normalize_commit_type, parse};
pub use config::{Overrides, Settings};
pub use error::{GitError, OllamaError, ParseError, PipelineError};
pub use git::{GitRepository, LocalRepository};
pub use ollama::{GenerationRequest, Generator, OllamaClient, SamplingOptions};
pub use pipeline::{Delivery, Draft, Pipeline};
pub use review::Review;
