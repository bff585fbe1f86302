//! Streaming client for the local model endpoint.

pub mod client;
pub mod request;
pub mod stream;

pub use client::{Generator, OllamaClient, generate_with_deadline};
pub use request::{GenerationRequest, SamplingOptions};
pub use stream::{StreamAccumulator, StreamFragment, accumulate};
