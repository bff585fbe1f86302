//! HTTP client for a local Ollama-compatible model endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tokio::time::{Instant, timeout_at};
use tracing::debug;

use crate::error::OllamaError;

use super::request::GenerationRequest;
use super::stream::StreamAccumulator;

/// Connection establishment timeout for the model endpoint.
const CONNECT_TIMEOUT_SECS: u64 = 5;

/// Trait for sending generation requests to a model.
///
/// This abstraction allows mocking the model endpoint in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Generator: Send + Sync {
    /// Send `request` and return the full, trimmed response text.
    async fn generate(&self, request: &GenerationRequest) -> Result<String, OllamaError>;
}

/// Client for the `/api/generate` streaming endpoint.
pub struct OllamaClient {
    endpoint: String,
    client: Client,
}

impl OllamaClient {
    /// Create a client for the endpoint base URL (e.g. `http://localhost:11434`).
    pub fn new(endpoint: &str) -> Result<Self, OllamaError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(OllamaError::ClientBuild)?;

        Ok(Self {
            endpoint: endpoint.trim().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn generate_url(&self) -> String {
        format!("{}/api/generate", self.endpoint)
    }
}

#[async_trait]
impl Generator for OllamaClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, OllamaError> {
        let url = self.generate_url();
        debug!(
            "POST {} (model={}, prompt={} chars)",
            url,
            request.model,
            request.prompt.len()
        );

        let mut response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|source| OllamaError::Network {
                endpoint: self.endpoint.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OllamaError::HttpStatus {
                status: status.as_u16(),
                body: body.trim().to_string(),
            });
        }

        let mut acc = StreamAccumulator::new();
        while let Some(chunk) = response.chunk().await.map_err(OllamaError::Stream)? {
            acc.push(&chunk);
            if acc.is_done() {
                break;
            }
        }

        let text = acc.finish();
        debug!("Received {} chars from {}", text.len(), request.model);
        Ok(text.trim().to_string())
    }
}

/// Run a generation bound to `deadline`.
///
/// A deadline that has already passed fails without sending anything. When
/// the deadline fires mid-request the in-flight future is dropped, which
/// aborts the HTTP call; any partially streamed text is discarded.
pub async fn generate_with_deadline<G>(
    generator: &G,
    request: &GenerationRequest,
    deadline: Instant,
) -> Result<String, OllamaError>
where
    G: Generator + ?Sized,
{
    if Instant::now() >= deadline {
        return Err(OllamaError::Timeout);
    }

    timeout_at(deadline, generator.generate(request))
        .await
        .map_err(|_| OllamaError::Timeout)?
}
