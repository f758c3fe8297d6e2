//! HTTP embedding client, the single point of entry for embedding calls
//! over the network.
//!
//! Speaks the text-embeddings-inference protocol: `POST {endpoint}` with
//! `{"inputs": [...]}`, one vector per input back. Retries 429 and 5xx with
//! exponential backoff; every other failure surfaces as a typed `EmbedError`.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{EmbedError, Embedding, TextEmbedder, EMBEDDING_DIM, MODEL};

const REQUEST_TIMEOUT_SECS: u64 = 30;
const MAX_RETRIES: u32 = 3;

#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    inputs: &'a [String],
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: String,
}

/// Production embedder backed by an embedding service running [`MODEL`].
#[derive(Clone)]
pub struct HttpEmbedder {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpEmbedder {
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            endpoint: endpoint.into(),
            api_key,
        }
    }

    /// Makes the embedding call, retrying 429 and 5xx responses.
    async fn call(&self, texts: &[String]) -> Result<Vec<Embedding>, EmbedError> {
        let request_body = EmbedRequest { inputs: texts };

        let mut last_error: Option<EmbedError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s, 4s
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "embedding call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let mut request = self.client.post(&self.endpoint).json(&request_body);
            if let Some(key) = &self.api_key {
                request = request.bearer_auth(key);
            }

            let response = match request.send().await {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(EmbedError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("embedding API returned {}: {}", status, body);
                last_error = Some(EmbedError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                // Try to parse a structured error message
                let message = serde_json::from_str::<ApiError>(&body)
                    .map(|e| e.error)
                    .unwrap_or(body);
                return Err(EmbedError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let body = response.text().await.map_err(EmbedError::Http)?;
            let vectors: Vec<Embedding> = serde_json::from_str(&body)?;

            if vectors.len() != texts.len() {
                return Err(EmbedError::ShapeMismatch {
                    expected: texts.len(),
                    got: vectors.len(),
                });
            }
            if let Some(odd) = vectors.iter().find(|v| v.len() != EMBEDDING_DIM) {
                warn!(
                    got = odd.len(),
                    expected = EMBEDDING_DIM,
                    "embedding dimension differs from the configured model"
                );
            }

            debug!("embedded {} texts", vectors.len());
            return Ok(vectors);
        }

        Err(last_error.unwrap_or(EmbedError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }
}

#[async_trait]
impl TextEmbedder for HttpEmbedder {
    fn model_id(&self) -> &str {
        MODEL
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>, EmbedError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        self.call(texts).await
    }
}
