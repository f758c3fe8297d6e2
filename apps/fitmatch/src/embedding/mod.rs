// Embedding provider seam.
// Production: HttpEmbedder speaking the text-embeddings-inference protocol.
// Tests and offline builds: HashEmbedder, deterministic and network-free.

pub mod http;
pub mod stub;

pub use http::HttpEmbedder;
pub use stub::HashEmbedder;

use async_trait::async_trait;
use thiserror::Error;

/// Fixed-length vector representing the semantics of one text.
pub type Embedding = Vec<f32>;

/// The embedding model every vector in the system comes from.
/// Hardcoded: an index built with one model must never be queried with another.
pub const MODEL: &str = "sentence-transformers/all-MiniLM-L6-v2";

/// Output dimension of [`MODEL`].
pub const EMBEDDING_DIM: usize = 384;

#[derive(Debug, Error)]
pub enum EmbedError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("Embedding count mismatch: sent {expected} texts, got {got} vectors")]
    ShapeMismatch { expected: usize, got: usize },
}

/// Narrow seam for "embed text". Carried as `Arc<dyn TextEmbedder>` so the
/// scoring arithmetic stays testable without any network dependency.
#[async_trait]
pub trait TextEmbedder: Send + Sync {
    /// Identifier of the underlying model, recorded in index snapshots.
    fn model_id(&self) -> &str;

    /// Embeds a batch of texts. Returns one vector per input, same order.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>, EmbedError>;

    /// Embeds a single text.
    async fn embed(&self, text: &str) -> Result<Embedding, EmbedError> {
        let batch = [text.to_string()];
        let mut vectors = self.embed_batch(&batch).await?;
        if vectors.len() != 1 {
            return Err(EmbedError::ShapeMismatch {
                expected: 1,
                got: vectors.len(),
            });
        }
        Ok(vectors.remove(0))
    }
}

/// Scales `vec` to unit length in place. Zero vectors are left untouched.
pub fn l2_normalize(vec: &mut [f32]) {
    let norm = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in vec.iter_mut() {
            *x /= norm;
        }
    }
}
