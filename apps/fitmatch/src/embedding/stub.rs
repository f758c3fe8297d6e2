//! Deterministic embedder for tests and offline index builds.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use async_trait::async_trait;

use super::{l2_normalize, EmbedError, Embedding, TextEmbedder, EMBEDDING_DIM};

/// Token-hash bag-of-words embedder. The same text always maps to the same
/// vector, and texts sharing tokens land weight on shared dimensions, so
/// cosine similarity stays meaningful without a model.
#[derive(Debug, Clone)]
pub struct HashEmbedder {
    dim: usize,
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self { dim: EMBEDDING_DIM }
    }
}

impl HashEmbedder {
    /// Smaller dimensions keep test fixtures readable.
    pub fn with_dim(dim: usize) -> Self {
        Self { dim }
    }

    fn embed_one(&self, text: &str) -> Embedding {
        let mut vector = vec![0.0_f32; self.dim];
        if self.dim == 0 {
            return vector;
        }
        for token in text.to_lowercase().split(|c: char| !c.is_alphanumeric()) {
            if token.is_empty() {
                continue;
            }
            let mut hasher = DefaultHasher::new();
            token.hash(&mut hasher);
            let slot = (hasher.finish() % self.dim as u64) as usize;
            vector[slot] += 1.0;
        }
        l2_normalize(&mut vector);
        vector
    }
}

#[async_trait]
impl TextEmbedder for HashEmbedder {
    fn model_id(&self) -> &str {
        "hash-embedder"
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>, EmbedError> {
        Ok(texts.iter().map(|t| self.embed_one(t)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::similarity::cosine_similarity;

    #[tokio::test]
    async fn test_same_text_same_vector() {
        let embedder = HashEmbedder::default();
        let a = embedder.embed("Python developer in Berlin").await.unwrap();
        let b = embedder.embed("Python developer in Berlin").await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_vectors_are_unit_length() {
        let embedder = HashEmbedder::default();
        let v = embedder.embed("docker kubernetes aws").await.unwrap();
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5, "norm was {norm}");
    }

    #[tokio::test]
    async fn test_empty_text_is_zero_vector() {
        let embedder = HashEmbedder::with_dim(8);
        let v = embedder.embed("").await.unwrap();
        assert_eq!(v, vec![0.0; 8]);
    }

    #[tokio::test]
    async fn test_shared_tokens_raise_similarity() {
        // Bag-of-words weights are non-negative, so any shared token
        // guarantees a strictly positive dot product.
        let embedder = HashEmbedder::default();
        let a = embedder.embed("senior python engineer").await.unwrap();
        let b = embedder.embed("python analyst").await.unwrap();
        assert!(cosine_similarity(&a, &b) > 0.0);
    }

    #[tokio::test]
    async fn test_identical_texts_score_one() {
        let embedder = HashEmbedder::default();
        let a = embedder.embed("cloud native platform work").await.unwrap();
        let sim = cosine_similarity(&a, &a);
        assert!((sim - 1.0).abs() < 1e-5, "got {sim}");
    }

    #[tokio::test]
    async fn test_batch_preserves_order() {
        let embedder = HashEmbedder::with_dim(32);
        let texts = vec!["first text".to_string(), "second text".to_string()];
        let batch = embedder.embed_batch(&texts).await.unwrap();
        assert_eq!(batch[0], embedder.embed("first text").await.unwrap());
        assert_eq!(batch[1], embedder.embed("second text").await.unwrap());
    }
}
