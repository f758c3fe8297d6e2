//! In-memory vector index with JSON snapshot persistence.

use std::cmp::Ordering;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::embedding::{Embedding, TextEmbedder};
use crate::errors::EngineError;
use crate::retrieval::chunker::ChunkConfig;
use crate::retrieval::{KnowledgeRetriever, RetrievedChunk};
use crate::similarity::cosine_similarity;

/// One embedded chunk stored in the index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexedChunk {
    pub id: Uuid,
    pub source: String,
    pub text: String,
    pub embedding: Embedding,
}

/// On-disk form of the index.
#[derive(Debug, Serialize, Deserialize)]
struct IndexSnapshot {
    model: String,
    dim: usize,
    created_at: DateTime<Utc>,
    chunks: Vec<IndexedChunk>,
}

/// Nearest-neighbor search over embedded document chunks.
///
/// Mutable while being built, then shared read-only behind an `Arc`;
/// concurrent searches never write to it.
pub struct InMemoryIndex {
    embedder: Arc<dyn TextEmbedder>,
    chunks: Vec<IndexedChunk>,
}

impl InMemoryIndex {
    pub fn new(embedder: Arc<dyn TextEmbedder>) -> Self {
        Self {
            embedder,
            chunks: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Chunks and embeds one document, storing every chunk under `source`.
    /// Returns the number of chunks added.
    pub async fn add_document(
        &mut self,
        source: &str,
        content: &str,
        config: &ChunkConfig,
    ) -> Result<usize, EngineError> {
        let chunks = config.chunk_text(content);
        if chunks.is_empty() {
            return Ok(0);
        }

        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;

        let added = chunks.len();
        for (chunk, embedding) in chunks.into_iter().zip(embeddings) {
            self.chunks.push(IndexedChunk {
                id: Uuid::new_v4(),
                source: source.to_string(),
                text: chunk.text,
                embedding,
            });
        }

        debug!(source, added, "document indexed");
        Ok(added)
    }

    /// Writes the index as a JSON snapshot.
    pub fn save(&self, path: &Path) -> Result<(), EngineError> {
        let snapshot = IndexSnapshot {
            model: self.embedder.model_id().to_string(),
            dim: self.chunks.first().map(|c| c.embedding.len()).unwrap_or(0),
            created_at: Utc::now(),
            chunks: self.chunks.clone(),
        };
        let file = std::fs::File::create(path)?;
        let mut writer = std::io::BufWriter::new(file);
        serde_json::to_writer(&mut writer, &snapshot)?;
        writer.flush()?;
        info!(path = %path.display(), chunks = self.chunks.len(), "index snapshot written");
        Ok(())
    }

    /// Restores an index from a snapshot.
    ///
    /// The snapshot records which model produced its embeddings; loading it
    /// with an embedder running a different model is rejected.
    pub fn load(path: &Path, embedder: Arc<dyn TextEmbedder>) -> Result<Self, EngineError> {
        let file = std::fs::File::open(path)?;
        let snapshot: IndexSnapshot = serde_json::from_reader(std::io::BufReader::new(file))?;
        if snapshot.model != embedder.model_id() {
            return Err(EngineError::Validation(format!(
                "index snapshot was built with model '{}' but the embedder runs '{}'",
                snapshot.model,
                embedder.model_id()
            )));
        }
        info!(path = %path.display(), chunks = snapshot.chunks.len(), "index snapshot loaded");
        Ok(Self {
            embedder,
            chunks: snapshot.chunks,
        })
    }

    /// Scores every chunk against the query embedding, best first.
    fn rank(&self, query_embedding: &[f32], k: usize) -> Vec<RetrievedChunk> {
        let mut hits: Vec<RetrievedChunk> = self
            .chunks
            .iter()
            .map(|chunk| RetrievedChunk {
                text: chunk.text.clone(),
                source: chunk.source.clone(),
                score: cosine_similarity(query_embedding, &chunk.embedding),
            })
            .collect();

        hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        hits.truncate(k);
        hits
    }
}

#[async_trait]
impl KnowledgeRetriever for InMemoryIndex {
    async fn similarity_search(
        &self,
        query: &str,
        k: usize,
    ) -> Result<Vec<RetrievedChunk>, EngineError> {
        if self.chunks.is_empty() || k == 0 {
            return Ok(Vec::new());
        }
        let query_embedding = self.embedder.embed(query).await?;
        Ok(self.rank(&query_embedding, k))
    }
}
