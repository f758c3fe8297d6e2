// Knowledge retrieval: the nearest-neighbor seam, its in-memory index,
// document chunking, and directory ingestion.

pub mod chunker;
pub mod index;
pub mod ingest;

pub use chunker::{ChunkConfig, TextChunk};
pub use index::{InMemoryIndex, IndexedChunk};
pub use ingest::{build_index_from_dir, IngestStats};

use async_trait::async_trait;
use tracing::warn;

use crate::errors::EngineError;
use crate::text::truncate_chars;

/// How much of the job text seeds the retrieval query.
const QUERY_PREVIEW_CHARS: usize = 200;

/// One `similarity_search` hit.
#[derive(Debug, Clone)]
pub struct RetrievedChunk {
    pub text: String,
    pub source: String,
    pub score: f32,
}

/// Seam for "find chunks similar to this query".
///
/// Implementations return at most `k` hits in descending relevance, and an
/// empty list when nothing relevant is indexed.
#[async_trait]
pub trait KnowledgeRetriever: Send + Sync {
    async fn similarity_search(
        &self,
        query: &str,
        k: usize,
    ) -> Result<Vec<RetrievedChunk>, EngineError>;
}

/// Fetches and formats supporting context for a job posting.
///
/// A failing retriever degrades to an empty context rather than propagating
/// the error; scoring then proceeds with a zero bonus.
pub async fn retrieve_context(
    retriever: &dyn KnowledgeRetriever,
    job_text: &str,
    k: usize,
) -> String {
    match try_retrieve_context(retriever, job_text, k).await {
        Ok(context) => context,
        Err(e) => {
            warn!("context retrieval failed, continuing without it: {e}");
            String::new()
        }
    }
}

/// Fallible variant of [`retrieve_context`] for callers that want the
/// failure reason.
pub async fn try_retrieve_context(
    retriever: &dyn KnowledgeRetriever,
    job_text: &str,
    k: usize,
) -> Result<String, EngineError> {
    let query = truncate_chars(job_text, QUERY_PREVIEW_CHARS);
    let hits = retriever.similarity_search(&query, k).await?;
    Ok(format_context(&hits))
}

/// Renders hits as source-labeled sections separated by blank lines.
pub fn format_context(hits: &[RetrievedChunk]) -> String {
    hits.iter()
        .enumerate()
        .map(|(i, hit)| format!("--- DOCUMENT {} ({}) ---\n{}", i + 1, hit.source, hit.text))
        .collect::<Vec<_>>()
        .join("\n\n")
}
