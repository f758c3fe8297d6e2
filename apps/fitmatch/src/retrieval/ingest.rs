//! Builds the knowledge index from a directory of plain-text documents.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::embedding::TextEmbedder;
use crate::errors::EngineError;
use crate::retrieval::chunker::ChunkConfig;
use crate::retrieval::index::InMemoryIndex;
use crate::text::clean_text;

/// Counters reported after an ingestion run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IngestStats {
    pub documents: usize,
    pub chunks: usize,
    pub skipped: usize,
}

/// Reads every `*.txt` file under `dir` (sorted by name), chunks and embeds
/// each, and returns the populated index.
///
/// Unreadable and empty files are logged and skipped so one bad document
/// cannot abort a rebuild. An unreadable directory or a failing embedder is
/// still an error.
pub async fn build_index_from_dir(
    dir: &Path,
    embedder: Arc<dyn TextEmbedder>,
    config: &ChunkConfig,
) -> Result<(InMemoryIndex, IngestStats), EngineError> {
    let mut index = InMemoryIndex::new(embedder);
    let mut stats = IngestStats::default();

    let mut paths: Vec<_> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().map(|ext| ext == "txt").unwrap_or(false))
        .collect();
    paths.sort();

    for path in paths {
        let source = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("unnamed.txt")
            .to_string();

        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(file = %path.display(), "skipping unreadable document: {e}");
                stats.skipped += 1;
                continue;
            }
        };

        let content = clean_text(&raw);
        if content.is_empty() {
            warn!(file = %path.display(), "skipping empty document");
            stats.skipped += 1;
            continue;
        }

        let added = index.add_document(&source, &content, config).await?;
        stats.documents += 1;
        stats.chunks += added;
    }

    info!(
        documents = stats.documents,
        chunks = stats.chunks,
        skipped = stats.skipped,
        "ingestion complete"
    );
    Ok((index, stats))
}
