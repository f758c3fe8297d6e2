//! Builds the knowledge index snapshot from a directory of documents.
//!
//! Reads `*.txt` files from `DOCUMENTS_DIR`, chunks and embeds them against
//! the configured embedding endpoint, and writes the snapshot to
//! `INDEX_PATH` for the scoring engine to load.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use fitmatch::config::Config;
use fitmatch::embedding::{self, HttpEmbedder};
use fitmatch::retrieval::{build_index_from_dir, ChunkConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (errors on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging. The fallback directive is a bare level
    // so it covers both the library target and this binary's own target.
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.rust_log)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting index build v{}", env!("CARGO_PKG_VERSION"));

    let embedder = Arc::new(HttpEmbedder::new(
        config.embedding_endpoint.clone(),
        config.embedding_api_key.clone(),
    ));
    info!("Embedding client initialized (model: {})", embedding::MODEL);

    let chunking = ChunkConfig::new(config.chunk_chars, config.chunk_overlap)?;

    let documents_dir = Path::new(&config.documents_dir);
    let (index, stats) = build_index_from_dir(documents_dir, embedder, &chunking).await?;

    let index_path = Path::new(&config.index_path);
    index.save(index_path)?;

    info!(
        documents = stats.documents,
        chunks = stats.chunks,
        skipped = stats.skipped,
        "Index written to {}",
        index_path.display()
    );

    Ok(())
}
