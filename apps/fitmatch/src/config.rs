use anyhow::{Context, Result};

/// Engine configuration loaded from environment variables.
/// Only the embedding endpoint is required; every knob has a default.
#[derive(Debug, Clone)]
pub struct Config {
    pub embedding_endpoint: String,
    pub embedding_api_key: Option<String>,
    pub retrieval_k: usize,
    pub chunk_chars: usize,
    pub chunk_overlap: usize,
    pub max_input_chars: usize,
    pub documents_dir: String,
    pub index_path: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            embedding_endpoint: require_env("EMBEDDING_ENDPOINT")?,
            embedding_api_key: std::env::var("EMBEDDING_API_KEY").ok(),
            retrieval_k: parse_env("RETRIEVAL_K", 3)?,
            chunk_chars: parse_env("CHUNK_CHARS", 1000)?,
            chunk_overlap: parse_env("CHUNK_OVERLAP", 150)?,
            max_input_chars: parse_env("MAX_INPUT_CHARS", 4000)?,
            documents_dir: std::env::var("DOCUMENTS_DIR")
                .unwrap_or_else(|_| "documents".to_string()),
            index_path: std::env::var("INDEX_PATH")
                .unwrap_or_else(|_| "knowledge_index.json".to_string()),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env(key: &str, default: usize) -> Result<usize> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<usize>()
            .with_context(|| format!("{key} must be a non-negative integer")),
        Err(_) => Ok(default),
    }
}
