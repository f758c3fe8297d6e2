//! Splits documents into overlapping chunks for indexing.
//!
//! The window slides over whitespace-delimited words with a character
//! budget per chunk, so a chunk never cuts a word in half.

use serde::{Deserialize, Serialize};

use crate::errors::EngineError;

/// Default chunk budget in characters.
pub const DEFAULT_CHUNK_CHARS: usize = 1000;

/// Default overlap between consecutive chunks, in characters.
pub const DEFAULT_CHUNK_OVERLAP: usize = 150;

/// Trailing chunks shorter than this are dropped (they mostly repeat the
/// previous chunk's overlap).
pub const MIN_CHUNK_CHARS: usize = 50;

/// Configuration for document chunking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkConfig {
    /// Character budget per chunk.
    pub chunk_chars: usize,
    /// Characters of overlap carried into the next chunk.
    pub chunk_overlap: usize,
    /// Minimum size for a trailing chunk.
    pub min_chunk_chars: usize,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            chunk_chars: DEFAULT_CHUNK_CHARS,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
            min_chunk_chars: MIN_CHUNK_CHARS,
        }
    }
}

impl ChunkConfig {
    /// Creates a config with the given budget and overlap.
    pub fn new(chunk_chars: usize, chunk_overlap: usize) -> Result<Self, EngineError> {
        if chunk_chars == 0 {
            return Err(EngineError::Validation(
                "chunk_chars must be greater than 0".to_string(),
            ));
        }
        if chunk_overlap >= chunk_chars {
            return Err(EngineError::Validation(format!(
                "chunk_overlap ({chunk_overlap}) must be less than chunk_chars ({chunk_chars})"
            )));
        }
        Ok(Self {
            chunk_chars,
            chunk_overlap,
            ..Default::default()
        })
    }

    /// Sets the minimum trailing-chunk size.
    pub fn with_min_chunk_chars(mut self, min: usize) -> Self {
        self.min_chunk_chars = min;
        self
    }

    /// Splits `content` into overlapping chunks.
    ///
    /// Words are joined with single spaces, so whitespace runs in the input
    /// do not survive into chunk text. `start`/`end` are char offsets into
    /// that normalized stream. A word longer than the whole budget still
    /// gets a chunk of its own.
    pub fn chunk_text(&self, content: &str) -> Vec<TextChunk> {
        let words: Vec<&str> = content.split_whitespace().collect();
        if words.is_empty() {
            return Vec::new();
        }

        // Char length of every word, plus its offset in the joined stream.
        let lens: Vec<usize> = words.iter().map(|w| w.chars().count()).collect();
        let mut offsets = Vec::with_capacity(words.len());
        let mut pos = 0;
        for len in &lens {
            offsets.push(pos);
            pos += len + 1; // trailing space
        }

        let mut chunks = Vec::new();
        let mut start_word = 0;

        loop {
            // Greedily extend the window while the budget holds.
            let mut end_word = start_word + 1;
            let mut chunk_len = lens[start_word];
            while end_word < words.len() && chunk_len + 1 + lens[end_word] <= self.chunk_chars {
                chunk_len += 1 + lens[end_word];
                end_word += 1;
            }

            chunks.push(TextChunk {
                start: offsets[start_word],
                end: offsets[end_word - 1] + lens[end_word - 1],
                text: words[start_word..end_word].join(" "),
            });

            if end_word == words.len() {
                break;
            }

            // Walk back from the window edge to build the overlap.
            let mut overlap_start = end_word;
            let mut overlap_len = 0;
            while overlap_start > start_word + 1 {
                let extra = lens[overlap_start - 1] + if overlap_len > 0 { 1 } else { 0 };
                if overlap_len + extra > self.chunk_overlap {
                    break;
                }
                overlap_len += extra;
                overlap_start -= 1;
            }
            start_word = overlap_start.max(start_word + 1);
        }

        // The final window can be mostly overlap; drop it when undersized.
        if chunks.len() > 1 {
            let undersized = chunks
                .last()
                .map(|c| c.text.chars().count() < self.min_chunk_chars)
                .unwrap_or(false);
            if undersized {
                chunks.pop();
            }
        }

        chunks
    }
}

/// One chunk of a source document.
#[derive(Debug, Clone)]
pub struct TextChunk {
    /// Char offset of the chunk start in the normalized text.
    pub start: usize,
    /// Char offset one past the chunk end.
    pub end: usize,
    /// The chunk content, words joined by single spaces.
    pub text: String,
}
