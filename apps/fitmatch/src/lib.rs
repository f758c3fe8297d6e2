//! fitmatch scores how well a CV fits a job posting.
//!
//! Three signals feed the score: embedding cosine similarity between the two
//! texts, overlap between their recognized skills, and a bonus from
//! knowledge-base context retrieved for the posting. [`MatchEngine`] combines
//! them; [`InMemoryIndex`] serves the retrieval side; the `build_index`
//! binary turns a directory of plain-text documents into the index snapshot
//! the engine loads at startup.

pub mod config;
pub mod embedding;
pub mod errors;
pub mod matching;
pub mod retrieval;
pub mod similarity;
pub mod skills;
pub mod text;

pub use config::Config;
pub use embedding::{
    EmbedError, Embedding, HashEmbedder, HttpEmbedder, TextEmbedder, EMBEDDING_DIM, MODEL,
};
pub use errors::EngineError;
pub use matching::{
    MatchEngine, MatchRequest, ScoreBreakdown, ScorePolicy, ScoreSignal, SignalFailure,
};
pub use retrieval::{
    build_index_from_dir, retrieve_context, ChunkConfig, InMemoryIndex, IngestStats,
    KnowledgeRetriever, RetrievedChunk,
};
pub use similarity::cosine_similarity;
pub use skills::{SkillSet, SkillVocabulary};
