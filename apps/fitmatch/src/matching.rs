//! Match scoring: combines embedding similarity, skill overlap, and a
//! retrieval bonus into a single 0–100 fit score.
//!
//! Scoring is fail-soft: a broken embedder or retriever zeroes its own
//! signal and leaves a note in the breakdown instead of failing the match.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::embedding::TextEmbedder;
use crate::retrieval::{try_retrieve_context, KnowledgeRetriever};
use crate::similarity::cosine_similarity;
use crate::skills::{common_skills, missing_skills, SkillSet, SkillVocabulary};
use crate::text::{clean_text, truncate_chars};

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

/// Which scoring signal a failure note refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreSignal {
    TextSimilarity,
    RagBonus,
}

/// A signal that could not be computed. The affected signal contributes
/// zero; the rest of the breakdown still stands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalFailure {
    pub signal: ScoreSignal,
    pub detail: String,
}

/// Full score report returned to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub final_score: f64,     // 0 – 100
    pub text_similarity: f64, // 0 – 100
    pub skill_match: f64,     // 0 – 100
    pub rag_bonus: f64,       // 0 – rag_bonus_cap
    pub cv_skills: SkillSet,
    pub job_skills: SkillSet,
    pub common_skills: SkillSet,
    pub missing_skills: SkillSet,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<SignalFailure>,
}

/// A scoring request: the two texts plus optionally pre-fetched context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRequest {
    pub cv_text: String,
    pub job_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retrieved_context: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Scoring policy
// ────────────────────────────────────────────────────────────────────────────

/// Tunable scoring constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScorePolicy {
    /// Skill ratio assumed when the target side lists no recognized skills.
    pub neutral_skill_ratio: f64,
    /// Upper bound on the retrieval bonus.
    pub rag_bonus_cap: f64,
    /// Divisor applied to the summed signals.
    pub signal_divisor: f64,
    /// Inputs longer than this many chars are truncated before scoring.
    pub max_input_chars: usize,
}

impl Default for ScorePolicy {
    fn default() -> Self {
        Self {
            neutral_skill_ratio: 0.5,
            rag_bonus_cap: 10.0,
            signal_divisor: 2.0,
            max_input_chars: 4000,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Engine
// ────────────────────────────────────────────────────────────────────────────

/// Scores CV texts against job postings.
///
/// Holds its collaborators behind trait objects so the embedding backend can
/// be swapped without touching scoring code.
pub struct MatchEngine {
    embedder: Arc<dyn TextEmbedder>,
    vocabulary: SkillVocabulary,
    policy: ScorePolicy,
}

impl MatchEngine {
    pub fn new(embedder: Arc<dyn TextEmbedder>) -> Self {
        Self {
            embedder,
            vocabulary: SkillVocabulary::default(),
            policy: ScorePolicy::default(),
        }
    }

    pub fn with_vocabulary(mut self, vocabulary: SkillVocabulary) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    pub fn with_policy(mut self, policy: ScorePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Scores a request, using its pre-fetched context when present.
    pub async fn score(&self, request: &MatchRequest) -> ScoreBreakdown {
        let context = request.retrieved_context.as_deref().unwrap_or("");
        self.score_inner(&request.cv_text, &request.job_text, context, Vec::new())
            .await
    }

    /// Scores a CV against a job posting with already-retrieved context.
    /// Pass an empty context to score without a retrieval bonus.
    pub async fn calculate_final_score(
        &self,
        cv_text: &str,
        job_text: &str,
        context: &str,
    ) -> ScoreBreakdown {
        self.score_inner(cv_text, job_text, context, Vec::new())
            .await
    }

    /// Retrieves supporting context for the job posting, then scores.
    ///
    /// A failing retriever zeroes the bonus and leaves a note in `errors`.
    pub async fn score_with_retrieval(
        &self,
        cv_text: &str,
        job_text: &str,
        retriever: &dyn KnowledgeRetriever,
        k: usize,
    ) -> ScoreBreakdown {
        let mut failures = Vec::new();
        let context = match try_retrieve_context(retriever, job_text, k).await {
            Ok(context) => context,
            Err(e) => {
                warn!("context retrieval failed, scoring without a bonus: {e}");
                failures.push(SignalFailure {
                    signal: ScoreSignal::RagBonus,
                    detail: e.to_string(),
                });
                String::new()
            }
        };
        self.score_inner(cv_text, job_text, &context, failures).await
    }

    async fn score_inner(
        &self,
        cv_text: &str,
        job_text: &str,
        context: &str,
        mut failures: Vec<SignalFailure>,
    ) -> ScoreBreakdown {
        let cv_clean = clean_text(cv_text);
        let job_clean = clean_text(job_text);
        let cv = truncate_chars(&cv_clean, self.policy.max_input_chars);
        let job = truncate_chars(&job_clean, self.policy.max_input_chars);

        let cv_skills = self.vocabulary.extract(&cv);
        let job_skills = self.vocabulary.extract(&job);

        let text_similarity = match self
            .embedder
            .embed_batch(&[cv.to_string(), job.to_string()])
            .await
        {
            Ok(embeddings) if embeddings.len() == 2 => {
                let cos = cosine_similarity(&embeddings[0], &embeddings[1]);
                (f64::from(cos) * 100.0).clamp(0.0, 100.0)
            }
            Ok(embeddings) => {
                failures.push(SignalFailure {
                    signal: ScoreSignal::TextSimilarity,
                    detail: format!("embedder returned {} vectors for 2 inputs", embeddings.len()),
                });
                0.0
            }
            Err(e) => {
                warn!("embedding failed, text similarity treated as zero: {e}");
                failures.push(SignalFailure {
                    signal: ScoreSignal::TextSimilarity,
                    detail: e.to_string(),
                });
                0.0
            }
        };

        let skill_match =
            skill_overlap_ratio(&cv_skills, &job_skills, self.policy.neutral_skill_ratio) * 100.0;

        // Any non-empty context string takes the overlap path, even pure
        // whitespace; only a truly absent context earns a hard zero.
        let rag_bonus = if context.is_empty() {
            0.0
        } else {
            let context_skills = self.vocabulary.extract(context);
            skill_overlap_ratio(&cv_skills, &context_skills, self.policy.neutral_skill_ratio)
                * self.policy.rag_bonus_cap
        };

        let combined = (text_similarity + skill_match + rag_bonus) / self.policy.signal_divisor;
        let final_score = combined.clamp(0.0, 100.0);

        debug!(
            final_score,
            text_similarity, skill_match, rag_bonus, "match scored"
        );

        ScoreBreakdown {
            final_score: round1(final_score),
            text_similarity: round1(text_similarity),
            skill_match: round1(skill_match),
            rag_bonus: round1(rag_bonus),
            common_skills: common_skills(&cv_skills, &job_skills),
            missing_skills: missing_skills(&cv_skills, &job_skills),
            cv_skills,
            job_skills,
            errors: failures,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Core scoring helpers
// ────────────────────────────────────────────────────────────────────────────

/// Fraction of `target` skills present in `held`.
///
/// An empty target cannot distinguish candidates, so it maps to the neutral
/// ratio rather than to zero or a perfect hit.
fn skill_overlap_ratio(held: &SkillSet, target: &SkillSet, neutral: f64) -> f64 {
    if target.is_empty() {
        return neutral;
    }
    let overlap = held.intersection(target).count() as f64;
    (overlap / target.len() as f64).min(1.0)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
