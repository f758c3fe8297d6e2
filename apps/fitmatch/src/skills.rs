//! Skill extraction over a fixed, injected vocabulary.
//!
//! Matching is case-insensitive substring search against a lowercased
//! haystack. Terms are normalized once at construction; extraction itself
//! never errors and rebuilds its result set fresh on every call.

use std::collections::BTreeSet;

/// Ordered set of recognized skill tokens. Comparisons downstream use set
/// semantics, so ordering only affects presentation.
pub type SkillSet = BTreeSet<String>;

/// Default vocabulary: languages, platforms, tooling, and soft skills.
pub const DEFAULT_VOCABULARY: [&str; 24] = [
    "python",
    "java",
    "javascript",
    "react",
    "node.js",
    "sql",
    "mongodb",
    "docker",
    "kubernetes",
    "aws",
    "azure",
    "git",
    "agile",
    "scrum",
    "machine learning",
    "ai",
    "data science",
    "analytics",
    "project management",
    "leadership",
    "communication",
    "teamwork",
    "problem solving",
    "analytical thinking",
];

/// Immutable vocabulary handed to the engine at construction. Swappable per
/// deployment or per test; never a process-wide mutable global.
#[derive(Debug, Clone)]
pub struct SkillVocabulary {
    terms: Vec<String>,
}

impl Default for SkillVocabulary {
    fn default() -> Self {
        Self::new(DEFAULT_VOCABULARY)
    }
}

impl SkillVocabulary {
    /// Builds a vocabulary from arbitrary terms: lowercased, trimmed,
    /// deduplicated, empty entries dropped.
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = BTreeSet::new();
        let mut normalized = Vec::new();
        for term in terms {
            let term = term.into().trim().to_lowercase();
            if !term.is_empty() && seen.insert(term.clone()) {
                normalized.push(term);
            }
        }
        Self { terms: normalized }
    }

    /// Extracts every vocabulary term appearing as a case-insensitive
    /// substring of `text`. Empty input yields an empty set.
    ///
    /// Substring semantics are intentional and coarse: "javascript" in the
    /// input also matches the term "java".
    pub fn extract(&self, text: &str) -> SkillSet {
        if text.is_empty() {
            return SkillSet::new();
        }
        let haystack = text.to_lowercase();
        self.terms
            .iter()
            .filter(|term| haystack.contains(term.as_str()))
            .cloned()
            .collect()
    }
}

/// Skills present in both sets (cv ∩ job).
pub fn common_skills(cv: &SkillSet, job: &SkillSet) -> SkillSet {
    cv.intersection(job).cloned().collect()
}

/// Skills the job asks for that the cv lacks (job − cv).
pub fn missing_skills(cv: &SkillSet, job: &SkillSet) -> SkillSet {
    job.difference(cv).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> SkillSet {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_extract_with_default_vocabulary() {
        let vocab = SkillVocabulary::default();
        let found = vocab.extract("Experienced Python developer with Docker and AWS skills");
        assert_eq!(found, set(&["aws", "docker", "python"]));
    }

    #[test]
    fn test_extract_is_case_insensitive() {
        let vocab = SkillVocabulary::default();
        let found = vocab.extract("PYTHON and DoCkEr");
        assert_eq!(found, set(&["docker", "python"]));
    }

    #[test]
    fn test_extract_multiword_term() {
        let vocab = SkillVocabulary::default();
        let found = vocab.extract("Machine Learning engineer, Scrum team");
        assert!(found.contains("machine learning"));
        assert!(found.contains("scrum"));
    }

    #[test]
    fn test_extract_substring_semantics() {
        // "javascript" contains "java", so both terms match by contract
        let vocab = SkillVocabulary::default();
        let found = vocab.extract("JavaScript developer");
        assert!(found.contains("javascript"));
        assert!(found.contains("java"));
    }

    #[test]
    fn test_extract_empty_text_yields_empty_set() {
        let vocab = SkillVocabulary::default();
        assert!(vocab.extract("").is_empty());
    }

    #[test]
    fn test_extract_no_vocabulary_hits() {
        let vocab = SkillVocabulary::default();
        assert!(vocab.extract("Looking for an enthusiastic welder").is_empty());
    }

    #[test]
    fn test_custom_vocabulary_is_injected() {
        let vocab = SkillVocabulary::new(["Rust", "tokio"]);
        let found = vocab.extract("Rust services built on Tokio");
        assert_eq!(found, set(&["rust", "tokio"]));
        assert!(vocab.extract("python only").is_empty());
    }

    #[test]
    fn test_vocabulary_normalizes_and_dedups() {
        let vocab = SkillVocabulary::new(["  Python ", "python", "", "PYTHON"]);
        let found = vocab.extract("python shop");
        assert_eq!(found, set(&["python"]));
    }

    #[test]
    fn test_common_and_missing_set_algebra() {
        let cv = set(&["python", "aws", "docker"]);
        let job = set(&["python", "aws", "kubernetes"]);
        assert_eq!(common_skills(&cv, &job), set(&["aws", "python"]));
        assert_eq!(missing_skills(&cv, &job), set(&["kubernetes"]));
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let vocab = SkillVocabulary::default();
        let text = "Python, SQL, Docker, and plenty of teamwork";
        assert_eq!(vocab.extract(text), vocab.extract(text));
    }
}
