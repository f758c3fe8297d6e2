//! Cosine similarity between embedding vectors.
//!
//! Fail-soft by contract: a malformed vector pair yields 0.0 ("no similarity
//! signal") instead of an error, so one bad embedding can never abort a
//! whole match request.

use tracing::warn;

/// Raw cosine of the angle between `a` and `b`, in [-1.0, 1.0].
///
/// Returns 0.0 on dimension mismatch, empty input, a zero-norm vector, or
/// non-finite arithmetic (NaN or overflowing components).
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        warn!(
            a_len = a.len(),
            b_len = b.len(),
            "vector shape mismatch; treating similarity as zero"
        );
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    let cos = dot / (norm_a * norm_b);
    if !cos.is_finite() {
        warn!("non-finite cosine from degenerate vectors; treating similarity as zero");
        return 0.0;
    }
    cos
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_vectors_score_one() {
        let v = vec![0.3, -1.2, 4.5];
        let sim = cosine_similarity(&v, &v);
        assert!((sim - 1.0).abs() < 1e-6, "got {sim}");
    }

    #[test]
    fn test_orthogonal_vectors_score_zero() {
        let a = vec![1.0, 0.0];
        let b = vec![0.0, 1.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_opposite_vectors_score_negative_one() {
        let a = vec![2.0, 0.0];
        let b = vec![-2.0, 0.0];
        let sim = cosine_similarity(&a, &b);
        assert!((sim + 1.0).abs() < 1e-6, "got {sim}");
    }

    #[test]
    fn test_dimension_mismatch_is_zero() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![1.0, 0.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_zero_norm_is_zero() {
        let a = vec![0.0, 0.0];
        let b = vec![1.0, 1.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_empty_vectors_are_zero() {
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
    }

    #[test]
    fn test_non_finite_components_are_zero() {
        let unit = vec![1.0, 0.0];
        let inf = vec![f32::INFINITY, 1.0];
        let nan = vec![f32::NAN, 1.0];
        let huge = vec![f32::MAX, f32::MAX];
        assert_eq!(cosine_similarity(&inf, &unit), 0.0);
        assert_eq!(cosine_similarity(&nan, &unit), 0.0);
        assert_eq!(cosine_similarity(&huge, &huge), 0.0);
    }

    #[test]
    fn test_scale_invariance() {
        let a = vec![1.0, 2.0, 3.0];
        let b = vec![10.0, 20.0, 30.0];
        let sim = cosine_similarity(&a, &b);
        assert!((sim - 1.0).abs() < 1e-6, "got {sim}");
    }
}
