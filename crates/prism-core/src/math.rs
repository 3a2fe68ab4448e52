//! Shared vector math for the ranking core.

use crate::error::EngineError;

/// Cosine similarity between two vectors: `dot(a,b) / (|a| * |b|)`.
///
/// Comparing vectors of different dimensions is a contract violation between
/// embedding models and fails with [`EngineError::DimensionMismatch`]. A
/// zero-norm operand yields `0.0` rather than NaN; this is the single
/// sanctioned silent fallback in the scoring path.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32, EngineError> {
    if a.len() != b.len() {
        return Err(EngineError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a = norm(a);
    let norm_b = norm(b);

    if norm_a <= f32::EPSILON || norm_b <= f32::EPSILON {
        return Ok(0.0);
    }
    Ok(dot / (norm_a * norm_b))
}

/// L2 norm of a vector.
pub fn norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_known_value() {
        let a = [1.0, 2.0, 3.0];
        let b = [4.0, 5.0, 6.0];
        let sim = cosine_similarity(&a, &b).unwrap();
        assert!((sim - 0.9746).abs() < 1e-4);
    }

    #[test]
    fn test_cosine_symmetric() {
        let a = [0.3, -1.2, 0.7, 2.0];
        let b = [1.1, 0.4, -0.5, 0.9];
        let ab = cosine_similarity(&a, &b).unwrap();
        let ba = cosine_similarity(&b, &a).unwrap();
        assert!((ab - ba).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_scale_invariant() {
        let a = [1.0, 2.0, 3.0];
        let scaled: Vec<f32> = a.iter().map(|x| x * 7.5).collect();
        let sim = cosine_similarity(&a, &scaled).unwrap();
        assert!((sim - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_cosine_zero_vector_is_zero_not_nan() {
        let zero = [0.0, 0.0, 0.0];
        let b = [1.0, 2.0, 3.0];
        let sim = cosine_similarity(&zero, &b).unwrap();
        assert_eq!(sim, 0.0);
        assert!(sim.is_finite());
    }

    #[test]
    fn test_cosine_dimension_mismatch() {
        let a = [1.0, 2.0];
        let b = [1.0, 2.0, 3.0];
        let err = cosine_similarity(&a, &b).unwrap_err();
        match err {
            EngineError::DimensionMismatch { expected, actual } => {
                assert_eq!(expected, 2);
                assert_eq!(actual, 3);
            }
            other => panic!("Expected DimensionMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_norm() {
        assert!((norm(&[3.0, 4.0]) - 5.0).abs() < 1e-6);
        assert_eq!(norm(&[]), 0.0);
    }
}
