//! Vector math primitives used for similarity ranking.

use crate::error::{RagError, Result};

/// Computes the dot product of two vectors.
///
/// # Errors
///
/// Returns [`RagError::DimensionMismatch`] if the vectors have different lengths.
pub fn dot_product(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(RagError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }
    Ok(a.iter().zip(b).map(|(x, y)| x * y).sum())
}

/// Computes the Euclidean (L2) norm of a vector.
#[must_use]
pub fn magnitude(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// Computes the cosine similarity between two vectors.
///
/// The result lies in `[-1, 1]`, with `1.0` meaning identical direction.
///
/// Callers must guarantee that neither vector is all zeros: a zero vector has
/// magnitude zero and the division yields NaN per IEEE-754. The vector stores
/// in this crate reject all-zero and non-finite embeddings at their
/// boundaries, so ranking never observes this case.
///
/// # Errors
///
/// Returns [`RagError::DimensionMismatch`] if the vectors have different lengths.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32> {
    Ok(dot_product(a, b)? / (magnitude(a) * magnitude(b)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_product_of_aligned_vectors() {
        let result = dot_product(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]).unwrap();
        assert!((result - 32.0).abs() < f32::EPSILON);
    }

    #[test]
    fn dot_product_rejects_mismatched_lengths() {
        let err = dot_product(&[1.0, 2.0], &[1.0]).unwrap_err();
        assert!(matches!(
            err,
            RagError::DimensionMismatch {
                expected: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn magnitude_is_the_l2_norm() {
        assert!((magnitude(&[3.0, 4.0]) - 5.0).abs() < f32::EPSILON);
        assert!((magnitude(&[0.0, 0.0]) - 0.0).abs() < f32::EPSILON);
    }

    #[test]
    fn cosine_of_identical_direction_is_one() {
        let sim = cosine_similarity(&[1.0, 0.0], &[2.0, 0.0]).unwrap();
        assert!((sim - 1.0).abs() < 1e-6);
    }

    #[test]
    fn cosine_of_orthogonal_vectors_is_zero() {
        let sim = cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).unwrap();
        assert!(sim.abs() < 1e-6);
    }

    #[test]
    fn cosine_of_opposite_vectors_is_negative_one() {
        let sim = cosine_similarity(&[1.0, 1.0], &[-1.0, -1.0]).unwrap();
        assert!((sim + 1.0).abs() < 1e-6);
    }

    #[test]
    fn cosine_of_zero_vector_is_nan() {
        // Documented precondition violation, not a checked error.
        let sim = cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]).unwrap();
        assert!(sim.is_nan());
    }
}
