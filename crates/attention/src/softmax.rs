//! Numerically stable row-wise softmax.
//!
//! Each row is shifted by its own maximum before exponentiation. The shift is
//! mandatory, not an optimization: `exp(1000)` overflows `f32` to infinity,
//! while `exp(x - max)` keeps every exponent at or below zero, so score
//! magnitudes in the thousands still normalize to finite probabilities.

use candle_core::{Tensor, D};

use crate::checks;
use crate::errors::Result;

/// Applies softmax independently to each row of a `(rows, cols)` matrix.
///
/// Guarantees for finite input: every output entry lies in `[0, 1]`, every
/// row sums to 1 within floating-point tolerance, and no NaN or infinite
/// values are produced. A row of all-equal scores yields the uniform
/// distribution `1/cols`.
pub fn softmax_rows(scores: &Tensor) -> Result<Tensor> {
    checks::expect_rank2("softmax.input", scores)?;

    let max = scores.max_keepdim(D::Minus1)?;
    let shifted = scores.broadcast_sub(&max)?;
    let exp = shifted.exp()?;
    let denom = exp.sum_keepdim(D::Minus1)?;
    Ok(exp.broadcast_div(&denom)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AttentionError;
    use candle_core::Device;

    fn row_sums(probs: &Tensor) -> Result<Vec<f32>> {
        Ok(probs.sum(D::Minus1)?.to_vec1::<f32>()?)
    }

    #[test]
    fn equal_scores_yield_uniform_rows() -> Result<()> {
        let device = Device::Cpu;
        let scores = Tensor::from_vec(vec![3f32; 8], (2, 4), &device)?;

        let probs = softmax_rows(&scores)?.to_vec2::<f32>()?;
        for row in probs {
            for p in row {
                assert!((p - 0.25).abs() < 1e-6);
            }
        }
        Ok(())
    }

    #[test]
    fn dominant_score_peaks_without_overflow() -> Result<()> {
        let device = Device::Cpu;
        let scores = Tensor::from_vec(vec![50f32, 0.0, 0.0, 0.0], (1, 4), &device)?;

        let probs = softmax_rows(&scores)?.to_vec2::<f32>()?;
        assert!(probs[0][0] > 0.999);
        assert!(probs[0].iter().all(|p| p.is_finite() && (0.0..=1.0).contains(p)));
        Ok(())
    }

    #[test]
    fn survives_large_magnitudes() -> Result<()> {
        let device = Device::Cpu;
        let scores = Tensor::from_vec(vec![1000f32, 1001.0, 999.0], (1, 3), &device)?;

        let probs = softmax_rows(&scores)?;
        let values = probs.flatten_all()?.to_vec1::<f32>()?;
        assert!(values.iter().all(|p| p.is_finite()));

        let sums = row_sums(&probs)?;
        assert!((sums[0] - 1.0).abs() < 1e-6);
        Ok(())
    }

    #[test]
    fn matches_candle_reference() -> Result<()> {
        let device = Device::Cpu;
        let data: Vec<f32> = (0..20).map(|i| (i as f32 * 0.37).sin() * 3.0).collect();
        let scores = Tensor::from_vec(data, (4, 5), &device)?;

        let ours = softmax_rows(&scores)?.flatten_all()?.to_vec1::<f32>()?;
        let reference = candle_nn::ops::softmax_last_dim(&scores)?
            .flatten_all()?
            .to_vec1::<f32>()?;
        for (a, b) in ours.iter().zip(reference.iter()) {
            assert!((a - b).abs() < 1e-6);
        }
        Ok(())
    }

    #[test]
    fn rejects_non_matrix_input() {
        let device = Device::Cpu;
        let vector = Tensor::from_vec(vec![1f32, 2.0, 3.0], 3, &device).unwrap();
        let err = softmax_rows(&vector).unwrap_err();
        assert!(matches!(err, AttentionError::ShapeMismatch { .. }));
    }
}
