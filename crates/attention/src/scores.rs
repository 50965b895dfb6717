//! Pairwise query/key similarity with the `1/sqrt(d_k)` scale.

use candle_core::Tensor;

use crate::checks;
use crate::errors::Result;

/// Computes `Q·K^T` scaled by `1 / sqrt(d_k)`.
///
/// `q` and `k` must both have `d_k` columns; the column counts are checked
/// against the configured dimension before the multiplication rather than
/// trusted, since this is the stage that owns the scaling constant. The
/// divisor keeps score magnitudes from growing with `d_k`, which would
/// otherwise drive the downstream softmax toward one-hot rows.
pub fn scaled_scores(q: &Tensor, k: &Tensor, d_k: usize) -> Result<Tensor> {
    checks::expect_cols("scores.q", q, d_k)?;
    checks::expect_cols("scores.k", k, d_k)?;

    let scores = q.matmul(&k.t()?)?;
    let scale = 1.0 / (d_k as f64).sqrt();
    mul_scalar(&scores, scale as f32)
}

fn mul_scalar(tensor: &Tensor, value: f32) -> Result<Tensor> {
    let scalar = Tensor::new(value, tensor.device())?;
    let scalar = scalar.broadcast_as(tensor.shape())?;
    Ok(tensor.mul(&scalar)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AttentionError;
    use candle_core::Device;

    #[test]
    fn matches_manual_two_by_two() -> Result<()> {
        let device = Device::Cpu;
        let q = Tensor::from_vec(vec![1f32, 0.0, 0.0, 1.0], (2, 2), &device)?;
        let k = q.clone();

        let scores = scaled_scores(&q, &k, 2)?.to_vec2::<f32>()?;
        let scale = (1.0 / 2f64.sqrt()) as f32;
        assert_eq!(scores, vec![vec![scale, 0.0], vec![0.0, scale]]);
        Ok(())
    }

    #[test]
    fn scale_shrinks_with_d_k() -> Result<()> {
        let device = Device::Cpu;
        let q = Tensor::from_vec(vec![1f32; 64], (1, 64), &device)?;
        let k = q.clone();

        let scores = scaled_scores(&q, &k, 64)?.to_vec2::<f32>()?;
        // dot product is 64, divided by sqrt(64) = 8
        assert!((scores[0][0] - 8.0).abs() < 1e-5);
        Ok(())
    }

    #[test]
    fn rejects_width_disagreeing_with_d_k() -> Result<()> {
        let device = Device::Cpu;
        let q = Tensor::from_vec(vec![0f32; 8], (2, 4), &device)?;
        let k = q.clone();

        let err = scaled_scores(&q, &k, 8).unwrap_err();
        assert!(matches!(err, AttentionError::ShapeMismatch { .. }));
        Ok(())
    }
}
