//! Projection weights and the query/key/value projection stage.

use candle_core::{Device, Tensor};
use rand::{rngs::StdRng, SeedableRng};

use crate::checks;
use crate::config::AttentionConfig;
use crate::errors::{AttentionError, Result};
use crate::init::{self, WeightInit};

/// The three projection matrices owned by a model instance.
///
/// Shapes are `(d_model, d_k)` for queries and keys and `(d_model, d_v)` for
/// values. Constructors validate shapes against the configuration, so a value
/// of this type always satisfies the projection contract.
#[derive(Debug, Clone)]
pub struct ProjectionWeights {
    w_q: Tensor,
    w_k: Tensor,
    w_v: Tensor,
}

impl ProjectionWeights {
    /// Builds validated weights from pre-existing tensors.
    pub fn from_tensors(
        config: &AttentionConfig,
        w_q: Tensor,
        w_k: Tensor,
        w_v: Tensor,
    ) -> Result<Self> {
        checks::expect_shape("weights.w_q", &w_q, config.d_model, config.d_k)?;
        checks::expect_shape("weights.w_k", &w_k, config.d_model, config.d_k)?;
        checks::expect_shape("weights.w_v", &w_v, config.d_model, config.d_v)?;
        Ok(Self { w_q, w_k, w_v })
    }

    /// Initializes the three matrices under `init`.
    ///
    /// For `ScaledNormal` a single generator seeded once supplies all three
    /// matrices in q, k, v order, so one seed fixes the whole model while the
    /// matrices stay distinct.
    pub fn from_init(
        config: &AttentionConfig,
        init: &WeightInit,
        device: &Device,
    ) -> Result<Self> {
        let (w_q, w_k, w_v) = match init {
            WeightInit::ScaledNormal { seed, scale } => {
                let mut rng = StdRng::seed_from_u64(*seed);
                let w_q = init::normal_matrix(&mut rng, config.d_model, config.d_k, *scale, device)?;
                let w_k = init::normal_matrix(&mut rng, config.d_model, config.d_k, *scale, device)?;
                let w_v = init::normal_matrix(&mut rng, config.d_model, config.d_v, *scale, device)?;
                (w_q, w_k, w_v)
            }
            WeightInit::Identity => (
                init::eye(config.d_model, config.d_k, device)?,
                init::eye(config.d_model, config.d_k, device)?,
                init::eye(config.d_model, config.d_v, device)?,
            ),
        };
        Self::from_tensors(config, w_q, w_k, w_v)
    }

    /// Projects `x` into query, key, and value space: `Q = X·W_q`,
    /// `K = X·W_k`, `V = X·W_v`.
    ///
    /// `x` must be `(seq_len, d_model)` with `seq_len >= 1`; anything else
    /// fails before the multiplications run.
    pub fn project(&self, x: &Tensor) -> Result<(Tensor, Tensor, Tensor)> {
        let d_model = self.w_q.dims2()?.0;
        let (rows, cols) = checks::expect_rank2("projection.input", x)?;
        if cols != d_model {
            return Err(AttentionError::ShapeMismatch {
                context: format!(
                    "projection.input: expected {d_model} columns to match d_model, got {cols}"
                ),
            });
        }
        if rows == 0 {
            return Err(AttentionError::ShapeMismatch {
                context: "projection.input: sequence length must be non-zero".to_string(),
            });
        }

        let q = x.matmul(&self.w_q)?;
        let k = x.matmul(&self.w_k)?;
        let v = x.matmul(&self.w_v)?;
        Ok((q, k, v))
    }

    pub fn w_q(&self) -> &Tensor {
        &self.w_q
    }

    pub fn w_k(&self) -> &Tensor {
        &self.w_k
    }

    pub fn w_v(&self) -> &Tensor {
        &self.w_v
    }
}
