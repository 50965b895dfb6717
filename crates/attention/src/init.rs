//! Weight initialization policies.
//!
//! Randomness enters the model only here: a policy turns a seed and a shape
//! into a matrix, so the forward computation stays deterministic and tests
//! can reproduce or bypass initialization entirely.

use candle_core::{Device, Tensor};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rand_distr::StandardNormal;

use crate::errors::Result;

/// Scale applied to freshly sampled projection weights, keeping initial
/// scores near zero.
pub const DEFAULT_INIT_SCALE: f64 = 0.1;

/// Supported initialization policies for projection weights.
#[derive(Debug, Clone, PartialEq)]
pub enum WeightInit {
    /// I.i.d. standard-normal samples multiplied by `scale`, drawn from a
    /// generator seeded with `seed`.
    ScaledNormal { seed: u64, scale: f64 },
    /// Ones on the main diagonal, zeros elsewhere. With square dimensions
    /// this forces `Q = K = V = X`, the deterministic debugging setup.
    Identity,
}

impl WeightInit {
    /// Seeded normal initialization with the default 0.1 scale.
    pub fn scaled_normal(seed: u64) -> Self {
        Self::ScaledNormal {
            seed,
            scale: DEFAULT_INIT_SCALE,
        }
    }

    /// Sample a single `(rows, cols)` matrix under this policy.
    ///
    /// `ScaledNormal` derives a fresh generator from its seed on every call,
    /// so the same policy and shape always produce the same matrix.
    pub fn sample(&self, rows: usize, cols: usize, device: &Device) -> Result<Tensor> {
        match self {
            WeightInit::ScaledNormal { seed, scale } => {
                let mut rng = StdRng::seed_from_u64(*seed);
                normal_matrix(&mut rng, rows, cols, *scale, device)
            }
            WeightInit::Identity => eye(rows, cols, device),
        }
    }
}

/// Draw a `(rows, cols)` matrix of scaled standard-normal samples from `rng`.
///
/// Kept separate from [`WeightInit::sample`] so one seeded generator can
/// supply several distinct matrices in sequence.
pub(crate) fn normal_matrix(
    rng: &mut StdRng,
    rows: usize,
    cols: usize,
    scale: f64,
    device: &Device,
) -> Result<Tensor> {
    let data: Vec<f32> = (0..rows * cols)
        .map(|_| {
            let z: f32 = rng.sample(StandardNormal);
            z * scale as f32
        })
        .collect();
    Ok(Tensor::from_vec(data, (rows, cols), device)?)
}

/// Rectangular identity: ones on the main diagonal, zeros elsewhere.
pub(crate) fn eye(rows: usize, cols: usize, device: &Device) -> Result<Tensor> {
    let mut data = vec![0f32; rows * cols];
    for i in 0..rows.min(cols) {
        data[i * cols + i] = 1.0;
    }
    Ok(Tensor::from_vec(data, (rows, cols), device)?)
}
