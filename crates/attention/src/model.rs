//! Forward orchestration composing projection, scoring, and normalization.

use std::sync::OnceLock;

use candle_core::{Device, Tensor};

use crate::checks;
use crate::config::AttentionConfig;
use crate::errors::Result;
use crate::init::WeightInit;
use crate::scores::scaled_scores;
use crate::softmax::softmax_rows;
use crate::weights::ProjectionWeights;

/// Single-head, unmasked scaled dot-product attention.
///
/// Configuration and projection weights are fixed at construction; a forward
/// call allocates its own intermediates and mutates nothing, so `&self` calls
/// may run concurrently from several threads. Replacing weights via
/// [`set_weights`](Self::set_weights) takes `&mut self`, which makes the
/// writer-before-reader assumption a borrow-checker guarantee.
#[derive(Debug)]
pub struct ScaledDotProductAttention {
    config: AttentionConfig,
    weights: ProjectionWeights,
    first_call: OnceLock<()>,
}

impl ScaledDotProductAttention {
    /// Constructs a model with weights initialized under `init`.
    pub fn new(config: AttentionConfig, init: &WeightInit, device: &Device) -> Result<Self> {
        config.validate()?;
        let weights = ProjectionWeights::from_init(&config, init, device)?;
        Ok(Self {
            config,
            weights,
            first_call: OnceLock::new(),
        })
    }

    /// Runs the attention pipeline over `x` of shape `(seq_len, d_model)`.
    ///
    /// Returns `(output, attention_weights)` with shapes `(seq_len, d_v)` and
    /// `(seq_len, seq_len)`. The weight matrix is row-stochastic: each row
    /// describes how one query token distributes attention over all key
    /// tokens. Deterministic given fixed weights and input.
    pub fn forward(&self, x: &Tensor) -> Result<(Tensor, Tensor)> {
        if self.first_call.set(()).is_ok() {
            log::info!(
                "attention init d_model={} d_k={} d_v={} scale={:.6}",
                self.config.d_model,
                self.config.d_k,
                self.config.d_v,
                self.config.scaling_factor()
            );
        }

        let (q, k, v) = self.weights.project(x)?;
        let scaled = scaled_scores(&q, &k, self.config.d_k)?;
        let attention_weights = softmax_rows(&scaled)?;
        checks::ensure_finite("attention weights", &attention_weights)?;

        let output = attention_weights.matmul(&v)?;
        checks::ensure_finite("attention output", &output)?;

        Ok((output, attention_weights))
    }

    /// Convenience wrapper returning only the combined values.
    pub fn attend(&self, x: &Tensor) -> Result<Tensor> {
        let (output, _) = self.forward(x)?;
        Ok(output)
    }

    /// Projects `x` into `(Q, K, V)` without running the rest of the
    /// pipeline. Useful for inspecting intermediate tensors.
    pub fn project(&self, x: &Tensor) -> Result<(Tensor, Tensor, Tensor)> {
        self.weights.project(x)
    }

    /// Replaces the projection matrices, validating each shape.
    ///
    /// Test/debug hook: deterministic scenarios force known weights (for
    /// example identity matrices so that `Q = K = V = X`) instead of relying
    /// on seeded initialization.
    pub fn set_weights(&mut self, w_q: Tensor, w_k: Tensor, w_v: Tensor) -> Result<()> {
        self.weights = ProjectionWeights::from_tensors(&self.config, w_q, w_k, w_v)?;
        Ok(())
    }

    pub fn config(&self) -> &AttentionConfig {
        &self.config
    }

    pub fn weights(&self) -> &ProjectionWeights {
        &self.weights
    }
}
