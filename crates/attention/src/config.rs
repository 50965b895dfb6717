//! Model configuration and the scaling constant derived from it.

use crate::errors::{AttentionError, Result};

/// Dimensions for a single-head attention model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttentionConfig {
    /// Input embedding dimension.
    pub d_model: usize,
    /// Query/key projection dimension.
    pub d_k: usize,
    /// Value projection dimension.
    pub d_v: usize,
}

impl AttentionConfig {
    pub fn new(d_model: usize, d_k: usize, d_v: usize) -> Self {
        Self { d_model, d_k, d_v }
    }

    /// Validate structural invariants; every dimension must be non-zero.
    pub fn validate(&self) -> Result<()> {
        if self.d_model == 0 {
            return Err(AttentionError::InvalidConfig {
                context: "d_model must be greater than zero".to_string(),
            });
        }
        if self.d_k == 0 {
            return Err(AttentionError::InvalidConfig {
                context: "d_k must be greater than zero".to_string(),
            });
        }
        if self.d_v == 0 {
            return Err(AttentionError::InvalidConfig {
                context: "d_v must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Score scaling factor `1 / sqrt(d_k)`.
    ///
    /// Derived from the configured `d_k`, never from runtime tensor shapes;
    /// the projection stage guarantees those agree by construction.
    pub fn scaling_factor(&self) -> f64 {
        1.0 / (self.d_k as f64).sqrt()
    }
}
