//! Error types emitted by the attention pipeline.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AttentionError>;

/// Attention-specific error category.
///
/// Every variant reflects deterministic misuse or an internal defect; none
/// are transient, so callers should not retry.
#[derive(Debug, Error)]
pub enum AttentionError {
    /// A configured dimension violates the documented contract.
    #[error("invalid configuration: {context}")]
    InvalidConfig { context: String },

    /// A tensor operand does not match the shape the contract expects.
    #[error("shape mismatch: {context}")]
    ShapeMismatch { context: String },

    /// NaN or infinite values surfaced where the normalizer guarantees
    /// finite output. Indicates a defect, never a recoverable condition.
    #[error("numerical instability in {context}")]
    NumericalInstability { context: String },

    /// A tensor-backend failure propagated to the caller.
    #[error(transparent)]
    Backend(#[from] candle_core::Error),
}
