//! Single-head scaled dot-product attention over 2D tensors.
//!
//! The crate computes `Attention(Q, K, V) = softmax(QK^T / sqrt(d_k)) * V`
//! for one unmasked sequence at a time. Inputs are row-major `f32` tensors of
//! shape `(seq_len, d_model)`, one row per token embedding; the forward pass
//! returns the combined values `(seq_len, d_v)` together with the
//! row-stochastic attention weight matrix `(seq_len, seq_len)`.
//!
//! The pipeline decomposes into three pure stages: projection of the input
//! into query/key/value spaces ([`ProjectionWeights::project`]), scaled
//! pairwise similarity ([`scaled_scores`]), and a numerically stable row-wise
//! softmax ([`softmax_rows`]). [`ScaledDotProductAttention`] composes them and
//! owns the projection weights, which are fixed at construction and only
//! change through the validated [`set_weights`] hook.
//!
//! All failures are shape or value validation errors detected before the
//! offending computation runs; there is no masking, batching, or multi-head
//! composition here.
//!
//! [`set_weights`]: ScaledDotProductAttention::set_weights

pub mod checks;
pub mod config;
pub mod errors;
pub mod init;
pub mod model;
pub mod scores;
pub mod softmax;
pub mod weights;

pub use config::AttentionConfig;
pub use errors::{AttentionError, Result};
pub use init::WeightInit;
pub use model::ScaledDotProductAttention;
pub use scores::scaled_scores;
pub use softmax::softmax_rows;
pub use weights::ProjectionWeights;
