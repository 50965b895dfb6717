//! Lightweight validation helpers shared across the pipeline stages.
//!
//! These routines return [`Result`] so call sites can propagate errors with
//! `?` before any matrix multiplication is attempted.

use candle_core::{DType, Tensor};

use crate::errors::{AttentionError, Result};

/// Ensures a tensor is rank 2 and returns its `(rows, cols)`.
pub fn expect_rank2(context: &str, tensor: &Tensor) -> Result<(usize, usize)> {
    tensor
        .dims2()
        .map_err(|_| AttentionError::ShapeMismatch {
            context: format!(
                "{context}: expected a rank-2 matrix, got shape {:?}",
                tensor.dims()
            ),
        })
}

/// Ensures a rank-2 tensor has exactly `expected` columns.
pub fn expect_cols(context: &str, tensor: &Tensor, expected: usize) -> Result<()> {
    let (_, cols) = expect_rank2(context, tensor)?;
    if cols != expected {
        return Err(AttentionError::ShapeMismatch {
            context: format!("{context}: expected {expected} columns, got {cols}"),
        });
    }
    Ok(())
}

/// Ensures a tensor matches `(rows, cols)` exactly.
pub fn expect_shape(context: &str, tensor: &Tensor, rows: usize, cols: usize) -> Result<()> {
    let actual = expect_rank2(context, tensor)?;
    if actual != (rows, cols) {
        return Err(AttentionError::ShapeMismatch {
            context: format!(
                "{context}: expected shape ({rows}, {cols}), got ({}, {})",
                actual.0, actual.1
            ),
        });
    }
    Ok(())
}

/// Fails with [`AttentionError::NumericalInstability`] if any element of the
/// tensor is NaN or infinite.
pub fn ensure_finite(context: &str, tensor: &Tensor) -> Result<()> {
    let values = tensor
        .to_dtype(DType::F32)?
        .flatten_all()?
        .to_vec1::<f32>()?;
    if values.iter().all(|value| value.is_finite()) {
        Ok(())
    } else {
        Err(AttentionError::NumericalInstability {
            context: context.to_string(),
        })
    }
}
