use thiserror::Error;

pub type Result<T> = std::result::Result<T, VizError>;

#[derive(Debug, Error)]
pub enum VizError {
    /// The weight matrix does not line up with the token labels.
    #[error("shape mismatch: {context}")]
    ShapeMismatch { context: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
