//! Text rendering for attention weight matrices.
//!
//! A pure consumer of the attention core: it takes a row-stochastic weight
//! matrix as plain row data plus one label per token and renders a heatmap
//! that reads in a terminal or a plain-text file. Nothing here feeds back
//! into the numeric pipeline, and the crate deliberately has no tensor
//! dependency.

pub mod errors;
pub mod heatmap;

pub use errors::{Result, VizError};
pub use heatmap::AttentionHeatmap;
