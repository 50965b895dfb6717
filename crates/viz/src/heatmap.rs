//! Terminal-oriented heatmap of attention weights.
//!
//! Rows are query tokens, columns are key tokens. Each cell shows the weight
//! to three decimals next to a shade glyph, so peaked and smooth rows can be
//! told apart at a glance even without color support.

use std::fmt;
use std::fs;
use std::path::Path;

use crate::errors::{Result, VizError};

const SHADE_RAMP: [char; 5] = [' ', '░', '▒', '▓', '█'];
const MIN_CELL_WIDTH: usize = 7;
const MAX_LABEL_WIDTH: usize = 12;

/// Attention weight matrix paired with its token labels.
#[derive(Debug, Clone)]
pub struct AttentionHeatmap {
    rows: Vec<Vec<f32>>,
    tokens: Vec<String>,
}

impl AttentionHeatmap {
    /// Builds a heatmap from row-major weights and one label per token.
    ///
    /// The matrix must be square with side `tokens.len()`; row `i` is the
    /// distribution of query token `i` over all key tokens.
    pub fn new(rows: Vec<Vec<f32>>, tokens: Vec<String>) -> Result<Self> {
        let n = tokens.len();
        if n == 0 {
            return Err(VizError::ShapeMismatch {
                context: "at least one token label is required".to_string(),
            });
        }
        if rows.len() != n {
            return Err(VizError::ShapeMismatch {
                context: format!("expected {n} weight rows for {n} tokens, got {}", rows.len()),
            });
        }
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(VizError::ShapeMismatch {
                    context: format!("row {i} has {} entries, expected {n}", row.len()),
                });
            }
        }
        Ok(Self { rows, tokens })
    }

    /// Renders the heatmap as a multi-line string.
    pub fn render(&self) -> String {
        let width = self
            .tokens
            .iter()
            .map(|t| t.chars().count().min(MAX_LABEL_WIDTH))
            .max()
            .unwrap_or(0)
            .max(MIN_CELL_WIDTH);

        let mut out = String::new();
        out.push_str("attention weights (query rows over key columns)\n");

        out.push_str(&" ".repeat(width + 2));
        for token in &self.tokens {
            out.push_str(&format!("{:>width$}  ", clip(token)));
        }
        out.push('\n');

        for (token, row) in self.tokens.iter().zip(&self.rows) {
            out.push_str(&format!("{:>width$}  ", clip(token)));
            for &weight in row {
                let cell = format!("{:.3} {}", weight, shade(weight));
                out.push_str(&format!("{cell:>width$}  "));
            }
            out.push('\n');
        }

        let (min, max) = self.extrema();
        out.push_str(&format!("min={min:.3} max={max:.3}\n"));
        out
    }

    /// Writes the rendering to `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.render())?;
        log::info!("attention heatmap saved to {}", path.display());
        Ok(())
    }

    fn extrema(&self) -> (f32, f32) {
        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        for &value in self.rows.iter().flatten() {
            min = min.min(value);
            max = max.max(value);
        }
        (min, max)
    }
}

impl fmt::Display for AttentionHeatmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

fn shade(weight: f32) -> char {
    let clamped = weight.clamp(0.0, 1.0);
    let index = (clamped * (SHADE_RAMP.len() - 1) as f32).round() as usize;
    SHADE_RAMP[index.min(SHADE_RAMP.len() - 1)]
}

fn clip(token: &str) -> String {
    token.chars().take(MAX_LABEL_WIDTH).collect()
}
