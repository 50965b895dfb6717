//! Demo binary: run single-head attention over example embeddings and render
//! the weight heatmap.

use std::path::PathBuf;

use anyhow::{Context, Result};
use attention::{AttentionConfig, ScaledDotProductAttention, WeightInit};
use candle_core::Device;
use clap::Parser;
use viz::AttentionHeatmap;

#[derive(Parser, Debug)]
#[command(author, version, about = "Scaled dot-product attention demo", long_about = None)]
struct Args {
    #[arg(
        long,
        value_delimiter = ',',
        default_value = "the,cat,sat,on,the,mat",
        help = "Comma-separated token labels; one embedding is sampled per token"
    )]
    tokens: Vec<String>,

    #[arg(long, default_value_t = 16, help = "Input embedding dimension")]
    d_model: usize,

    #[arg(long, default_value_t = 8, help = "Query/key projection dimension")]
    d_k: usize,

    #[arg(long, default_value_t = 8, help = "Value projection dimension")]
    d_v: usize,

    #[arg(long, default_value_t = 42, help = "Seed for projection weight initialization")]
    seed: u64,

    #[arg(long, default_value_t = 7, help = "Seed for the example token embeddings")]
    embedding_seed: u64,

    #[arg(long, value_name = "PATH", help = "Also write the heatmap to this file")]
    out: Option<PathBuf>,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("attention demo failed: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();
    let device = Device::Cpu;

    let config = AttentionConfig::new(args.d_model, args.d_k, args.d_v);
    let model =
        ScaledDotProductAttention::new(config, &WeightInit::scaled_normal(args.seed), &device)?;

    // Reproducible stand-in embeddings; a real pipeline would feed learned ones.
    let embeddings = WeightInit::ScaledNormal {
        seed: args.embedding_seed,
        scale: 1.0,
    }
    .sample(args.tokens.len(), args.d_model, &device)?;

    let (output, weights) = model.forward(&embeddings)?;

    let heatmap = AttentionHeatmap::new(weights.to_vec2::<f32>()?, args.tokens.clone())?;
    println!("{heatmap}");
    println!(
        "output shape: {:?}  (d_model={} d_k={} d_v={} seed={})",
        output.dims(),
        args.d_model,
        args.d_k,
        args.d_v,
        args.seed
    );

    if let Some(path) = &args.out {
        heatmap
            .save(path)
            .with_context(|| format!("failed to save heatmap to {}", path.display()))?;
        println!("heatmap saved to {}", path.display());
    }

    Ok(())
}
