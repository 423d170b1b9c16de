//! Feature-ablation CLI for the negation-scope CRF tagger.
//!
//! Trains a baseline with all features, then retrains once per candidate
//! feature with that feature withheld, printing each run's scope F1 and the
//! drop from baseline.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use negscope_trainer::{
    AblationConfig, DEFAULT_DEV_PATH, DEFAULT_MODEL_PATH, DEFAULT_TRAIN_PATH, run_ablation,
};

/// CLI arguments
#[derive(Parser)]
#[command(name = "ablate")]
#[command(about = "Run a CRF feature-ablation study for negation scope tagging")]
#[command(version)]
struct Cli {
    /// Training corpus (21-column TSV, no header)
    #[arg(short, long, default_value = DEFAULT_TRAIN_PATH)]
    train: PathBuf,

    /// Development corpus (21-column TSV, no header)
    #[arg(short, long, default_value = DEFAULT_DEV_PATH)]
    dev: PathBuf,

    /// Model artifact path, overwritten by every run
    #[arg(short, long, default_value = DEFAULT_MODEL_PATH)]
    model: PathBuf,

    /// Directory for the per-feature prediction files
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Feature to ablate (repeatable; defaults to all candidate features)
    #[arg(short, long = "feature")]
    features: Vec<String>,

    /// Write a JSON summary of all runs to this path
    #[arg(short, long)]
    report: Option<PathBuf>,

    /// Train and score the baseline only, skipping the ablation loop
    #[arg(long)]
    baseline_only: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let mut config = AblationConfig {
        train_path: cli.train,
        dev_path: cli.dev,
        model_path: cli.model,
        output_dir: cli.output_dir,
        report_path: cli.report,
        baseline_only: cli.baseline_only,
        ..AblationConfig::default()
    };
    if !cli.features.is_empty() {
        config.features = cli.features;
    }

    run_ablation(&config)?;
    Ok(())
}
