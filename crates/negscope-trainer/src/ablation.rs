//! # Ablation Driver
//!
//! Orchestrates the study: one baseline run with every feature, then one run
//! per candidate feature with that feature withheld from both training and
//! development data. Each ablated run reports its F1 and the signed drop from
//! baseline, and its development predictions are written back out in the
//! corpus layout as `predictions_without_<feature>.tsv`.
//!
//! Runs are strictly sequential; every run retrains from scratch and
//! overwrites the shared model file before the next one starts.

use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use negscope_core::{
    FEATURE_NAMES, ScopeMetrics, Sentence, extract_features, extract_labels, load_corpus,
    write_predictions,
};

use crate::crf::{TrainConfig, train_and_evaluate};

/// Default corpus and artifact locations.
pub const DEFAULT_TRAIN_PATH: &str = "data/with_complete_features_training.tsv";
pub const DEFAULT_DEV_PATH: &str = "data/with_complete_features_dev.tsv";
pub const DEFAULT_MODEL_PATH: &str = "crf.model";

/// Everything one study needs: corpus locations, artifact paths, and the
/// candidate feature list.
#[derive(Debug, Clone)]
pub struct AblationConfig {
    pub train_path: PathBuf,
    pub dev_path: PathBuf,
    pub model_path: PathBuf,
    /// Directory receiving the per-feature prediction files.
    pub output_dir: PathBuf,
    /// Features to ablate, one run each.
    pub features: Vec<String>,
    /// Optional JSON summary of all runs.
    pub report_path: Option<PathBuf>,
    /// Stop after the baseline run.
    pub baseline_only: bool,
}

impl Default for AblationConfig {
    fn default() -> Self {
        Self {
            train_path: PathBuf::from(DEFAULT_TRAIN_PATH),
            dev_path: PathBuf::from(DEFAULT_DEV_PATH),
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            output_dir: PathBuf::from("."),
            features: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            report_path: None,
            baseline_only: false,
        }
    }
}

/// One ablated run of the study.
#[derive(Debug, Clone, Serialize)]
pub struct AblationRun {
    pub feature: String,
    pub metrics: ScopeMetrics,
    /// Baseline F1 minus this run's F1; positive means the feature helped.
    pub f1_delta: f64,
    pub predictions_file: PathBuf,
}

/// Summary of a full study.
#[derive(Debug, Clone, Serialize)]
pub struct AblationReport {
    pub baseline: ScopeMetrics,
    pub runs: Vec<AblationRun>,
}

/// Run the study described by `config`.
pub fn run_ablation(config: &AblationConfig) -> Result<AblationReport> {
    let train_sentences = load_corpus(&config.train_path)
        .with_context(|| format!("failed to load training corpus {:?}", config.train_path))?;
    let dev_sentences = load_corpus(&config.dev_path)
        .with_context(|| format!("failed to load development corpus {:?}", config.dev_path))?;
    info!(
        train = train_sentences.len(),
        dev = dev_sentences.len(),
        "loaded corpora"
    );

    let y_train: Vec<_> = train_sentences.iter().map(extract_labels).collect();
    let y_dev: Vec<_> = dev_sentences.iter().map(extract_labels).collect();

    let train_config = TrainConfig {
        model_path: config.model_path.clone(),
        ..TrainConfig::default()
    };

    let baseline = train_and_evaluate(
        &featurize(&train_sentences, None),
        &y_train,
        &featurize(&dev_sentences, None),
        &y_dev,
        &train_config,
    )
    .context("baseline run failed")?;
    println!(
        "Baseline F1 Score (All Features): {}",
        baseline.metrics.f1
    );

    let mut runs = Vec::new();
    if !config.baseline_only {
        std::fs::create_dir_all(&config.output_dir)?;

        for feature in &config.features {
            let eval = train_and_evaluate(
                &featurize(&train_sentences, Some(feature)),
                &y_train,
                &featurize(&dev_sentences, Some(feature)),
                &y_dev,
                &train_config,
            )
            .with_context(|| format!("ablation run without '{feature}' failed"))?;

            let f1_delta = baseline.metrics.f1 - eval.metrics.f1;
            println!(
                "F1 Score without '{feature}': {:.3}, Difference: {:.3}",
                eval.metrics.f1, f1_delta
            );

            let predictions_file = config
                .output_dir
                .join(format!("predictions_without_{feature}.tsv"));
            write_predictions(&config.dev_path, &eval.predictions, &predictions_file)
                .with_context(|| format!("failed to write {predictions_file:?}"))?;

            runs.push(AblationRun {
                feature: feature.clone(),
                metrics: eval.metrics,
                f1_delta,
                predictions_file,
            });
        }
    }

    let report = AblationReport {
        baseline: baseline.metrics,
        runs,
    };
    if let Some(path) = &config.report_path {
        let file = File::create(path)
            .with_context(|| format!("failed to create report file {path:?}"))?;
        serde_json::to_writer_pretty(file, &report)?;
        info!(path = %path.display(), "wrote ablation report");
    }

    Ok(report)
}

fn featurize(
    sentences: &[Sentence],
    exclude: Option<&str>,
) -> Vec<Vec<negscope_core::FeatureMap>> {
    sentences
        .iter()
        .map(|s| extract_features(s, exclude))
        .collect()
}
