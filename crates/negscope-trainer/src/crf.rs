//! # CRF Training and Evaluation
//!
//! Bridges the feature maps built by `negscope-core` to CRFsuite: trains an
//! LBFGS/CRF1D tagger, persists it to the configured model file, reloads it,
//! tags the development set, and scores the run with the scope-aware metric.
//!
//! The model file is overwritten on every call. Runs sharing a
//! [`TrainConfig::model_path`] must therefore be strictly sequential; a
//! caller wanting parallel runs has to give each its own path.

use std::path::PathBuf;

use anyhow::{Context, Result};
use crfsuite::{Algorithm, Attribute, GraphicalModel, Item, Model, Trainer};
use tracing::{debug, info};

use negscope_core::{FeatureMap, FeatureValue, ScopeMetrics};

/// Hyperparameters and artifact location for one training run.
#[derive(Debug, Clone)]
pub struct TrainConfig {
    /// L1 regularization weight.
    pub c1: f64,
    /// L2 regularization weight.
    pub c2: f64,
    /// LBFGS iteration cap.
    pub max_iterations: u32,
    /// Generate transition features for label pairs unseen in training.
    pub possible_transitions: bool,
    /// Where the trained model is persisted and reloaded from.
    pub model_path: PathBuf,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            c1: 0.1,
            c2: 0.1,
            max_iterations: 100,
            possible_transitions: true,
            model_path: PathBuf::from("crf.model"),
        }
    }
}

/// Outcome of one training run on the development set.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub metrics: ScopeMetrics,
    /// Predicted label sequences, one per development sentence.
    pub predictions: Vec<Vec<String>>,
}

/// Train a tagger on the training sequences and evaluate it on the
/// development sequences.
///
/// Feature and label sequences are parallel: `x_train[i]` aligns with
/// `y_train[i]` token by token, likewise for the development pair.
pub fn train_and_evaluate(
    x_train: &[Vec<FeatureMap>],
    y_train: &[Vec<String>],
    x_dev: &[Vec<FeatureMap>],
    y_dev: &[Vec<String>],
    config: &TrainConfig,
) -> Result<Evaluation> {
    let model_path = config
        .model_path
        .to_str()
        .context("model path is not valid UTF-8")?;

    let mut trainer = Trainer::new(false);
    trainer
        .select(Algorithm::LBFGS, GraphicalModel::CRF1D)
        .context("failed to select CRF algorithm")?;
    for (xseq, yseq) in x_train.iter().zip(y_train) {
        let items: Vec<Item> = xseq.iter().map(to_item).collect();
        trainer
            .append(&items, yseq, 0)
            .context("failed to append training sequence")?;
    }

    trainer.set("c1", &config.c1.to_string())?;
    trainer.set("c2", &config.c2.to_string())?;
    trainer.set("max_iterations", &config.max_iterations.to_string())?;
    trainer.set(
        "feature.possible_transitions",
        if config.possible_transitions { "1" } else { "0" },
    )?;

    debug!(
        sequences = x_train.len(),
        c1 = config.c1,
        c2 = config.c2,
        max_iterations = config.max_iterations,
        "training CRF"
    );
    trainer
        .train(model_path, -1)
        .with_context(|| format!("CRF training failed for {model_path}"))?;

    let model = Model::from_file(model_path)
        .with_context(|| format!("failed to reload trained model {model_path}"))?;
    let mut tagger = model.tagger().context("failed to create tagger")?;

    let mut predictions = Vec::with_capacity(x_dev.len());
    for xseq in x_dev {
        let items: Vec<Item> = xseq.iter().map(to_item).collect();
        predictions.push(tagger.tag(&items).context("tagging failed")?);
    }

    let gold: Vec<&String> = y_dev.iter().flatten().collect();
    let predicted: Vec<&String> = predictions.iter().flatten().collect();
    let metrics = ScopeMetrics::compute(&gold, &predicted);
    info!(
        f1 = metrics.f1,
        precision = metrics.precision,
        recall = metrics.recall,
        "evaluated run"
    );

    Ok(Evaluation { metrics, predictions })
}

/// Convert one feature map to a CRFsuite item, the way pycrfsuite converts
/// dicts: categorical values become `name=value` attributes with unit weight,
/// numbers keep their name and carry the value as weight, booleans weigh 1/0.
fn to_item(features: &FeatureMap) -> Item {
    features
        .iter()
        .map(|(name, value)| match value {
            FeatureValue::Text(text) => Attribute::new(format!("{name}={text}"), 1.0),
            FeatureValue::Number(num) => Attribute::new(*name, *num),
            FeatureValue::Flag(flag) => Attribute::new(*name, if *flag { 1.0 } else { 0.0 }),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use negscope_core::{Sentence, TokenRecord, extract_features, extract_labels};

    fn token(token: &str, pos: &str, cue: bool, label: &str) -> TokenRecord {
        TokenRecord {
            token: token.to_string(),
            lemma: token.to_string(),
            pos: pos.to_string(),
            cue: if cue { token.to_string() } else { "_".to_string() },
            constituency_distance: 1.0,
            same_clause: true,
            same_phrase: false,
            is_punct: false,
            sentence_position: 0.5,
            is_negation_cue: cue,
            token_distance: if cue { 0.0 } else { 2.0 },
            dependency_type: "dep".to_string(),
            dependency_head: "root".to_string(),
            distance_to_root: 1.0,
            distance_to_cue: if cue { 0.0 } else { 2.0 },
            label: label.to_string(),
        }
    }

    fn sentence(words: &[(&str, bool, &str)]) -> Sentence {
        Sentence {
            doc_id: "d".to_string(),
            sentence_num: 0,
            tokens: words
                .iter()
                .map(|(w, cue, label)| token(w, "NN", *cue, label))
                .collect(),
        }
    }

    #[test]
    fn item_conversion_matches_pycrfsuite_shapes() {
        let mut map = FeatureMap::new();
        map.insert("pos", FeatureValue::Text("NN".to_string()));
        map.insert("token_distance", FeatureValue::Number(2.5));
        map.insert("is_punct", FeatureValue::Flag(true));

        let item = to_item(&map);
        let mut names: Vec<(String, f64)> =
            item.into_iter().map(|a| (a.name, a.value)).collect();
        names.sort_by(|a, b| a.0.cmp(&b.0));
        assert_eq!(
            names,
            vec![
                ("is_punct".to_string(), 1.0),
                ("pos=NN".to_string(), 1.0),
                ("token_distance".to_string(), 2.5),
            ]
        );
    }

    #[test]
    fn trains_tags_and_scores_a_toy_corpus() {
        // Labels follow the cue flag exactly, so even a tiny model separates
        // them. The point is exercising the full train/persist/reload/tag
        // path, not modeling quality.
        let train: Vec<Sentence> = (0..20)
            .map(|i| {
                if i % 2 == 0 {
                    sentence(&[("he", false, "OS"), ("not", true, "CUE"), ("sad", false, "NEG")])
                } else {
                    sentence(&[("she", false, "OS"), ("smiled", false, "OS")])
                }
            })
            .collect();
        let dev = vec![
            sentence(&[("he", false, "OS"), ("not", true, "CUE"), ("sad", false, "NEG")]),
            sentence(&[("she", false, "OS"), ("smiled", false, "OS")]),
        ];

        let x_train: Vec<_> = train.iter().map(|s| extract_features(s, None)).collect();
        let y_train: Vec<_> = train.iter().map(extract_labels).collect();
        let x_dev: Vec<_> = dev.iter().map(|s| extract_features(s, None)).collect();
        let y_dev: Vec<_> = dev.iter().map(extract_labels).collect();

        let model_path =
            std::env::temp_dir().join(format!("negscope-crf-test-{}.model", std::process::id()));
        let config = TrainConfig {
            model_path: model_path.clone(),
            max_iterations: 50,
            ..TrainConfig::default()
        };

        let eval = train_and_evaluate(&x_train, &y_train, &x_dev, &y_dev, &config).unwrap();
        let _ = std::fs::remove_file(&model_path);

        assert_eq!(eval.predictions.len(), dev.len());
        for (pred, sent) in eval.predictions.iter().zip(&dev) {
            assert_eq!(pred.len(), sent.len());
        }
        assert!((0.0..=1.0).contains(&eval.metrics.f1));
    }
}
