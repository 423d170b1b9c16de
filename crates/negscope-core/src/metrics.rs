//! # Scope-Aware Scoring
//!
//! Scores a tagging run by partitioning labels into in-scope and out-of-scope
//! rather than by exact label identity: a token counts as a true positive
//! whenever both gold and predicted labels are in scope, regardless of which
//! in-scope label was predicted. This measures the scope-detection sub-task,
//! not labeling accuracy; it is the evaluation the ablation study is defined
//! over and is kept exactly as defined.

use serde::Serialize;

/// The literal label marking a token as outside any negation scope.
pub const OUT_OF_SCOPE: &str = "OS";

/// A label is in scope iff it is not the out-of-scope marker.
pub fn is_in_scope(label: &str) -> bool {
    label != OUT_OF_SCOPE
}

/// Precision, recall, and F1 over the in-scope/out-of-scope partition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScopeMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

impl ScopeMetrics {
    /// Score flattened gold labels against flattened predictions.
    ///
    /// Pairs are taken positionally; like the training pipeline, the shorter
    /// of the two sequences bounds the comparison. Every zero-denominator
    /// case yields 0 rather than an error.
    pub fn compute<T, U>(gold: &[T], predicted: &[U]) -> Self
    where
        T: AsRef<str>,
        U: AsRef<str>,
    {
        let mut true_positives = 0usize;
        let mut false_positives = 0usize;
        let mut false_negatives = 0usize;
        // Tracked for completeness; the formula never consumes it.
        let mut true_negatives = 0usize;

        for (gold, pred) in gold.iter().zip(predicted) {
            match (is_in_scope(gold.as_ref()), is_in_scope(pred.as_ref())) {
                (true, true) => true_positives += 1,
                (false, true) => false_positives += 1,
                (true, false) => false_negatives += 1,
                (false, false) => true_negatives += 1,
            }
        }
        let _ = true_negatives;

        let precision = ratio(true_positives, true_positives + false_positives);
        let recall = ratio(true_positives, true_positives + false_negatives);
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };

        Self { precision, recall, f1 }
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator > 0 {
        numerator as f64 / denominator as f64
    } else {
        0.0
    }
}
