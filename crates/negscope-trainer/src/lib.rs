//! # Negscope Trainer
//!
//! CRF training and the feature-ablation study driver. Feature maps and
//! scoring come from `negscope-core`; this crate owns the CRFsuite bridge,
//! the per-feature retrain loop, and the `ablate` command-line entry point.

pub mod ablation;
pub mod crf;

pub use ablation::{
    AblationConfig, AblationReport, AblationRun, DEFAULT_DEV_PATH, DEFAULT_MODEL_PATH,
    DEFAULT_TRAIN_PATH, run_ablation,
};
pub use crf::{Evaluation, TrainConfig, train_and_evaluate};
