//! # Negscope Core
//!
//! Data model, feature extraction, and scope-aware scoring for the negation
//! scope tagging pipeline. This crate owns everything except the CRF itself:
//! it reads the pre-featurized 21-column corpus into sentences, builds the
//! per-token feature maps a sequence tagger consumes, scores predictions over
//! the in-scope/out-of-scope partition, and writes predicted labels back in
//! the source layout. Training and tagging live in `negscope-trainer`.
//!
//! ## Quick Start
//!
//! ```no_run
//! use negscope_core::{extract_features, extract_labels, load_corpus};
//!
//! let sentences = load_corpus("data/with_complete_features_dev.tsv").unwrap();
//! let features: Vec<_> = sentences.iter().map(|s| extract_features(s, None)).collect();
//! let labels: Vec<_> = sentences.iter().map(extract_labels).collect();
//! assert_eq!(features.len(), labels.len());
//! ```
pub mod error;
pub mod features;
pub mod loader;
pub mod metrics;
pub mod record;
pub mod writer;

// Re-export primary API
pub use error::{NegscopeError, Result};
pub use features::{
    END_POS, FEATURE_NAMES, FeatureMap, FeatureValue, START_POS, extract_features, extract_labels,
};
pub use loader::{load_corpus, read_corpus};
pub use metrics::{OUT_OF_SCOPE, ScopeMetrics, is_in_scope};
pub use record::{COLUMN_COUNT, LABEL_COLUMN, Sentence, TokenRecord};
pub use writer::write_predictions;
