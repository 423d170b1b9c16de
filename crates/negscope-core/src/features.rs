//! # Feature Builder
//!
//! Turns each [`TokenRecord`] into the named feature map handed to the CRF
//! trainer. Besides the token's own attributes, three features are derived
//! from sentence context: the neighbor part-of-speech tags `prev_pos` and
//! `next_pos` (with `START`/`END` sentinels at the sentence edges) and the
//! lexicalized tag `lemma_POS`. A single named feature can be withheld, which
//! is what the ablation driver iterates over.

use std::collections::BTreeMap;

use crate::record::Sentence;

/// Sentinel `prev_pos` value for the first token of a sentence.
pub const START_POS: &str = "START";

/// Sentinel `next_pos` value for the last token of a sentence.
pub const END_POS: &str = "END";

/// All feature names a token map carries, in schema order.
pub const FEATURE_NAMES: &[&str] = &[
    "token",
    "lemma",
    "pos",
    "lexicalized_pos",
    "cue",
    "prev_pos",
    "next_pos",
    "constituency_distance",
    "same_clause",
    "same_phrase",
    "is_punct",
    "sentence_position",
    "is_negation_cue",
    "token_distance",
    "dependency_type",
    "dependency_head",
    "distance_to_root",
    "distance_to_cue",
];

/// A single feature value. CRFsuite attributes distinguish categorical
/// features (emitted as `name=value` with unit weight) from numeric ones
/// (emitted as `name` with the number as weight); this enum keeps that
/// distinction explicit.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue {
    Text(String),
    Number(f64),
    Flag(bool),
}

/// Named features for one token.
pub type FeatureMap = BTreeMap<&'static str, FeatureValue>;

/// Build one feature map per token, index-aligned with the sentence.
///
/// If `exclude` names one of [`FEATURE_NAMES`], that key is omitted from every
/// map; any other name is silently a no-op.
pub fn extract_features(sentence: &Sentence, exclude: Option<&str>) -> Vec<FeatureMap> {
    let mut maps = Vec::with_capacity(sentence.len());

    for (i, rec) in sentence.tokens.iter().enumerate() {
        let prev_pos = if i > 0 {
            sentence.tokens[i - 1].pos.as_str()
        } else {
            START_POS
        };
        let next_pos = if i + 1 < sentence.len() {
            sentence.tokens[i + 1].pos.as_str()
        } else {
            END_POS
        };

        let mut features = FeatureMap::new();
        features.insert("token", FeatureValue::Text(rec.token.clone()));
        features.insert("lemma", FeatureValue::Text(rec.lemma.clone()));
        features.insert("pos", FeatureValue::Text(rec.pos.clone()));
        features.insert(
            "lexicalized_pos",
            FeatureValue::Text(format!("{}_{}", rec.lemma, rec.pos)),
        );
        features.insert("cue", FeatureValue::Text(rec.cue.clone()));
        features.insert("prev_pos", FeatureValue::Text(prev_pos.to_string()));
        features.insert("next_pos", FeatureValue::Text(next_pos.to_string()));
        features.insert(
            "constituency_distance",
            FeatureValue::Number(rec.constituency_distance),
        );
        features.insert("same_clause", FeatureValue::Flag(rec.same_clause));
        features.insert("same_phrase", FeatureValue::Flag(rec.same_phrase));
        features.insert("is_punct", FeatureValue::Flag(rec.is_punct));
        features.insert(
            "sentence_position",
            FeatureValue::Number(rec.sentence_position),
        );
        features.insert("is_negation_cue", FeatureValue::Flag(rec.is_negation_cue));
        features.insert("token_distance", FeatureValue::Number(rec.token_distance));
        features.insert(
            "dependency_type",
            FeatureValue::Text(rec.dependency_type.clone()),
        );
        features.insert(
            "dependency_head",
            FeatureValue::Text(rec.dependency_head.clone()),
        );
        features.insert(
            "distance_to_root",
            FeatureValue::Number(rec.distance_to_root),
        );
        features.insert("distance_to_cue", FeatureValue::Number(rec.distance_to_cue));

        if let Some(name) = exclude {
            features.remove(name);
        }

        maps.push(features);
    }

    maps
}

/// Project the gold label of every token, preserving order.
pub fn extract_labels(sentence: &Sentence) -> Vec<String> {
    sentence.tokens.iter().map(|t| t.label.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::TokenRecord;

    fn token(token: &str, pos: &str, label: &str) -> TokenRecord {
        TokenRecord {
            token: token.to_string(),
            lemma: token.to_string(),
            pos: pos.to_string(),
            cue: "_".to_string(),
            constituency_distance: 1.0,
            same_clause: true,
            same_phrase: false,
            is_punct: false,
            sentence_position: 0.5,
            is_negation_cue: false,
            token_distance: 2.0,
            dependency_type: "nsubj".to_string(),
            dependency_head: "root".to_string(),
            distance_to_root: 1.0,
            distance_to_cue: 3.0,
            label: label.to_string(),
        }
    }

    fn sentence() -> Sentence {
        Sentence {
            doc_id: "d1".to_string(),
            sentence_num: 0,
            tokens: vec![
                token("he", "PRP", "OS"),
                token("never", "RB", "CUE"),
                token("came", "VBD", "NEG"),
            ],
        }
    }

    #[test]
    fn one_map_per_token_with_all_names() {
        let maps = extract_features(&sentence(), None);
        assert_eq!(maps.len(), 3);
        for map in &maps {
            assert_eq!(map.len(), FEATURE_NAMES.len());
            for name in FEATURE_NAMES {
                assert!(map.contains_key(name), "missing {name}");
            }
        }
    }

    #[test]
    fn neighbor_pos_uses_sentinels_at_edges() {
        let maps = extract_features(&sentence(), None);
        assert_eq!(maps[0]["prev_pos"], FeatureValue::Text("START".into()));
        assert_eq!(maps[0]["next_pos"], FeatureValue::Text("RB".into()));
        assert_eq!(maps[1]["prev_pos"], FeatureValue::Text("PRP".into()));
        assert_eq!(maps[1]["next_pos"], FeatureValue::Text("VBD".into()));
        assert_eq!(maps[2]["next_pos"], FeatureValue::Text("END".into()));
    }

    #[test]
    fn lexicalized_pos_joins_lemma_and_pos() {
        let maps = extract_features(&sentence(), None);
        assert_eq!(
            maps[1]["lexicalized_pos"],
            FeatureValue::Text("never_RB".into())
        );
    }

    #[test]
    fn excluding_removes_exactly_one_key_everywhere() {
        let full = extract_features(&sentence(), None);
        let ablated = extract_features(&sentence(), Some("prev_pos"));
        for (full_map, ablated_map) in full.iter().zip(&ablated) {
            assert_eq!(ablated_map.len(), full_map.len() - 1);
            assert!(!ablated_map.contains_key("prev_pos"));
            for (key, value) in ablated_map {
                assert_eq!(&full_map[key], value);
            }
        }
    }

    #[test]
    fn excluding_unknown_name_is_a_no_op() {
        let full = extract_features(&sentence(), None);
        let same = extract_features(&sentence(), Some("no_such_feature"));
        assert_eq!(full, same);
    }

    #[test]
    fn single_token_sentence_gets_both_sentinels() {
        let s = Sentence {
            doc_id: "d1".to_string(),
            sentence_num: 0,
            tokens: vec![token("no", "DT", "CUE")],
        };
        let maps = extract_features(&s, None);
        assert_eq!(maps[0]["prev_pos"], FeatureValue::Text("START".into()));
        assert_eq!(maps[0]["next_pos"], FeatureValue::Text("END".into()));
    }

    #[test]
    fn labels_align_with_tokens() {
        let labels = extract_labels(&sentence());
        assert_eq!(labels, vec!["OS", "CUE", "NEG"]);
    }
}
