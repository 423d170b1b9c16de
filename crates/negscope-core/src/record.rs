//! # Token Records and Sentences
//!
//! Typed representation of one row of the pre-featurized negation corpus and
//! the sentence grouping built on top of it. A record carries the 16 per-token
//! attributes the tagger consumes; the surrounding bookkeeping columns
//! (document id, sentence number, token number) live on [`Sentence`] or are
//! only used while grouping.

use serde::{Deserialize, Serialize};

use crate::error::{NegscopeError, Result};

/// Number of tab-separated columns in the corpus files.
pub const COLUMN_COUNT: usize = 21;

/// Index of the gold/predicted label column within a raw row.
pub const LABEL_COLUMN: usize = 8;

/// One token of the corpus with its pre-computed features.
///
/// Field order follows the corpus schema. The `constituency` and `focus`
/// columns are not carried; they are not consumed by the tagger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenRecord {
    pub token: String,
    pub lemma: String,
    pub pos: String,
    pub cue: String,
    pub constituency_distance: f64,
    pub same_clause: bool,
    pub same_phrase: bool,
    pub is_punct: bool,
    pub sentence_position: f64,
    pub is_negation_cue: bool,
    pub token_distance: f64,
    pub dependency_type: String,
    pub dependency_head: String,
    pub distance_to_root: f64,
    pub distance_to_cue: f64,
    /// Gold scope label, `"OS"` for out-of-scope tokens.
    pub label: String,
}

impl TokenRecord {
    /// Build a record from one raw 21-column row.
    ///
    /// `line` is the 1-based line number, used only for error reporting.
    pub fn from_row(fields: &[&str], line: usize) -> Result<Self> {
        debug_assert_eq!(fields.len(), COLUMN_COUNT);
        Ok(Self {
            token: fields[3].to_string(),
            lemma: fields[4].to_string(),
            pos: fields[5].to_string(),
            cue: fields[7].to_string(),
            label: fields[LABEL_COLUMN].to_string(),
            constituency_distance: parse_number(fields[10], "constituency_distance", line)?,
            same_clause: parse_flag(fields[11], "same_clause", line)?,
            same_phrase: parse_flag(fields[12], "same_phrase", line)?,
            is_punct: parse_flag(fields[13], "is_punct", line)?,
            sentence_position: parse_number(fields[14], "sentence_position", line)?,
            is_negation_cue: parse_flag(fields[15], "is_negation_cue", line)?,
            token_distance: parse_number(fields[16], "token_distance", line)?,
            dependency_type: fields[17].to_string(),
            dependency_head: fields[18].to_string(),
            distance_to_root: parse_number(fields[19], "distance_to_root", line)?,
            distance_to_cue: parse_number(fields[20], "distance_to_cue", line)?,
        })
    }
}

/// An ordered run of tokens sharing a document id and sentence number.
///
/// Token order is significant: it defines the previous/next neighbors used
/// during feature extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentence {
    pub doc_id: String,
    pub sentence_num: u32,
    pub tokens: Vec<TokenRecord>,
}

impl Sentence {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

fn parse_number(cell: &str, column: &'static str, line: usize) -> Result<f64> {
    cell.trim()
        .parse::<f64>()
        .map_err(|_| NegscopeError::FieldParse {
            line,
            column,
            value: cell.to_string(),
        })
}

/// Boolean cells appear as `True`/`False` or `1`/`0` depending on how the
/// corpus was featurized; accept both spellings.
fn parse_flag(cell: &str, column: &'static str, line: usize) -> Result<bool> {
    match cell.trim() {
        "True" | "true" | "1" | "1.0" => Ok(true),
        "False" | "false" | "0" | "0.0" => Ok(false),
        _ => Err(NegscopeError::FieldParse {
            line,
            column,
            value: cell.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> Vec<&'static str> {
        vec![
            "doc1", "0", "2", "nobody", "nobody", "NN", "(NP*)", "nobody", "NEG", "_", "2", "True",
            "False", "False", "0.25", "True", "0", "nsubj", "came", "1", "0",
        ]
    }

    #[test]
    fn parses_full_row() {
        let rec = TokenRecord::from_row(&row(), 1).unwrap();
        assert_eq!(rec.token, "nobody");
        assert_eq!(rec.pos, "NN");
        assert_eq!(rec.label, "NEG");
        assert!(rec.same_clause);
        assert!(!rec.is_punct);
        assert_eq!(rec.constituency_distance, 2.0);
        assert_eq!(rec.sentence_position, 0.25);
    }

    #[test]
    fn rejects_unparseable_flag() {
        let mut fields = row();
        fields[11] = "maybe";
        let err = TokenRecord::from_row(&fields, 9).unwrap_err();
        assert!(matches!(
            err,
            NegscopeError::FieldParse { line: 9, column: "same_clause", .. }
        ));
    }

    #[test]
    fn rejects_unparseable_number() {
        let mut fields = row();
        fields[20] = "far";
        let err = TokenRecord::from_row(&fields, 4).unwrap_err();
        assert!(matches!(
            err,
            NegscopeError::FieldParse { column: "distance_to_cue", .. }
        ));
    }

    #[test]
    fn flag_accepts_numeric_spelling() {
        let mut fields = row();
        fields[11] = "0";
        fields[15] = "1";
        let rec = TokenRecord::from_row(&fields, 1).unwrap();
        assert!(!rec.same_clause);
        assert!(rec.is_negation_cue);
    }
}
