//! # Corpus Loader
//!
//! Reads the headerless 21-column TSV corpus and groups its rows into
//! [`Sentence`]s. Rows are grouped on every change of (document id, sentence
//! number), so sentence order follows file order. The corpus files are
//! expected to be sorted by (document id, sentence number, token number);
//! under that ordering this grouping is identical to a keyed group-by, and it
//! keeps loader order aligned with file order for the prediction writer.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::error::{NegscopeError, Result};
use crate::record::{COLUMN_COUNT, Sentence, TokenRecord};

/// Load a corpus file into sentences.
pub fn load_corpus<P: AsRef<Path>>(path: P) -> Result<Vec<Sentence>> {
    let file = File::open(path.as_ref())?;
    let sentences = read_corpus(BufReader::new(file))?;
    debug!(
        path = %path.as_ref().display(),
        sentences = sentences.len(),
        "loaded corpus"
    );
    Ok(sentences)
}

/// Read sentences from any buffered source of corpus rows.
pub fn read_corpus<R: BufRead>(reader: R) -> Result<Vec<Sentence>> {
    let mut sentences = Vec::new();
    let mut current: Option<Sentence> = None;

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        let line_num = idx + 1;

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != COLUMN_COUNT {
            return Err(NegscopeError::MalformedRow {
                line: line_num,
                expected: COLUMN_COUNT,
                found: fields.len(),
            });
        }

        let doc_id = fields[0];
        let sentence_num: u32 =
            fields[1]
                .trim()
                .parse()
                .map_err(|_| NegscopeError::FieldParse {
                    line: line_num,
                    column: "sentence_num",
                    value: fields[1].to_string(),
                })?;
        let record = TokenRecord::from_row(&fields, line_num)?;

        let same_sentence = current
            .as_ref()
            .is_some_and(|s| s.doc_id == doc_id && s.sentence_num == sentence_num);
        if !same_sentence {
            if let Some(done) = current.take() {
                sentences.push(done);
            }
            current = Some(Sentence {
                doc_id: doc_id.to_string(),
                sentence_num,
                tokens: Vec::new(),
            });
        }
        current
            .as_mut()
            .expect("current sentence set above")
            .tokens
            .push(record);
    }

    if let Some(done) = current {
        sentences.push(done);
    }

    Ok(sentences)
}
