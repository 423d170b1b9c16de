//! # Prediction Writer
//!
//! Writes a tagging run back out in the original corpus layout: the source
//! table is re-read row by row, the label column is replaced with the
//! flattened predictions, and everything else is passed through untouched.
//! The flattened prediction count must match the row count exactly; rows are
//! consumed in file order, which the loader's grouping preserves.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::error::{NegscopeError, Result};
use crate::record::{COLUMN_COUNT, LABEL_COLUMN};

/// Rewrite `original` with predicted labels spliced in, serialized to `output`.
///
/// `predictions` holds one label sequence per sentence in loader order.
pub fn write_predictions<P, Q>(original: P, predictions: &[Vec<String>], output: Q) -> Result<()>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let source = File::open(original.as_ref())?;
    let sink = File::create(output.as_ref())?;
    splice(
        BufReader::new(source),
        predictions,
        BufWriter::new(sink),
        original.as_ref(),
    )?;
    debug!(
        output = %output.as_ref().display(),
        sentences = predictions.len(),
        "wrote predictions"
    );
    Ok(())
}

fn splice<R: BufRead, W: Write>(
    reader: R,
    predictions: &[Vec<String>],
    mut writer: W,
    origin: &Path,
) -> Result<()> {
    let rows: Vec<String> = reader
        .lines()
        .collect::<std::io::Result<Vec<_>>>()?
        .into_iter()
        .filter(|l| !l.is_empty())
        .collect();

    let flat: Vec<&str> = predictions
        .iter()
        .flat_map(|sentence| sentence.iter().map(String::as_str))
        .collect();
    if flat.len() != rows.len() {
        return Err(NegscopeError::PredictionCountMismatch {
            path: origin.to_path_buf(),
            expected: rows.len(),
            found: flat.len(),
        });
    }

    for (idx, (row, label)) in rows.iter().zip(&flat).enumerate() {
        let mut fields: Vec<&str> = row.split('\t').collect();
        if fields.len() != COLUMN_COUNT {
            return Err(NegscopeError::MalformedRow {
                line: idx + 1,
                expected: COLUMN_COUNT,
                found: fields.len(),
            });
        }
        fields[LABEL_COLUMN] = label;
        writeln!(writer, "{}", fields.join("\t"))?;
    }
    writer.flush()?;
    Ok(())
}
