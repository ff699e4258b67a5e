//! Source records and their text representation.
//!
//! The engine indexes anything implementing [`Document`]. [`Record`] is the
//! bundled record type: a medical transcription sample whose descriptive fields
//! are combined into the indexed text and otherwise passed through untouched.
//!
//! ## Missing fields
//!
//! A field that is absent, `null`, or an empty CSV cell deserializes to the
//! empty string. Real-world exports routinely omit columns; an empty field simply
//! contributes no terms, and the record is still indexed and returned.

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{info, warn};

use crate::error::{Result, RetrieveError};

/// Something that can be indexed: it only needs a text representation.
pub trait Document {
    fn text(&self) -> Cow<'_, str>;
}

impl Document for String {
    fn text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

impl Document for &str {
    fn text(&self) -> Cow<'_, str> {
        Cow::Borrowed(*self)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// One source record. All fields are free-form pass-through display data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub medical_specialty: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub sample_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub transcription: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub keywords: String,
}

impl Document for Record {
    /// `description`, `transcription` and `keywords`, space separated.
    fn text(&self) -> Cow<'_, str> {
        Cow::Owned(format!(
            "{} {} {}",
            self.description, self.transcription, self.keywords
        ))
    }
}

/// Read at most `limit` records from a CSV, JSON array or JSON Lines file.
///
/// The format follows the extension:
///
/// - `.csv`: header row, columns matched by name; extra columns are ignored
/// - `.jsonl` / `.ndjson`: one object per line, blank lines skipped
/// - anything else: a single JSON array
pub fn load(path: impl AsRef<Path>, limit: Option<usize>) -> Result<Vec<Record>> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);

    let records = match path.extension().and_then(|e| e.to_str()) {
        Some("csv") => read_csv(reader, limit)?,
        Some("jsonl" | "ndjson") => read_json_lines(reader, limit)?,
        _ => {
            let mut records: Vec<Record> = serde_json::from_reader(reader)?;
            if let Some(limit) = limit {
                if records.len() > limit {
                    warn!(total = records.len(), limit, "truncating records to corpus limit");
                    records.truncate(limit);
                }
            }
            records
        }
    };

    info!(path = %path.display(), count = records.len(), "loaded records");
    Ok(records)
}

/// Parse CSV with a header row from any reader.
///
/// Absent columns and empty cells read as `""`. Every row must have as many
/// cells as the header.
pub fn read_csv<R: Read>(reader: R, limit: Option<usize>) -> Result<Vec<Record>> {
    let mut reader = csv::ReaderBuilder::new().from_reader(reader);
    reader
        .deserialize::<Record>()
        .take(limit.unwrap_or(usize::MAX))
        .map(|row| row.map_err(RetrieveError::from))
        .collect()
}

/// Parse JSON Lines from any reader.
pub fn read_json_lines<R: BufRead>(reader: R, limit: Option<usize>) -> Result<Vec<Record>> {
    let mut records = Vec::new();
    for (lineno, line) in reader.lines().enumerate() {
        if limit.is_some_and(|l| records.len() >= l) {
            break;
        }
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(&line)
            .map_err(|e| RetrieveError::Parse(format!("line {}: {e}", lineno + 1)))?;
        records.push(record);
    }
    Ok(records)
}
