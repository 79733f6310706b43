//! Tokenized table and source fingerprint.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A single row of fields, in column order.
pub type Row = Vec<String>;

/// Fingerprint of a delimited-text payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// SHA-256 hash of the payload.
    pub hash: String,
    /// Payload size in bytes.
    pub size_bytes: u64,
    /// Detected format (csv, tsv, etc.).
    pub format: String,
    /// The delimiter used to split fields.
    pub delimiter: char,
    /// Number of rows produced by the tokenizer (header included).
    pub row_count: usize,
    /// Width of the widest row.
    pub column_count: usize,
}

impl SourceMetadata {
    /// Fingerprint `text` as tokenized into `table` with `delimiter`.
    pub fn describe(text: &str, table: &Table, delimiter: char) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(text.as_bytes());
        let hash = format!("sha256:{:x}", hasher.finalize());

        let format = match delimiter {
            '\t' => "tsv",
            ',' => "csv",
            ';' => "csv-semicolon",
            '|' => "psv",
            _ => "delimited",
        }
        .to_string();

        Self {
            hash,
            size_bytes: text.len() as u64,
            format,
            delimiter,
            row_count: table.row_count(),
            column_count: table.column_count(),
        }
    }
}

/// Rows of fields produced by the tokenizer.
///
/// Row 0 may or may not be a header; that decision belongs to
/// [`crate::inference::TableLayout`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    /// Row data as strings (row-major order).
    pub rows: Vec<Row>,
}

impl Table {
    /// Create a new table.
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// Number of rows, header included.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Width of the widest row. Rows are not padded, so individual rows may be shorter.
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get a row by index.
    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Get all values for a column by index; short rows yield "".
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .map(move |row| row.get(index).map(|s| s.as_str()).unwrap_or(""))
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row).and_then(|r| r.get(col).map(|s| s.as_str()))
    }
}
