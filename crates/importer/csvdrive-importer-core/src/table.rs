//! Source table: the whole CSV file decoded and split into rows.

use std::path::Path;

/// All rows of the file in order, header included. Fields are whitespace-trimmed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SourceTable {
    rows: Vec<Vec<String>>,
}

impl SourceTable {
    /// Read and parse a file. I/O failures surface as `Unexpected` through `From`.
    pub fn read(path: &Path) -> Result<Self, crate::ImportError> {
        let bytes = std::fs::read(path)?;
        Ok(Self::parse(&bytes)?)
    }

    /// Parse comma-delimited text. Invalid UTF-8 sequences are dropped, rows may have
    /// differing widths and blank lines produce no row.
    pub fn parse(bytes: &[u8]) -> Result<Self, csv::Error> {
        let text = decode_lossy(bytes);
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(text.as_bytes());

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_owned).collect());
        }
        Ok(Self { rows })
    }

    /// True when the file has no rows at all, not even a header.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// Rows after the header.
    pub fn data_rows(&self) -> impl Iterator<Item = &[String]> {
        self.rows.iter().skip(1).map(Vec::as_slice)
    }

    pub fn first_data_row(&self) -> Option<&[String]> {
        self.rows.get(1).map(Vec::as_slice)
    }

    pub fn data_row_count(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }
}

/// UTF-8 decode that skips invalid byte sequences instead of substituting U+FFFD.
fn decode_lossy(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        out.push_str(chunk.valid());
    }
    out
}
