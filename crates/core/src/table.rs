//! Splitting pasted text into rows and tab-separated fields.

use crate::FIELD_DELIMITER;

/// Rows of fields, in input order.
///
/// Row 0 is the header when header detection is active.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// The first row, or an empty slice for an empty table.
    pub fn header(&self) -> &[String] {
        self.rows.first().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every row after the header.
    pub fn data_rows(&self) -> &[Vec<String>] {
        self.rows.get(1..).unwrap_or(&[])
    }
}

/// Split `text` into rows on newlines and each row into fields on tabs.
///
/// The whole input is trimmed first, so blank input gives an empty table.
/// There is no quoting: a tab inside a value always starts a new field.
pub fn tokenize(text: &str) -> RawTable {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return RawTable::default();
    }

    let rows = trimmed.lines().map(split_fields).collect();
    RawTable { rows }
}

/// Split one line into fields. An empty line gives a single empty field.
pub fn split_fields(line: &str) -> Vec<String> {
    line.split(FIELD_DELIMITER).map(str::to_string).collect()
}

/// Header row of `text` without tokenizing the rest of the input.
pub fn header_row(text: &str) -> Vec<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    trimmed.lines().next().map(split_fields).unwrap_or_default()
}
