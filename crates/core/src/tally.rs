//! Counting normalized values per column.

use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use crate::columns::ColumnSpec;
use crate::normalize::normalize;

/// Occurrence counts of normalized values, grouped by column name.
///
/// Columns appear in the order they were first observed, which follows
/// column order. Values appear in first-occurrence order. A column or value
/// is only present once it has been counted, so every count is at least 1.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Tally {
    columns: IndexMap<String, IndexMap<String, usize>>,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `value` under `column`.
    pub fn record(&mut self, column: &str, value: String) {
        let values = self.columns.entry(column.to_string()).or_default();
        *values.entry(value).or_insert(0) += 1;
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Number of columns with at least one counted value.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Column names in tally order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// `(value, count)` pairs of a column in first-occurrence order.
    pub fn values(&self, column: &str) -> impl Iterator<Item = (&str, usize)> {
        self.columns
            .get(column)
            .into_iter()
            .flat_map(|values| values.iter().map(|(value, count)| (value.as_str(), *count)))
    }

    pub fn count(&self, column: &str, value: &str) -> Option<usize> {
        self.columns.get(column)?.get(value).copied()
    }

    /// Every column with its values, in tally order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &IndexMap<String, usize>)> {
        self.columns.iter().map(|(name, values)| (name.as_str(), values))
    }
}

/// Tally the fields of `rows` under `columns`.
///
/// Each row must already have the excluded prefix removed, so a column reads
/// `row[column.position]`. Missing, blank and `null` fields are skipped,
/// which makes short rows harmless. Rows are walked in order and columns in
/// order within each row; that order decides where new values land.
pub fn aggregate<R: AsRef<[String]>>(rows: &[R], columns: &[ColumnSpec]) -> Tally {
    let mut tally = Tally::new();
    if rows.is_empty() || columns.is_empty() {
        return tally;
    }

    for row in rows {
        let fields = row.as_ref();
        for column in columns {
            let field = fields.get(column.position).map(String::as_str);
            if let Some(value) = normalize(field) {
                tally.record(&column.name, value);
            }
        }
    }

    debug!(
        rows = rows.len(),
        columns = columns.len(),
        tallied_columns = tally.len(),
        "aggregated rows"
    );
    tally
}

/// Drop the first `excluded_columns` fields of every row.
///
/// Rows shorter than the prefix become empty.
pub fn exclude_prefix(rows: &[Vec<String>], excluded_columns: usize) -> Vec<&[String]> {
    rows.iter()
        .map(|row| row.get(excluded_columns..).unwrap_or(&[]))
        .collect()
}
